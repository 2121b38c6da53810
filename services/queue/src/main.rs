use anyhow::Result;
use std::env;
use tokio::net::TcpListener;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use common::database::{DatabaseConfig, init_pool};
use queue::{
    MIGRATOR,
    repositories::{RequestRepository, UserRepository},
    routes,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting queue service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Apply schema migrations
    common::database::run_migrations(&pool, &MIGRATOR).await?;
    info!("Database migrations applied");

    // Initialize repositories
    let user_repository = UserRepository::new(pool.clone());
    let request_repository = RequestRepository::new(pool.clone());

    let app_state = AppState {
        db_pool: pool,
        user_repository,
        request_repository,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let bind_addr = env::var("QUEUE_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Queue service listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
