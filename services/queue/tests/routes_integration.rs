//! Integration tests for the HTTP handlers
//!
//! These tests call the handler functions directly with a real `AppState`,
//! so the actor-resolution and input-validation paths run end to end
//! against the PostgreSQL database configured through `DATABASE_URL`. They
//! share tables with the lifecycle tests and are serialized with
//! `serial_test`.

use axum::Json;
use axum::extract::{Path, State};
use serial_test::serial;
use uuid::Uuid;

use common::database::{DatabaseConfig, init_pool, run_migrations};
use queue::error::QueueError;
use queue::models::{NewQueueRequest, NewUser, Role, User};
use queue::repositories::{RequestRepository, UserRepository};
use queue::routes::{self, AcceptQueueRequest, PostQueueRequest, RegisterRequest};
use queue::state::AppState;

type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Connect to the test database, apply migrations, and clear all tables
async fn setup() -> Result<AppState, Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env()?;
    let pool = init_pool(&config).await?;

    run_migrations(&pool, &queue::MIGRATOR).await?;

    sqlx::query("TRUNCATE queue_requests, users")
        .execute(&pool)
        .await?;

    let user_repository = UserRepository::new(pool.clone());
    let request_repository = RequestRepository::new(pool.clone());

    Ok(AppState {
        db_pool: pool,
        user_repository,
        request_repository,
    })
}

async fn register(
    state: &AppState,
    name: &str,
    email: &str,
    role: Role,
) -> Result<User, Box<dyn std::error::Error>> {
    let user = state
        .user_repository
        .create(&NewUser {
            name: name.to_string(),
            email: email.to_string(),
            role,
        })
        .await?;
    Ok(user)
}

async fn count_rows(state: &AppState, table: &str) -> Result<i64, Box<dyn std::error::Error>> {
    let count = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(&state.db_pool)
        .await?;
    Ok(count)
}

#[tokio::test]
#[serial]
async fn registration_with_missing_fields_is_rejected() -> TestResult {
    let state = setup().await?;

    let payload = RegisterRequest {
        name: Some("Alice".to_string()),
        email: None,
        role: Some("requester".to_string()),
    };

    let Err(err) = routes::register(State(state.clone()), Json(payload)).await else {
        panic!("registration without an email should fail");
    };
    assert!(matches!(err, QueueError::Validation(msg) if msg == "Missing fields"));

    assert_eq!(count_rows(&state, "users").await?, 0);

    Ok(())
}

#[tokio::test]
#[serial]
async fn registration_with_invalid_role_creates_no_user() -> TestResult {
    let state = setup().await?;

    let payload = RegisterRequest {
        name: Some("Alice".to_string()),
        email: Some("alice@example.com".to_string()),
        role: Some("admin".to_string()),
    };

    let Err(err) = routes::register(State(state.clone()), Json(payload)).await else {
        panic!("registration with an unknown role should fail");
    };
    assert!(matches!(err, QueueError::Validation(msg) if msg == "Role must be requester or queuer"));

    assert_eq!(count_rows(&state, "users").await?, 0);

    Ok(())
}

#[tokio::test]
#[serial]
async fn post_request_by_queuer_is_rejected() -> TestResult {
    let state = setup().await?;

    let queuer = register(&state, "Bob", "bob@example.com", Role::Queuer).await?;

    let payload = PostQueueRequest {
        requester_id: Some(queuer.id.to_string()),
        description: Some("Stand in line at the bakery".to_string()),
        location: None,
        payment: Some(5.0),
    };

    let Err(err) = routes::post_queue_request(State(state.clone()), Json(payload)).await else {
        panic!("posting as a queuer should fail");
    };
    assert!(matches!(err, QueueError::InvalidActor(msg) if msg == "Invalid requester ID"));

    assert_eq!(count_rows(&state, "queue_requests").await?, 0);

    Ok(())
}

#[tokio::test]
#[serial]
async fn post_request_with_unknown_or_malformed_requester_is_rejected() -> TestResult {
    let state = setup().await?;

    for requester_id in [Some("not-a-uuid".to_string()), Some(Uuid::new_v4().to_string()), None] {
        let payload = PostQueueRequest {
            requester_id,
            description: None,
            location: None,
            payment: None,
        };

        let Err(err) = routes::post_queue_request(State(state.clone()), Json(payload)).await
        else {
            panic!("posting without a valid requester should fail");
        };
        assert!(matches!(err, QueueError::InvalidActor(msg) if msg == "Invalid requester ID"));
    }

    assert_eq!(count_rows(&state, "queue_requests").await?, 0);

    Ok(())
}

#[tokio::test]
#[serial]
async fn post_request_with_negative_payment_is_rejected() -> TestResult {
    let state = setup().await?;

    let requester = register(&state, "Alice", "alice@example.com", Role::Requester).await?;

    let payload = PostQueueRequest {
        requester_id: Some(requester.id.to_string()),
        description: None,
        location: None,
        payment: Some(-5.0),
    };

    let Err(err) = routes::post_queue_request(State(state.clone()), Json(payload)).await else {
        panic!("posting with a negative payment should fail");
    };
    assert!(matches!(err, QueueError::Validation(msg) if msg == "Payment must not be negative"));

    assert_eq!(count_rows(&state, "queue_requests").await?, 0);

    Ok(())
}

#[tokio::test]
#[serial]
async fn post_request_with_overlong_description_is_rejected() -> TestResult {
    let state = setup().await?;

    let requester = register(&state, "Alice", "alice@example.com", Role::Requester).await?;

    let payload = PostQueueRequest {
        requester_id: Some(requester.id.to_string()),
        description: Some("a".repeat(201)),
        location: None,
        payment: None,
    };

    let Err(err) = routes::post_queue_request(State(state.clone()), Json(payload)).await else {
        panic!("posting an overlong description should fail");
    };
    assert!(
        matches!(err, QueueError::Validation(msg) if msg == "Description must be at most 200 characters long")
    );

    Ok(())
}

#[tokio::test]
#[serial]
async fn accept_with_invalid_queuer_is_rejected() -> TestResult {
    let state = setup().await?;

    let requester = register(&state, "Alice", "alice@example.com", Role::Requester).await?;

    let request = state
        .request_repository
        .create(&NewQueueRequest {
            requester_id: requester.id,
            description: None,
            location: None,
            payment: 0.0,
        })
        .await?;

    // A requester cannot accept, and neither can a malformed or unknown id
    for queuer_id in [
        Some(requester.id.to_string()),
        Some("not-a-uuid".to_string()),
        Some(Uuid::new_v4().to_string()),
        None,
    ] {
        let result = routes::accept_request(
            State(state.clone()),
            Path(request.id.to_string()),
            Json(AcceptQueueRequest { queuer_id }),
        )
        .await;

        let Err(err) = result else {
            panic!("accepting without a valid queuer should fail");
        };
        assert!(matches!(err, QueueError::InvalidActor(msg) if msg == "Invalid queuer ID"));
    }

    // The request is untouched
    let stored = state
        .request_repository
        .find_by_id(request.id)
        .await?
        .expect("request not found");
    assert_eq!(stored.queuer_id, None);

    Ok(())
}

#[tokio::test]
#[serial]
async fn accept_with_malformed_request_id_reports_invalid_state() -> TestResult {
    let state = setup().await?;

    let queuer = register(&state, "Bob", "bob@example.com", Role::Queuer).await?;

    let result = routes::accept_request(
        State(state.clone()),
        Path("not-a-uuid".to_string()),
        Json(AcceptQueueRequest {
            queuer_id: Some(queuer.id.to_string()),
        }),
    )
    .await;

    let Err(err) = result else {
        panic!("accepting a malformed request id should fail");
    };
    assert!(
        matches!(err, QueueError::InvalidState(msg) if msg == "Request not found or already accepted")
    );

    Ok(())
}
