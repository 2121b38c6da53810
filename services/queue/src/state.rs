//! Application state shared across handlers

use sqlx::PgPool;

use crate::repositories::{RequestRepository, UserRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub user_repository: UserRepository,
    pub request_repository: RequestRepository,
}
