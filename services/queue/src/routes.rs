//! Queue service routes

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{QueueError, QueueResult},
    models::{NewQueueRequest, NewUser, Role, User},
    state::AppState,
    validation::{validate_email, validate_name, validate_payment, validate_text},
};

/// Request for user registration
///
/// Fields are optional so that missing keys surface as a validation error
/// rather than a deserializer rejection.
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// Request for posting a queue request
#[derive(Deserialize)]
pub struct PostQueueRequest {
    pub requester_id: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub payment: Option<f64>,
}

/// Request for accepting a queue request
#[derive(Deserialize)]
pub struct AcceptQueueRequest {
    pub queuer_id: Option<String>,
}

/// Create the router for the queue service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route("/register", post(register))
        .route("/queue/request", post(post_queue_request))
        .route("/queue/open", get(open_requests))
        .route("/queue/accept/:request_id", post(accept_request))
        .route("/queue/complete/:request_id", post(complete_request))
        .with_state(state)
}

/// Welcome endpoint
pub async fn home() -> impl IntoResponse {
    Json(json!({
        "message": "Welcome to MyQueue API!"
    }))
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = match common::database::health_check(&state.db_pool).await {
        Ok(_) => "ok",
        Err(e) => {
            tracing::error!("Database health check failed: {}", e);
            "unavailable"
        }
    };

    Json(json!({
        "status": "ok",
        "service": "queue-service",
        "database": database,
    }))
}

/// Register a new user as a requester or queuer
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> QueueResult<impl IntoResponse> {
    let (Some(name), Some(email), Some(role)) = (payload.name, payload.email, payload.role) else {
        return Err(QueueError::Validation("Missing fields".to_string()));
    };

    validate_name(&name).map_err(QueueError::Validation)?;
    validate_email(&email).map_err(QueueError::Validation)?;
    let role = Role::try_from(role.as_str())
        .map_err(|e| QueueError::Validation(e.to_string()))?;

    let user = state
        .user_repository
        .create(&NewUser { name, email, role })
        .await?;

    Ok(Json(json!({
        "message": "User registered successfully",
        "user_id": user.id,
    })))
}

/// Post a new queue request on behalf of a requester
pub async fn post_queue_request(
    State(state): State<AppState>,
    Json(payload): Json<PostQueueRequest>,
) -> QueueResult<impl IntoResponse> {
    let requester = resolve_actor(
        &state,
        payload.requester_id.as_deref(),
        User::is_requester,
        "Invalid requester ID",
    )
    .await?;

    if let Some(description) = payload.description.as_deref() {
        validate_text("Description", description).map_err(QueueError::Validation)?;
    }
    if let Some(location) = payload.location.as_deref() {
        validate_text("Location", location).map_err(QueueError::Validation)?;
    }

    let payment = payload.payment.unwrap_or(0.0);
    validate_payment(payment).map_err(QueueError::Validation)?;

    let request = state
        .request_repository
        .create(&NewQueueRequest {
            requester_id: requester.id,
            description: payload.description,
            location: payload.location,
            payment,
        })
        .await?;

    Ok(Json(json!({
        "message": "Queue request created",
        "request_id": request.id,
    })))
}

/// List all open queue requests for queuer discovery
pub async fn open_requests(State(state): State<AppState>) -> QueueResult<impl IntoResponse> {
    let summaries = state.request_repository.list_open().await?;

    Ok(Json(summaries))
}

/// Accept an open queue request as a queuer
pub async fn accept_request(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    Json(payload): Json<AcceptQueueRequest>,
) -> QueueResult<impl IntoResponse> {
    let queuer = resolve_actor(
        &state,
        payload.queuer_id.as_deref(),
        User::is_queuer,
        "Invalid queuer ID",
    )
    .await?;

    // An unparseable id cannot match any request; report it the same way as
    // a missing one.
    let request_id = Uuid::parse_str(&request_id).map_err(|_| {
        QueueError::InvalidState("Request not found or already accepted".to_string())
    })?;

    let job_id = state.request_repository.accept(request_id, queuer.id).await?;

    info!("Queuer {} accepted request {}", queuer.id, job_id);

    Ok(Json(json!({
        "message": "Request accepted",
        "job_id": job_id,
    })))
}

/// Complete an accepted queue request
pub async fn complete_request(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> QueueResult<impl IntoResponse> {
    let request_id = Uuid::parse_str(&request_id)
        .map_err(|_| QueueError::InvalidState("Request not found or not accepted".to_string()))?;

    state.request_repository.complete(request_id).await?;

    Ok(Json(json!({
        "message": "Queue job completed successfully",
    })))
}

/// Resolve an actor id to a user holding the required role
///
/// A malformed id, an unknown id, and a user with the wrong role all fail
/// with the same invalid-actor message.
async fn resolve_actor(
    state: &AppState,
    actor_id: Option<&str>,
    has_role: fn(&User) -> bool,
    error_message: &str,
) -> QueueResult<User> {
    let actor_id = actor_id
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| QueueError::InvalidActor(error_message.to_string()))?;

    state
        .user_repository
        .find_by_id(actor_id)
        .await?
        .filter(has_role)
        .ok_or_else(|| QueueError::InvalidActor(error_message.to_string()))
}
