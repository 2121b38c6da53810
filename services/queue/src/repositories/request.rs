//! Queue request repository for database operations
//!
//! This repository exclusively owns queue request mutation. The lifecycle
//! transitions are single conditional UPDATE statements so that the status
//! guard and the write are one atomic operation against the database.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::error::{QueueError, QueueResult};
use crate::models::{NewQueueRequest, OpenRequestSummary, QueueRequest, RequestStatus};

/// Queue request repository
#[derive(Clone)]
pub struct RequestRepository {
    pool: PgPool,
}

impl RequestRepository {
    /// Create a new queue request repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new queue request in the open status
    pub async fn create(&self, new_request: &NewQueueRequest) -> QueueResult<QueueRequest> {
        info!(
            "Creating queue request for requester: {}",
            new_request.requester_id
        );

        let row = sqlx::query(
            r#"
            INSERT INTO queue_requests (id, requester_id, description, location, payment)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, requester_id, description, location, payment, status, queuer_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_request.requester_id)
        .bind(&new_request.description)
        .bind(&new_request.location)
        .bind(new_request.payment)
        .fetch_one(&self.pool)
        .await?;

        row_to_request(&row)
    }

    /// Find a queue request by ID
    pub async fn find_by_id(&self, id: Uuid) -> QueueResult<Option<QueueRequest>> {
        let row = sqlx::query(
            r#"
            SELECT id, requester_id, description, location, payment, status, queuer_id, created_at
            FROM queue_requests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(row_to_request(&row)?)),
            None => Ok(None),
        }
    }

    /// List all requests still waiting for a queuer
    pub async fn list_open(&self) -> QueueResult<Vec<OpenRequestSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT id, description, location, payment, created_at
            FROM queue_requests
            WHERE status = 'open'
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let summaries = rows
            .into_iter()
            .map(|row| OpenRequestSummary {
                id: row.get("id"),
                description: row.get("description"),
                location: row.get("location"),
                payment: row.get("payment"),
                created_at: row.get("created_at"),
            })
            .collect();

        Ok(summaries)
    }

    /// Atomically claim an open request for the given queuer
    ///
    /// The status guard and the assignment are one conditional UPDATE, so
    /// of two racing queuers exactly one observes the open status and wins;
    /// the loser sees zero affected rows. A missing request and a request
    /// past the open status are indistinguishable to the caller.
    pub async fn accept(&self, request_id: Uuid, queuer_id: Uuid) -> QueueResult<Uuid> {
        let result = sqlx::query(
            r#"
            UPDATE queue_requests
            SET status = 'accepted', queuer_id = $1
            WHERE id = $2 AND status = 'open'
            "#,
        )
        .bind(queuer_id)
        .bind(request_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(QueueError::InvalidState(
                "Request not found or already accepted".to_string(),
            ));
        }

        info!("Request {} accepted by queuer {}", request_id, queuer_id);
        Ok(request_id)
    }

    /// Mark an accepted request as completed
    ///
    /// Completed is terminal; the conditional UPDATE rejects requests that
    /// are still open or already completed.
    pub async fn complete(&self, request_id: Uuid) -> QueueResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE queue_requests
            SET status = 'completed'
            WHERE id = $1 AND status = 'accepted'
            "#,
        )
        .bind(request_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(QueueError::InvalidState(
                "Request not found or not accepted".to_string(),
            ));
        }

        info!("Request {} completed", request_id);
        Ok(())
    }
}

/// Map a database row to a QueueRequest entity
fn row_to_request(row: &PgRow) -> QueueResult<QueueRequest> {
    let status: String = row.get("status");
    let status = RequestStatus::try_from(status.as_str())
        .map_err(|e| QueueError::Database(sqlx::Error::Decode(Box::new(e))))?;

    Ok(QueueRequest {
        id: row.get("id"),
        requester_id: row.get("requester_id"),
        description: row.get("description"),
        location: row.get("location"),
        payment: row.get("payment"),
        status,
        queuer_id: row.get("queuer_id"),
        created_at: row.get("created_at"),
    })
}
