//! User repository for database operations

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::error::{QueueError, QueueResult};
use crate::models::{NewUser, Role, User};

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a new user with a freshly generated id and the default
    /// rating of 5.0
    ///
    /// Email uniqueness is enforced by the database constraint, not a
    /// pre-read, so two racing registrations cannot both succeed.
    pub async fn create(&self, new_user: &NewUser) -> QueueResult<User> {
        info!("Registering new user: {}", new_user.email);

        let row = sqlx::query(
            r#"
            INSERT INTO users (id, name, email, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, role, rating, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(new_user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                QueueError::Conflict("Email already registered".to_string())
            }
            _ => QueueError::Database(e),
        })?;

        row_to_user(&row)
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: Uuid) -> QueueResult<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, role, rating, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }
}

/// Map a database row to a User entity
fn row_to_user(row: &PgRow) -> QueueResult<User> {
    let role: String = row.get("role");
    let role = Role::try_from(role.as_str())
        .map_err(|e| QueueError::Database(sqlx::Error::Decode(Box::new(e))))?;

    Ok(User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        role,
        rating: row.get("rating"),
        created_at: row.get("created_at"),
    })
}
