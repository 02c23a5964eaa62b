//! PostgreSQL user interest repository implementation

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::interest::{InterestId, UserInterest, UserInterestLink, UserInterestRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;
use crate::infrastructure::storage::map_sqlx_error;

/// PostgreSQL implementation of UserInterestRepository
///
/// Reads join `users_interests` against the externally owned `interests`
/// table for the interest name.
#[derive(Debug, Clone)]
pub struct PostgresUserInterestRepository {
    pool: PgPool,
}

impl PostgresUserInterestRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserInterestRepository for PostgresUserInterestRepository {
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<UserInterest>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT ui.users_id, ui.interests_id, ui.added, i.name
            FROM users_interests ui
            JOIN interests i ON i.id = ui.interests_id
            WHERE ui.users_id = $1
            ORDER BY ui.interests_id
            "#,
        )
        .bind(user_id.as_i32())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to list user interests", e))?;

        rows.iter().map(row_to_interest).collect()
    }

    async fn get_for_user(
        &self,
        user_id: UserId,
        interest_id: InterestId,
    ) -> Result<Option<UserInterest>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT ui.users_id, ui.interests_id, ui.added, i.name
            FROM users_interests ui
            JOIN interests i ON i.id = ui.interests_id
            WHERE ui.users_id = $1 AND ui.interests_id = $2
            LIMIT 1
            "#,
        )
        .bind(user_id.as_i32())
        .bind(interest_id.as_i32())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to get user interest", e))?;

        row.as_ref().map(row_to_interest).transpose()
    }

    async fn add(
        &self,
        user_id: UserId,
        interest_id: InterestId,
    ) -> Result<UserInterestLink, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users_interests (users_id, interests_id, added)
            VALUES ($1, $2, true)
            RETURNING users_id, interests_id, added
            "#,
        )
        .bind(user_id.as_i32())
        .bind(interest_id.as_i32())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to add user interest", e))?;

        row_to_link(&row)
    }

    async fn add_unique(
        &self,
        user_id: UserId,
        interest_id: InterestId,
    ) -> Result<Option<UserInterestLink>, DomainError> {
        // A unique index on (users_id, interests_id) closes the gap between
        // concurrent inserts; its violation maps to Conflict.
        let row = sqlx::query(
            r#"
            INSERT INTO users_interests (users_id, interests_id, added)
            SELECT $1, $2, true
            WHERE NOT EXISTS (
                SELECT 1 FROM users_interests WHERE users_id = $1 AND interests_id = $2
            )
            RETURNING users_id, interests_id, added
            "#,
        )
        .bind(user_id.as_i32())
        .bind(interest_id.as_i32())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to add user interest", e))?;

        row.as_ref().map(row_to_link).transpose()
    }

    async fn remove(
        &self,
        user_id: UserId,
        interest_id: InterestId,
    ) -> Result<Option<UserInterestLink>, DomainError> {
        let rows = sqlx::query(
            r#"
            DELETE FROM users_interests
            WHERE users_id = $1 AND interests_id = $2
            RETURNING users_id, interests_id, added
            "#,
        )
        .bind(user_id.as_i32())
        .bind(interest_id.as_i32())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to remove user interest", e))?;

        rows.first().map(row_to_link).transpose()
    }
}

fn column_error(e: sqlx::Error) -> DomainError {
    DomainError::storage(format!("Invalid user interest row: {}", e))
}

fn row_to_link(row: &PgRow) -> Result<UserInterestLink, DomainError> {
    let users_id: i32 = row.try_get("users_id").map_err(column_error)?;
    let interests_id: i32 = row.try_get("interests_id").map_err(column_error)?;
    let added: Option<bool> = row.try_get("added").map_err(column_error)?;

    Ok(UserInterestLink {
        users_id: UserId::new(users_id)
            .map_err(|e| DomainError::storage(format!("Invalid user ID in database: {}", e)))?,
        interests_id: InterestId::new(interests_id)
            .map_err(|e| DomainError::storage(format!("Invalid interest ID in database: {}", e)))?,
        added: added.unwrap_or(false),
    })
}

fn row_to_interest(row: &PgRow) -> Result<UserInterest, DomainError> {
    let link = row_to_link(row)?;
    let name: String = row.try_get("name").map_err(column_error)?;

    Ok(UserInterest::from_link(link, name))
}
