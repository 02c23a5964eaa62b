//! PostgreSQL user repository implementation

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::user::{User, UserDraft, UserEdit, UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::storage::map_sqlx_error;

const USER_COLUMNS: &str = "id, username, firstname, lastname, email, profile_img, banner_img, \
                            dob, bio, profile_name, notifications, password";

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_single(
        &self,
        column: &str,
        value: &str,
        context: &str,
    ) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE {} = $1", USER_COLUMNS, column);

        let rows = sqlx::query(&query)
            .bind(value)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(context, e))?;

        match rows.as_slice() {
            [] => Ok(None),
            [row] => Ok(Some(row_to_user(row)?)),
            _ => Err(DomainError::internal(format!(
                "Expected at most one user with {} '{}', found {}",
                column,
                value,
                rows.len()
            ))),
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let query = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to list users", e))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to count users", e))?;

        Ok(count as usize)
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.fetch_single("username", username, "Failed to get user by username")
            .await
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.fetch_single("email", email, "Failed to get user by email")
            .await
    }

    async fn username_or_email_exists(
        &self,
        username: &str,
        email: &str,
    ) -> Result<bool, DomainError> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 OR email = $2)",
        )
        .bind(username)
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to check existing user", e))
    }

    async fn create(&self, draft: UserDraft) -> Result<User, DomainError> {
        let query = format!(
            r#"
            INSERT INTO users (username, firstname, lastname, email, profile_img, banner_img,
                               dob, bio, profile_name, notifications, password)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, false, $10)
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(&draft.username)
            .bind(&draft.firstname)
            .bind(&draft.lastname)
            .bind(&draft.email)
            .bind(&draft.profile_img)
            .bind(&draft.banner_img)
            .bind(draft.dob)
            .bind(&draft.bio)
            .bind(&draft.profile_name)
            .bind(&draft.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to create user", e))?;

        row_to_user(&row)
    }

    async fn update(&self, id: UserId, edit: &UserEdit) -> Result<User, DomainError> {
        let query = format!(
            r#"
            UPDATE users
            SET username = $2, firstname = $3, lastname = $4, profile_img = $5,
                banner_img = $6, bio = $7, profile_name = $8, notifications = $9
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(id.as_i32())
            .bind(&edit.username)
            .bind(&edit.firstname)
            .bind(&edit.lastname)
            .bind(&edit.profile_img)
            .bind(&edit.banner_img)
            .bind(&edit.bio)
            .bind(&edit.profile_name)
            .bind(edit.notifications)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to update user", e))?;

        match row {
            Some(row) => row_to_user(&row),
            None => Err(DomainError::not_found(format!("User '{}' not found", id))),
        }
    }
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let column_error = |e: sqlx::Error| DomainError::storage(format!("Invalid user row: {}", e));

    let id: i32 = row.try_get("id").map_err(column_error)?;
    let user_id = UserId::new(id)
        .map_err(|e| DomainError::storage(format!("Invalid user ID in database: {}", e)))?;

    let dob: Option<NaiveDate> = row.try_get("dob").map_err(column_error)?;
    let notifications: Option<bool> = row.try_get("notifications").map_err(column_error)?;

    Ok(User::restore(
        user_id,
        row.try_get("username").map_err(column_error)?,
        row.try_get("firstname").map_err(column_error)?,
        row.try_get("lastname").map_err(column_error)?,
        row.try_get("email").map_err(column_error)?,
        row.try_get("profile_img").map_err(column_error)?,
        row.try_get("banner_img").map_err(column_error)?,
        dob,
        row.try_get("bio").map_err(column_error)?,
        row.try_get("profile_name").map_err(column_error)?,
        notifications.unwrap_or(false),
        row.try_get("password").map_err(column_error)?,
    ))
}
