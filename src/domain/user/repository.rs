//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{User, UserDraft, UserEdit, UserId};
use crate::domain::DomainError;

/// Repository trait for user storage
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// List every user, ordered by id
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Count users
    async fn count(&self) -> Result<usize, DomainError>;

    /// Get a user by username
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Get a user by email (for login)
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Check whether the username or the email is already taken
    async fn username_or_email_exists(
        &self,
        username: &str,
        email: &str,
    ) -> Result<bool, DomainError>;

    /// Insert a new user and return the stored row
    async fn create(&self, draft: UserDraft) -> Result<User, DomainError>;

    /// Replace the editable fields of an existing user
    async fn update(&self, id: UserId, edit: &UserEdit) -> Result<User, DomainError>;
}
