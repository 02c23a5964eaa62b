//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{User, UserDraft, UserEdit, UserId, UserRepository};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct UserTable {
    rows: BTreeMap<UserId, User>,
    last_id: i32,
}

impl UserTable {
    fn username_taken(&self, username: &str, except: Option<UserId>) -> bool {
        self.rows
            .values()
            .any(|u| u.username() == username && Some(u.id()) != except)
    }

    fn email_taken(&self, email: &str) -> bool {
        self.rows.values().any(|u| u.email() == email)
    }
}

/// In-memory implementation of UserRepository
///
/// Enforces the same uniqueness rules as the `users` table: username and
/// email are unique, ids are assigned sequentially from 1.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a user id is present
    pub async fn contains(&self, id: UserId) -> bool {
        self.table.read().await.rows.contains_key(&id)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.table.read().await.rows.len())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|u| u.username() == username).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|u| u.email() == email).cloned())
    }

    async fn username_or_email_exists(
        &self,
        username: &str,
        email: &str,
    ) -> Result<bool, DomainError> {
        let table = self.table.read().await;
        Ok(table.username_taken(username, None) || table.email_taken(email))
    }

    async fn create(&self, draft: UserDraft) -> Result<User, DomainError> {
        let mut table = self.table.write().await;

        if table.username_taken(&draft.username, None) {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                draft.username
            )));
        }

        if table.email_taken(&draft.email) {
            return Err(DomainError::conflict(format!(
                "Email '{}' already exists",
                draft.email
            )));
        }

        let next = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| DomainError::storage("User id sequence exhausted"))?;
        let id = UserId::new(next).map_err(|e| DomainError::internal(e.to_string()))?;

        let user = User::from_draft(id, draft);
        table.last_id = next;
        table.rows.insert(id, user.clone());

        Ok(user)
    }

    async fn update(&self, id: UserId, edit: &UserEdit) -> Result<User, DomainError> {
        let mut table = self.table.write().await;

        if !table.rows.contains_key(&id) {
            return Err(DomainError::not_found(format!("User '{}' not found", id)));
        }

        if table.username_taken(&edit.username, Some(id)) {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                edit.username
            )));
        }

        let user = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        user.apply_edit(edit);

        Ok(user.clone())
    }
}
