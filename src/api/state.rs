//! Application state for shared services

use std::sync::Arc;

use crate::domain::interest::{InterestId, UserInterestRepository};
use crate::domain::user::{UserCredentials, UserEdit, UserId, UserRepository};
use crate::domain::{DomainError, RecordFilter, User, UserInterest, UserInterestLink};
use crate::infrastructure::interest::UserInterestService;
use crate::infrastructure::user::{PasswordHasher, SignupRequest, UserService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub interest_service: Arc<dyn UserInterestServiceTrait>,
}

impl AppState {
    pub fn new(
        user_service: Arc<dyn UserServiceTrait>,
        interest_service: Arc<dyn UserInterestServiceTrait>,
    ) -> Self {
        Self {
            user_service,
            interest_service,
        }
    }
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn list(&self, filter: &RecordFilter) -> Result<Vec<User>, DomainError>;
    async fn get_by_username(&self, username: &str) -> Result<User, DomainError>;
    async fn signup(&self, request: SignupRequest) -> Result<User, DomainError>;
    async fn login(&self, email: &str, password: &str) -> Result<UserCredentials, DomainError>;
    async fn edit(&self, id: UserId, edit: UserEdit) -> Result<User, DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
}

/// Trait for user interest service operations
#[async_trait::async_trait]
pub trait UserInterestServiceTrait: Send + Sync {
    async fn list(
        &self,
        user_id: UserId,
        filter: &RecordFilter,
    ) -> Result<Vec<UserInterest>, DomainError>;
    async fn get(
        &self,
        user_id: UserId,
        interest_id: InterestId,
    ) -> Result<UserInterest, DomainError>;
    async fn add(
        &self,
        user_id: UserId,
        interest_id: InterestId,
    ) -> Result<UserInterestLink, DomainError>;
    async fn remove(
        &self,
        user_id: UserId,
        interest_id: InterestId,
    ) -> Result<UserInterestLink, DomainError>;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl<R, H> UserServiceTrait for UserService<R, H>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn list(&self, filter: &RecordFilter) -> Result<Vec<User>, DomainError> {
        UserService::list(self, filter).await
    }

    async fn get_by_username(&self, username: &str) -> Result<User, DomainError> {
        UserService::get_by_username(self, username).await
    }

    async fn signup(&self, request: SignupRequest) -> Result<User, DomainError> {
        UserService::signup(self, request).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<UserCredentials, DomainError> {
        UserService::login(self, email, password).await
    }

    async fn edit(&self, id: UserId, edit: UserEdit) -> Result<User, DomainError> {
        UserService::edit(self, id, edit).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        UserService::count(self).await
    }
}

#[async_trait::async_trait]
impl<R: UserInterestRepository + 'static> UserInterestServiceTrait for UserInterestService<R> {
    async fn list(
        &self,
        user_id: UserId,
        filter: &RecordFilter,
    ) -> Result<Vec<UserInterest>, DomainError> {
        UserInterestService::list(self, user_id, filter).await
    }

    async fn get(
        &self,
        user_id: UserId,
        interest_id: InterestId,
    ) -> Result<UserInterest, DomainError> {
        UserInterestService::get(self, user_id, interest_id).await
    }

    async fn add(
        &self,
        user_id: UserId,
        interest_id: InterestId,
    ) -> Result<UserInterestLink, DomainError> {
        UserInterestService::add(self, user_id, interest_id).await
    }

    async fn remove(
        &self,
        user_id: UserId,
        interest_id: InterestId,
    ) -> Result<UserInterestLink, DomainError> {
        UserInterestService::remove(self, user_id, interest_id).await
    }
}
