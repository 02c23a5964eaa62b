//! User interest repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{InterestId, UserInterest, UserInterestLink};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Repository trait for the user/interest association
#[async_trait]
pub trait UserInterestRepository: Send + Sync + Debug {
    /// List a user's interests joined with their names
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<UserInterest>, DomainError>;

    /// Point lookup of one interest attached to a user
    async fn get_for_user(
        &self,
        user_id: UserId,
        interest_id: InterestId,
    ) -> Result<Option<UserInterest>, DomainError>;

    /// Attach an interest to a user
    ///
    /// Fails with NotFound when either side of the association is unknown.
    async fn add(
        &self,
        user_id: UserId,
        interest_id: InterestId,
    ) -> Result<UserInterestLink, DomainError>;

    /// Attach an interest to a user unless the association already exists
    ///
    /// The existence check and the insert are one atomic step; `None` means
    /// the association was already present.
    async fn add_unique(
        &self,
        user_id: UserId,
        interest_id: InterestId,
    ) -> Result<Option<UserInterestLink>, DomainError>;

    /// Detach an interest from a user, returning the removed row
    ///
    /// Every duplicate of the association is removed; `None` means nothing
    /// matched.
    async fn remove(
        &self,
        user_id: UserId,
        interest_id: InterestId,
    ) -> Result<Option<UserInterestLink>, DomainError>;
}
