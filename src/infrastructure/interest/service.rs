//! User interest service

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::interest::{InterestId, UserInterest, UserInterestLink, UserInterestRepository};
use crate::domain::user::UserId;
use crate::domain::{DomainError, RecordFilter};

/// Service managing which interests are attached to which users
#[derive(Debug)]
pub struct UserInterestService<R: UserInterestRepository> {
    repository: Arc<R>,
    allow_duplicates: bool,
}

impl<R: UserInterestRepository> UserInterestService<R> {
    /// Create a new service; duplicate associations are rejected
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            allow_duplicates: false,
        }
    }

    /// Permit attaching the same interest to a user more than once
    pub fn with_allow_duplicates(mut self, allow: bool) -> Self {
        self.allow_duplicates = allow;
        self
    }

    /// List a user's interests matching a filter
    pub async fn list(
        &self,
        user_id: UserId,
        filter: &RecordFilter,
    ) -> Result<Vec<UserInterest>, DomainError> {
        let interests = filter.apply(self.repository.list_for_user(user_id).await?);

        debug!(user_id = %user_id, matched = interests.len(), "Listed user interests");

        Ok(interests)
    }

    /// Get one interest attached to a user
    pub async fn get(
        &self,
        user_id: UserId,
        interest_id: InterestId,
    ) -> Result<UserInterest, DomainError> {
        self.repository
            .get_for_user(user_id, interest_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "Interest '{}' not found for user '{}'",
                    interest_id, user_id
                ))
            })
    }

    /// Attach an interest to a user
    pub async fn add(
        &self,
        user_id: UserId,
        interest_id: InterestId,
    ) -> Result<UserInterestLink, DomainError> {
        let link = if self.allow_duplicates {
            self.repository.add(user_id, interest_id).await?
        } else {
            self.repository
                .add_unique(user_id, interest_id)
                .await?
                .ok_or_else(|| {
                    DomainError::conflict(format!(
                        "Interest '{}' is already attached to user '{}'",
                        interest_id, user_id
                    ))
                })?
        };

        info!(user_id = %user_id, interest_id = %interest_id, "Interest added");

        Ok(link)
    }

    /// Detach an interest from a user
    ///
    /// Fails with `NotFound` when there was nothing to delete.
    pub async fn remove(
        &self,
        user_id: UserId,
        interest_id: InterestId,
    ) -> Result<UserInterestLink, DomainError> {
        let removed = self
            .repository
            .remove(user_id, interest_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "Interest '{}' is not attached to user '{}'",
                    interest_id, user_id
                ))
            })?;

        info!(user_id = %user_id, interest_id = %interest_id, "Interest removed");

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{UserDraft, UserRepository};
    use crate::infrastructure::interest::InMemoryUserInterestRepository;
    use crate::infrastructure::user::InMemoryUserRepository;
    use std::collections::HashMap;

    async fn create_service(
        allow_duplicates: bool,
    ) -> (UserInterestService<InMemoryUserInterestRepository>, UserId) {
        let users = Arc::new(InMemoryUserRepository::new());
        let user = users
            .create(UserDraft {
                username: "ann".to_string(),
                firstname: None,
                lastname: None,
                email: "a@x.com".to_string(),
                profile_img: None,
                banner_img: None,
                dob: None,
                bio: None,
                profile_name: None,
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();

        let repository = InMemoryUserInterestRepository::new(
            users,
            vec![
                (interest(1), "Music".to_string()),
                (interest(2), "Hiking".to_string()),
                (interest(3), "Cooking".to_string()),
            ],
        );

        let service =
            UserInterestService::new(Arc::new(repository)).with_allow_duplicates(allow_duplicates);

        (service, user.id())
    }

    fn interest(id: i32) -> InterestId {
        InterestId::new(id).unwrap()
    }

    #[tokio::test]
    async fn test_add_and_get() {
        let (service, user) = create_service(false).await;

        let link = service.add(user, interest(3)).await.unwrap();
        assert_eq!(link, UserInterestLink::added(user, interest(3)));

        let found = service.get(user, interest(3)).await.unwrap();
        assert_eq!(found.name, "Cooking");
        assert!(found.added);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let (service, user) = create_service(false).await;

        let result = service.get(user, interest(1)).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_duplicate_rejected_by_default() {
        let (service, user) = create_service(false).await;
        service.add(user, interest(1)).await.unwrap();

        let result = service.add(user, interest(1)).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_attach_once() {
        let (service, user) = create_service(false).await;
        let service = Arc::new(service);

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.add(user, interest(2)).await })
            })
            .collect();

        let mut added = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => added += 1,
                Err(DomainError::Conflict { .. }) => conflicts += 1,
                Err(e) => panic!("unexpected error: {}", e),
            }
        }

        assert_eq!(added, 1);
        assert_eq!(conflicts, 15);
        let listed = service.list(user, &RecordFilter::empty()).await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_allowed_when_configured() {
        let (service, user) = create_service(true).await;
        service.add(user, interest(1)).await.unwrap();
        service.add(user, interest(1)).await.unwrap();

        let listed = service.list(user, &RecordFilter::empty()).await.unwrap();
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn test_add_unknown_interest() {
        let (service, user) = create_service(false).await;

        let result = service.add(user, interest(42)).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_with_filter() {
        let (service, user) = create_service(false).await;
        service.add(user, interest(1)).await.unwrap();
        service.add(user, interest(2)).await.unwrap();

        let query: HashMap<String, String> =
            [("name".to_string(), "HIKING".to_string())].into_iter().collect();
        let filter = RecordFilter::for_records::<UserInterest, _>(&query).unwrap();

        let listed = service.list(user, &filter).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].interests_id, interest(2));
    }

    #[tokio::test]
    async fn test_remove() {
        let (service, user) = create_service(false).await;
        service.add(user, interest(2)).await.unwrap();

        let removed = service.remove(user, interest(2)).await.unwrap();
        assert_eq!(removed.interests_id, interest(2));

        let again = service.remove(user, interest(2)).await;
        assert!(matches!(again, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_remove_nothing_attached() {
        let (service, _) = create_service(false).await;

        let result = service
            .remove(UserId::new(5).unwrap(), interest(3))
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
