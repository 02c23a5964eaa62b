//! In-memory user interest repository implementation

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::interest::{InterestId, UserInterest, UserInterestLink, UserInterestRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;
use crate::infrastructure::user::InMemoryUserRepository;

/// In-memory implementation of UserInterestRepository
///
/// Holds a fixed interest catalogue and checks user existence against the
/// companion in-memory user repository, mirroring the foreign keys of the
/// `users_interests` table. The association itself carries no unique key.
#[derive(Debug, Clone)]
pub struct InMemoryUserInterestRepository {
    users: Arc<InMemoryUserRepository>,
    catalogue: Arc<BTreeMap<InterestId, String>>,
    links: Arc<RwLock<Vec<UserInterestLink>>>,
}

impl InMemoryUserInterestRepository {
    /// Create a repository over the given interest catalogue
    pub fn new(
        users: Arc<InMemoryUserRepository>,
        catalogue: impl IntoIterator<Item = (InterestId, String)>,
    ) -> Self {
        Self {
            users,
            catalogue: Arc::new(catalogue.into_iter().collect()),
            links: Arc::new(RwLock::new(Vec::new())),
        }
    }

    async fn check_both_sides(
        &self,
        user_id: UserId,
        interest_id: InterestId,
    ) -> Result<(), DomainError> {
        if !self.users.contains(user_id).await {
            return Err(DomainError::not_found(format!("User '{}' not found", user_id)));
        }

        if !self.catalogue.contains_key(&interest_id) {
            return Err(DomainError::not_found(format!(
                "Interest '{}' not found",
                interest_id
            )));
        }

        Ok(())
    }

    fn join(&self, link: &UserInterestLink) -> Option<UserInterest> {
        self.catalogue
            .get(&link.interests_id)
            .map(|name| UserInterest::from_link(*link, name.as_str()))
    }
}

#[async_trait]
impl UserInterestRepository for InMemoryUserInterestRepository {
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<UserInterest>, DomainError> {
        let links = self.links.read().await;

        Ok(links
            .iter()
            .filter(|link| link.users_id == user_id)
            .filter_map(|link| self.join(link))
            .collect())
    }

    async fn get_for_user(
        &self,
        user_id: UserId,
        interest_id: InterestId,
    ) -> Result<Option<UserInterest>, DomainError> {
        let links = self.links.read().await;

        Ok(links
            .iter()
            .find(|link| link.users_id == user_id && link.interests_id == interest_id)
            .and_then(|link| self.join(link)))
    }

    async fn add(
        &self,
        user_id: UserId,
        interest_id: InterestId,
    ) -> Result<UserInterestLink, DomainError> {
        self.check_both_sides(user_id, interest_id).await?;

        let link = UserInterestLink::added(user_id, interest_id);
        self.links.write().await.push(link);

        Ok(link)
    }

    async fn add_unique(
        &self,
        user_id: UserId,
        interest_id: InterestId,
    ) -> Result<Option<UserInterestLink>, DomainError> {
        self.check_both_sides(user_id, interest_id).await?;

        let mut links = self.links.write().await;

        if links
            .iter()
            .any(|link| link.users_id == user_id && link.interests_id == interest_id)
        {
            return Ok(None);
        }

        let link = UserInterestLink::added(user_id, interest_id);
        links.push(link);

        Ok(Some(link))
    }

    async fn remove(
        &self,
        user_id: UserId,
        interest_id: InterestId,
    ) -> Result<Option<UserInterestLink>, DomainError> {
        let mut links = self.links.write().await;

        let removed = links
            .iter()
            .copied()
            .find(|link| link.users_id == user_id && link.interests_id == interest_id);

        if removed.is_some() {
            links.retain(|link| !(link.users_id == user_id && link.interests_id == interest_id));
        }

        Ok(removed)
    }
}
