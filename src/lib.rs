//! User Interests API
//!
//! REST backend for user accounts and the interests attached to them:
//! - Signup and login with Argon2 password hashing
//! - Profile lookup, listing and full-record edits
//! - Query-string filtering of listed users and interests
//! - PostgreSQL or in-memory storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use config::StorageBackend;
use domain::{DomainError, InterestId};
use infrastructure::{
    interest::{InMemoryUserInterestRepository, PostgresUserInterestRepository, UserInterestService},
    storage::{connect_pool, PostgresConfig},
    user::{Argon2Hasher, InMemoryUserRepository, PostgresUserRepository, UserService},
};

/// Create application state for the configured storage backend
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let state = match config.database.backend {
        StorageBackend::Postgres => create_postgres_app_state(config).await?,
        StorageBackend::Memory => create_in_memory_app_state(config)?,
    };

    Ok(state)
}

/// Create application state backed by PostgreSQL
pub async fn create_postgres_app_state(config: &AppConfig) -> Result<AppState, DomainError> {
    info!("Using PostgreSQL storage backend");

    let hasher = Argon2Hasher::from_config(&config.security.password_hash)?;
    let pool = connect_pool(&PostgresConfig::from(&config.database)).await?;

    let user_service = UserService::new(
        Arc::new(PostgresUserRepository::new(pool.clone())),
        Arc::new(hasher),
    );
    let interest_service =
        UserInterestService::new(Arc::new(PostgresUserInterestRepository::new(pool)))
            .with_allow_duplicates(config.interests.allow_duplicates);

    Ok(AppState::new(
        Arc::new(user_service),
        Arc::new(interest_service),
    ))
}

/// Create application state backed by in-memory repositories
///
/// The interest catalogue comes from `database.seed_interests`.
pub fn create_in_memory_app_state(config: &AppConfig) -> Result<AppState, DomainError> {
    info!("Using in-memory storage backend");

    let hasher = Argon2Hasher::from_config(&config.security.password_hash)?;
    let catalogue = seed_catalogue(config)?;

    let users = Arc::new(InMemoryUserRepository::new());
    let interests = InMemoryUserInterestRepository::new(Arc::clone(&users), catalogue);

    let user_service = UserService::new(users, Arc::new(hasher));
    let interest_service = UserInterestService::new(Arc::new(interests))
        .with_allow_duplicates(config.interests.allow_duplicates);

    Ok(AppState::new(
        Arc::new(user_service),
        Arc::new(interest_service),
    ))
}

fn seed_catalogue(config: &AppConfig) -> Result<Vec<(InterestId, String)>, DomainError> {
    config
        .database
        .seed_interests
        .iter()
        .map(|seed| {
            InterestId::new(seed.id)
                .map(|id| (id, seed.name.clone()))
                .map_err(|e| {
                    DomainError::configuration(format!("Invalid seed interest: {}", e))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeedInterest;

    #[test]
    fn test_seed_catalogue_rejects_invalid_ids() {
        let mut config = AppConfig::default();
        config.database.seed_interests = vec![SeedInterest {
            id: 0,
            name: "Nothing".to_string(),
        }];

        let result = seed_catalogue(&config);
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_memory_backend_state() {
        let mut config = AppConfig::default();
        config.database.backend = StorageBackend::Memory;

        let state = create_app_state_with_config(&config).await.unwrap();
        assert_eq!(state.user_service.count().await.unwrap(), 0);
    }
}
