//! User interest infrastructure module

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresUserInterestRepository;
pub use repository::InMemoryUserInterestRepository;
pub use service::UserInterestService;
