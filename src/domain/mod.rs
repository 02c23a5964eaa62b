//! Domain layer - Core business logic and entities

pub mod error;
pub mod filter;
pub mod interest;
pub mod user;

pub use error::DomainError;
pub use filter::{FieldValue, Filterable, RecordFilter};
pub use interest::{InterestId, UserInterest, UserInterestLink, UserInterestRepository};
pub use user::{User, UserCredentials, UserDraft, UserEdit, UserId, UserRepository};
