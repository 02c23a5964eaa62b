//! User domain
//!
//! This module provides domain types and traits for user accounts,
//! including user entities, validation, and repository traits.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserCredentials, UserDraft, UserEdit, UserId};
pub use repository::UserRepository;
pub use validation::{
    parse_positive_id, validate_email, validate_password, validate_username, UserValidationError,
};
