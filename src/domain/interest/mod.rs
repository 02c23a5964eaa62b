//! User interest domain
//!
//! Interests are categories owned elsewhere; this module only models the
//! association between a user and an interest.

mod entity;
mod repository;

pub use entity::{InterestId, UserInterest, UserInterestLink};
pub use repository::UserInterestRepository;
