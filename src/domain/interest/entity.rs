//! User interest entities

use serde::{Deserialize, Serialize};

use crate::domain::filter::{FieldValue, Filterable};
use crate::domain::user::{UserId, UserValidationError, parse_positive_id};

/// Interest identifier - positive integer owned by the interests catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct InterestId(i32);

impl InterestId {
    pub fn new(id: i32) -> Result<Self, UserValidationError> {
        if id <= 0 {
            return Err(UserValidationError::InvalidId(id.to_string()));
        }
        Ok(Self(id))
    }

    /// Parse an InterestId from a path segment
    pub fn parse(raw: &str) -> Result<Self, UserValidationError> {
        parse_positive_id(raw).map(Self)
    }

    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for InterestId {
    type Error = UserValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<InterestId> for i32 {
    fn from(id: InterestId) -> Self {
        id.0
    }
}

impl std::fmt::Display for InterestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw association row as stored in `users_interests`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserInterestLink {
    pub users_id: UserId,
    pub interests_id: InterestId,
    pub added: bool,
}

impl UserInterestLink {
    /// A freshly attached interest
    pub fn added(users_id: UserId, interests_id: InterestId) -> Self {
        Self {
            users_id,
            interests_id,
            added: true,
        }
    }
}

/// Association row joined with the interest's name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInterest {
    pub users_id: UserId,
    pub interests_id: InterestId,
    pub added: bool,
    pub name: String,
}

impl UserInterest {
    pub fn from_link(link: UserInterestLink, name: impl Into<String>) -> Self {
        Self {
            users_id: link.users_id,
            interests_id: link.interests_id,
            added: link.added,
            name: name.into(),
        }
    }
}

impl Filterable for UserInterest {
    const FILTER_FIELDS: &'static [&'static str] = &["users_id", "interests_id", "added", "name"];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name {
            "users_id" => FieldValue::Integer(i64::from(self.users_id.as_i32())),
            "interests_id" => FieldValue::Integer(i64::from(self.interests_id.as_i32())),
            "added" => FieldValue::Flag(self.added),
            "name" => FieldValue::Text(Some(&self.name)),
            _ => return None,
        };

        Some(value)
    }
}
