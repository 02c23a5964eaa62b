//! User entity and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::validation::{parse_positive_id, UserValidationError};
use crate::domain::filter::{FieldValue, Filterable};

/// User identifier - database-assigned positive integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct UserId(i32);

impl UserId {
    /// Create a new UserId after validation
    pub fn new(id: i32) -> Result<Self, UserValidationError> {
        if id <= 0 {
            return Err(UserValidationError::InvalidId(id.to_string()));
        }
        Ok(Self(id))
    }

    /// Parse a UserId from a path segment
    pub fn parse(raw: &str) -> Result<Self, UserValidationError> {
        parse_positive_id(raw).map(Self)
    }

    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for i32 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user row about to be inserted, password already hashed
///
/// New accounts always start with notifications disabled.
#[derive(Clone)]
pub struct UserDraft {
    pub username: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: String,
    pub profile_img: Option<String>,
    pub banner_img: Option<String>,
    pub dob: Option<NaiveDate>,
    pub bio: Option<String>,
    pub profile_name: Option<String>,
    pub password_hash: String,
}

impl std::fmt::Debug for UserDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserDraft")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Full replacement of a user's editable fields
///
/// Email, date of birth and password are not part of an edit and are never
/// changed by one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEdit {
    pub username: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub profile_img: Option<String>,
    pub banner_img: Option<String>,
    pub bio: Option<String>,
    pub profile_name: Option<String>,
    pub notifications: bool,
}

/// Minimal projection returned by a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    pub id: UserId,
    pub email: String,
}

/// User account
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: String,
    firstname: Option<String>,
    lastname: Option<String>,
    email: String,
    profile_img: Option<String>,
    banner_img: Option<String>,
    dob: Option<NaiveDate>,
    bio: Option<String>,
    profile_name: Option<String>,
    notifications: bool,
    /// Argon2 PHC string; only the credential check reads it
    password_hash: String,
}

impl User {
    /// Materialize a stored user from a draft and its assigned id
    pub fn from_draft(id: UserId, draft: UserDraft) -> Self {
        Self {
            id,
            username: draft.username,
            firstname: draft.firstname,
            lastname: draft.lastname,
            email: draft.email,
            profile_img: draft.profile_img,
            banner_img: draft.banner_img,
            dob: draft.dob,
            bio: draft.bio,
            profile_name: draft.profile_name,
            notifications: false,
            password_hash: draft.password_hash,
        }
    }

    /// Restore a user from persisted columns
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: UserId,
        username: String,
        firstname: Option<String>,
        lastname: Option<String>,
        email: String,
        profile_img: Option<String>,
        banner_img: Option<String>,
        dob: Option<NaiveDate>,
        bio: Option<String>,
        profile_name: Option<String>,
        notifications: bool,
        password_hash: String,
    ) -> Self {
        Self {
            id,
            username,
            firstname,
            lastname,
            email,
            profile_img,
            banner_img,
            dob,
            bio,
            profile_name,
            notifications,
            password_hash,
        }
    }

    /// Replace every editable field with the values in `edit`
    pub fn apply_edit(&mut self, edit: &UserEdit) {
        self.username = edit.username.clone();
        self.firstname = edit.firstname.clone();
        self.lastname = edit.lastname.clone();
        self.profile_img = edit.profile_img.clone();
        self.banner_img = edit.banner_img.clone();
        self.bio = edit.bio.clone();
        self.profile_name = edit.profile_name.clone();
        self.notifications = edit.notifications;
    }

    pub fn credentials(&self) -> UserCredentials {
        UserCredentials {
            id: self.id,
            email: self.email.clone(),
        }
    }

    // Getters

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn firstname(&self) -> Option<&str> {
        self.firstname.as_deref()
    }

    pub fn lastname(&self) -> Option<&str> {
        self.lastname.as_deref()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn profile_img(&self) -> Option<&str> {
        self.profile_img.as_deref()
    }

    pub fn banner_img(&self) -> Option<&str> {
        self.banner_img.as_deref()
    }

    pub fn dob(&self) -> Option<NaiveDate> {
        self.dob
    }

    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    pub fn profile_name(&self) -> Option<&str> {
        self.profile_name.as_deref()
    }

    pub fn notifications(&self) -> bool {
        self.notifications
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("notifications", &self.notifications)
            .field("password_hash", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl Filterable for User {
    const FILTER_FIELDS: &'static [&'static str] = &[
        "id",
        "username",
        "firstname",
        "lastname",
        "email",
        "profile_img",
        "banner_img",
        "dob",
        "bio",
        "profile_name",
        "notifications",
    ];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name {
            "id" => FieldValue::Integer(i64::from(self.id.as_i32())),
            "username" => FieldValue::Text(Some(&self.username)),
            "firstname" => FieldValue::Text(self.firstname.as_deref()),
            "lastname" => FieldValue::Text(self.lastname.as_deref()),
            "email" => FieldValue::Text(Some(&self.email)),
            "profile_img" => FieldValue::Text(self.profile_img.as_deref()),
            "banner_img" => FieldValue::Text(self.banner_img.as_deref()),
            "dob" => FieldValue::Date(self.dob),
            "bio" => FieldValue::Text(self.bio.as_deref()),
            "profile_name" => FieldValue::Text(self.profile_name.as_deref()),
            "notifications" => FieldValue::Flag(self.notifications),
            _ => return None,
        };

        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> UserDraft {
        UserDraft {
            username: "ann".to_string(),
            firstname: Some("Ann".to_string()),
            lastname: Some("Lee".to_string()),
            email: "a@x.com".to_string(),
            profile_img: None,
            banner_img: None,
            dob: NaiveDate::from_ymd_opt(1990, 2, 3),
            bio: Some("hi".to_string()),
            profile_name: Some("annie".to_string()),
            password_hash: "$argon2id$fake".to_string(),
        }
    }

    #[test]
    fn test_user_id_validation() {
        assert!(UserId::new(1).is_ok());
        assert!(UserId::new(0).is_err());
        assert!(UserId::new(-7).is_err());
        assert_eq!(UserId::parse("12").unwrap().as_i32(), 12);
        assert!(UserId::parse("abc").is_err());
    }

    #[test]
    fn test_from_draft_defaults_notifications_off() {
        let user = User::from_draft(UserId::new(1).unwrap(), draft());

        assert_eq!(user.id().as_i32(), 1);
        assert_eq!(user.username(), "ann");
        assert!(!user.notifications());
        assert_eq!(user.dob(), NaiveDate::from_ymd_opt(1990, 2, 3));
    }

    #[test]
    fn test_apply_edit_keeps_email_dob_and_password() {
        let mut user = User::from_draft(UserId::new(1).unwrap(), draft());
        let edit = UserEdit {
            username: "ann2".to_string(),
            firstname: None,
            lastname: Some("Smith".to_string()),
            profile_img: Some("p.png".to_string()),
            banner_img: None,
            bio: None,
            profile_name: None,
            notifications: true,
        };

        user.apply_edit(&edit);

        assert_eq!(user.username(), "ann2");
        assert_eq!(user.firstname(), None);
        assert_eq!(user.lastname(), Some("Smith"));
        assert!(user.notifications());
        assert_eq!(user.email(), "a@x.com");
        assert_eq!(user.dob(), NaiveDate::from_ymd_opt(1990, 2, 3));
        assert_eq!(user.password_hash(), "$argon2id$fake");
    }

    #[test]
    fn test_apply_edit_is_idempotent() {
        let edit = UserEdit {
            username: "ann2".to_string(),
            firstname: Some("A".to_string()),
            lastname: None,
            profile_img: None,
            banner_img: None,
            bio: None,
            profile_name: None,
            notifications: true,
        };

        let mut once = User::from_draft(UserId::new(1).unwrap(), draft());
        once.apply_edit(&edit);

        let mut twice = once.clone();
        twice.apply_edit(&edit);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_debug_redacts_password_hash() {
        let user = User::from_draft(UserId::new(1).unwrap(), draft());

        let rendered = format!("{:?}", user);
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("$argon2id$fake"));

        let rendered = format!("{:?}", draft());
        assert!(!rendered.contains("$argon2id$fake"));
    }

    #[test]
    fn test_password_is_not_filterable() {
        let user = User::from_draft(UserId::new(1).unwrap(), draft());

        assert!(!User::FILTER_FIELDS.contains(&"password"));
        assert!(user.field("password").is_none());
        assert_eq!(user.field("id"), Some(FieldValue::Integer(1)));
        assert_eq!(user.field("firstname"), Some(FieldValue::Text(Some("Ann"))));
    }
}
