//! User service for signup, login and profile management

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::domain::user::{
    validate_email, validate_password, validate_username, User, UserCredentials, UserDraft,
    UserEdit, UserId, UserRepository,
};
use crate::domain::{DomainError, RecordFilter};

use super::password::PasswordHasher;

/// Request for creating a new account
#[derive(Clone)]
pub struct SignupRequest {
    pub username: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: String,
    pub profile_img: Option<String>,
    pub banner_img: Option<String>,
    pub dob: Option<NaiveDate>,
    pub bio: Option<String>,
    pub profile_name: Option<String>,
    pub password: String,
}

impl std::fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// User service for account management and authentication
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: PasswordHasher + 'static> UserService<R, H> {
    /// Create a new user service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// List users matching a filter
    pub async fn list(&self, filter: &RecordFilter) -> Result<Vec<User>, DomainError> {
        let users = self.repository.list().await?;
        let total = users.len();
        let users = filter.apply(users);

        debug!(total = total, matched = users.len(), "Listed users");

        Ok(users)
    }

    /// Get a user by username
    pub async fn get_by_username(&self, username: &str) -> Result<User, DomainError> {
        self.repository
            .get_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", username)))
    }

    /// Count users
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }

    /// Create a new account
    ///
    /// Fails with `Conflict` when the username or the email is already taken.
    pub async fn signup(&self, request: SignupRequest) -> Result<User, DomainError> {
        validate_username(&request.username)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        validate_email(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if self
            .repository
            .username_or_email_exists(&request.username, &request.email)
            .await?
        {
            return Err(DomainError::conflict(format!(
                "A user with username '{}' or email '{}' already exists",
                request.username, request.email
            )));
        }

        let password_hash = self.hash_password(request.password).await?;

        let user = self
            .repository
            .create(UserDraft {
                username: request.username,
                firstname: request.firstname,
                lastname: request.lastname,
                email: request.email,
                profile_img: request.profile_img,
                banner_img: request.banner_img,
                dob: request.dob,
                bio: request.bio,
                profile_name: request.profile_name,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id(), username = %user.username(), "User signed up");

        Ok(user)
    }

    /// Authenticate by email and password
    ///
    /// Unknown emails and wrong passwords both fail with `Unauthorized`.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserCredentials, DomainError> {
        let user = match self.repository.get_by_email(email).await? {
            Some(u) => u,
            None => {
                debug!("Login failed: unknown email");
                return Err(DomainError::unauthorized("User Not Found"));
            }
        };

        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        let stored_hash = user.password_hash().to_string();

        let verified = tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash))
            .await
            .map_err(|e| DomainError::internal(format!("Password verification task failed: {}", e)))?;

        if !verified {
            debug!(user_id = %user.id(), "Login failed: password mismatch");
            return Err(DomainError::unauthorized("User Not Found"));
        }

        Ok(user.credentials())
    }

    /// Replace the editable fields of a user
    pub async fn edit(&self, id: UserId, edit: UserEdit) -> Result<User, DomainError> {
        validate_username(&edit.username).map_err(|e| DomainError::validation(e.to_string()))?;

        let user = self.repository.update(id, &edit).await?;

        debug!(user_id = %id, "User edited");

        Ok(user)
    }

    async fn hash_password(&self, password: String) -> Result<String, DomainError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::internal(format!("Password hashing task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PasswordHashConfig;
    use crate::infrastructure::user::password::MockPasswordHasher;
    use crate::infrastructure::user::{Argon2Hasher, InMemoryUserRepository};
    use std::collections::HashMap;

    fn cheap_hasher() -> Argon2Hasher {
        Argon2Hasher::from_config(&PasswordHashConfig {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    fn create_service() -> UserService<InMemoryUserRepository, Argon2Hasher> {
        UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(cheap_hasher()),
        )
    }

    fn signup_request(username: &str, email: &str) -> SignupRequest {
        SignupRequest {
            username: username.to_string(),
            firstname: Some("John".to_string()),
            lastname: Some("Doe".to_string()),
            email: email.to_string(),
            profile_img: None,
            banner_img: None,
            dob: NaiveDate::from_ymd_opt(1990, 1, 1),
            bio: None,
            profile_name: None,
            password: "pw123".to_string(),
        }
    }

    fn edit(username: &str) -> UserEdit {
        UserEdit {
            username: username.to_string(),
            firstname: Some("Jo".to_string()),
            lastname: None,
            profile_img: Some("me.png".to_string()),
            banner_img: None,
            bio: Some("hello".to_string()),
            profile_name: None,
            notifications: true,
        }
    }

    #[tokio::test]
    async fn test_signup() {
        let service = create_service();

        let user = service.signup(signup_request("ann", "a@x.com")).await.unwrap();

        assert_eq!(user.id().as_i32(), 1);
        assert_eq!(user.username(), "ann");
        assert!(!user.notifications());
        assert_ne!(user.password_hash(), "pw123");
        assert!(cheap_hasher().verify("pw123", user.password_hash()));
    }

    #[tokio::test]
    async fn test_signup_duplicate_username_or_email() {
        let service = create_service();
        service.signup(signup_request("ann", "a@x.com")).await.unwrap();

        let same = service.signup(signup_request("ann", "a@x.com")).await;
        assert!(matches!(same, Err(DomainError::Conflict { .. })));

        let same_username = service.signup(signup_request("ann", "b@x.com")).await;
        assert!(matches!(same_username, Err(DomainError::Conflict { .. })));

        let same_email = service.signup(signup_request("bob", "a@x.com")).await;
        assert!(matches!(same_email, Err(DomainError::Conflict { .. })));

        assert_eq!(service.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_signup_invalid_fields() {
        let service = create_service();

        let mut request = signup_request("", "a@x.com");
        let result = service.signup(request.clone()).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));

        request.username = "ann".to_string();
        request.email = "not-an-email".to_string();
        let result = service.signup(request.clone()).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));

        request.email = "a@x.com".to_string();
        request.password = "   ".to_string();
        let result = service.signup(request).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));

        assert_eq!(service.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_signup_hash_failure_creates_nothing() {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .returning(|_| Err(DomainError::internal("hash failed")));

        let repository = Arc::new(InMemoryUserRepository::new());
        let service = UserService::new(Arc::clone(&repository), Arc::new(hasher));

        let result = service.signup(signup_request("ann", "a@x.com")).await;

        assert!(matches!(result, Err(DomainError::Internal { .. })));
        assert_eq!(repository.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_login_success() {
        let service = create_service();
        let user = service.signup(signup_request("ann", "a@x.com")).await.unwrap();

        let credentials = service.login("a@x.com", "pw123").await.unwrap();

        assert_eq!(credentials.id, user.id());
        assert_eq!(credentials.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let service = create_service();
        service.signup(signup_request("ann", "a@x.com")).await.unwrap();

        let result = service.login("a@x.com", "wrong").await;
        assert!(matches!(result, Err(DomainError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let service = create_service();

        let result = service.login("nobody@x.com", "pw123").await;
        assert!(matches!(result, Err(DomainError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_get_by_username() {
        let service = create_service();
        service.signup(signup_request("ann", "a@x.com")).await.unwrap();

        let user = service.get_by_username("ann").await.unwrap();
        assert_eq!(user.email(), "a@x.com");

        let missing = service.get_by_username("bob").await;
        assert!(matches!(missing, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_with_filter() {
        let service = create_service();
        service.signup(signup_request("ann", "a@x.com")).await.unwrap();

        let mut other = signup_request("bob", "b@x.com");
        other.firstname = Some("Robert".to_string());
        service.signup(other).await.unwrap();

        let query: HashMap<String, String> =
            [("firstname".to_string(), "john".to_string())].into_iter().collect();
        let filter = RecordFilter::for_records::<User, _>(&query).unwrap();

        let users = service.list(&filter).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username(), "ann");

        let all = service.list(&RecordFilter::empty()).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_edit_is_idempotent() {
        let service = create_service();
        let user = service.signup(signup_request("ann", "a@x.com")).await.unwrap();

        let once = service.edit(user.id(), edit("annie")).await.unwrap();
        let twice = service.edit(user.id(), edit("annie")).await.unwrap();

        assert_eq!(once, twice);
        assert_eq!(once.username(), "annie");
        assert_eq!(once.email(), "a@x.com");
        assert_eq!(once.dob(), NaiveDate::from_ymd_opt(1990, 1, 1));
        assert_eq!(once.password_hash(), user.password_hash());
    }

    #[tokio::test]
    async fn test_edit_missing_user() {
        let service = create_service();

        let result = service.edit(UserId::new(42).unwrap(), edit("ghost")).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_edit_rejects_empty_username() {
        let service = create_service();
        let user = service.signup(signup_request("ann", "a@x.com")).await.unwrap();

        let result = service.edit(user.id(), edit(" ")).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }
}
