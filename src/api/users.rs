//! User endpoints: listing, lookup, signup, login and edit

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::{UserEdit, UserId};
use crate::domain::{DomainError, RecordFilter, User};
use crate::infrastructure::metrics::record_auth_attempt;
use crate::infrastructure::user::SignupRequest;

/// Request body for POST /users/signup
#[derive(Clone, Deserialize)]
pub struct SignupApiRequest {
    pub username: String,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    pub email: String,
    #[serde(default)]
    pub profile_img: Option<String>,
    #[serde(default)]
    pub banner_img: Option<String>,
    #[serde(default, alias = "DOB")]
    pub dob: Option<NaiveDate>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_name: Option<String>,
    pub password: String,
}

impl From<SignupApiRequest> for SignupRequest {
    fn from(request: SignupApiRequest) -> Self {
        Self {
            username: request.username,
            firstname: request.firstname,
            lastname: request.lastname,
            email: request.email,
            profile_img: request.profile_img,
            banner_img: request.banner_img,
            dob: request.dob,
            bio: request.bio,
            profile_name: request.profile_name,
            password: request.password,
        }
    }
}

/// Request body for POST /users/login
#[derive(Clone, Deserialize)]
pub struct LoginApiRequest {
    pub email: String,
    pub password: String,
}

/// Request body for PUT /users/{id}
///
/// Every editable field is replaced; omitted optional fields become null.
#[derive(Debug, Clone, Deserialize)]
pub struct EditUserApiRequest {
    pub username: String,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub profile_img: Option<String>,
    #[serde(default)]
    pub banner_img: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_name: Option<String>,
    #[serde(default)]
    pub notifications: bool,
}

impl From<EditUserApiRequest> for UserEdit {
    fn from(request: EditUserApiRequest) -> Self {
        Self {
            username: request.username,
            firstname: request.firstname,
            lastname: request.lastname,
            profile_img: request.profile_img,
            banner_img: request.banner_img,
            bio: request.bio,
            profile_name: request.profile_name,
            notifications: request.notifications,
        }
    }
}

/// Public projection of a user; carries no password material
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: String,
    pub profile_img: Option<String>,
    pub banner_img: Option<String>,
    pub dob: Option<NaiveDate>,
    pub bio: Option<String>,
    pub profile_name: Option<String>,
    pub notifications: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().as_i32(),
            username: user.username().to_string(),
            firstname: user.firstname().map(String::from),
            lastname: user.lastname().map(String::from),
            email: user.email().to_string(),
            profile_img: user.profile_img().map(String::from),
            banner_img: user.banner_img().map(String::from),
            dob: user.dob(),
            bio: user.bio().map(String::from),
            profile_name: user.profile_name().map(String::from),
            notifications: user.notifications(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupResponse {
    pub username: String,
    pub id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub message: String,
    pub id: i32,
    pub email: String,
}

pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    UserId::parse(raw).map_err(|e| ApiError::from(DomainError::invalid_id(e.to_string())))
}

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    debug!(filters = query.len(), "Listing users");

    let filter = RecordFilter::for_records::<User, _>(&query)?;
    let users = state.user_service.list(&filter).await?;

    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// GET /users/{id}
///
/// The path segment is matched against the username.
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(username = %username, "Getting user");

    let user = state.user_service.get_by_username(&username).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// POST /users/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupApiRequest>,
) -> Result<Json<SignupResponse>, ApiError> {
    debug!(username = %request.username, "Signing up user");

    let result = state.user_service.signup(request.into()).await;
    record_auth_attempt("signup", result.is_ok());
    let user = result?;

    Ok(Json(SignupResponse {
        username: user.username().to_string(),
        id: user.id().as_i32(),
    }))
}

/// POST /users/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginApiRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    debug!("Login attempt");

    let result = state
        .user_service
        .login(&request.email, &request.password)
        .await;
    record_auth_attempt("login", result.is_ok());
    let credentials = result?;

    Ok(Json(LoginResponse {
        message: "Login Successful".to_string(),
        id: credentials.id.as_i32(),
        email: credentials.email,
    }))
}

/// PUT /users/{id}
pub async fn edit_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<EditUserApiRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user_id = parse_user_id(&id)?;

    debug!(user_id = %user_id, "Editing user");

    let user = state.user_service.edit(user_id, request.into()).await?;

    Ok(Json(UserResponse::from(&user)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserDraft;

    #[test]
    fn test_user_response_omits_password() {
        let user = User::from_draft(
            UserId::new(1).unwrap(),
            UserDraft {
                username: "ann".to_string(),
                firstname: Some("Ann".to_string()),
                lastname: None,
                email: "a@x.com".to_string(),
                profile_img: None,
                banner_img: None,
                dob: NaiveDate::from_ymd_opt(1990, 2, 3),
                bio: None,
                profile_name: None,
                password_hash: "$argon2id$secret".to_string(),
            },
        );

        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["username"], "ann");
        assert_eq!(json["dob"], "1990-02-03");
        assert_eq!(json["notifications"], false);
        assert!(json.get("password").is_none());
        assert!(!json.to_string().contains("argon2id"));
    }

    #[test]
    fn test_signup_request_accepts_uppercase_dob() {
        let json = r#"{
            "username": "ann",
            "email": "a@x.com",
            "password": "pw123",
            "DOB": "1990-02-03"
        }"#;

        let request: SignupApiRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.dob, NaiveDate::from_ymd_opt(1990, 2, 3));
        assert_eq!(request.firstname, None);
    }

    #[test]
    fn test_edit_request_defaults() {
        let request: EditUserApiRequest = serde_json::from_str(r#"{"username":"ann"}"#).unwrap();
        let edit = UserEdit::from(request);

        assert_eq!(edit.username, "ann");
        assert!(!edit.notifications);
        assert_eq!(edit.bio, None);
    }

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("5").unwrap().as_i32(), 5);

        let err = parse_user_id("ann").unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error.param, Some("id".to_string()));
    }
}
