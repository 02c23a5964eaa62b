//! User interest endpoints

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::api::users::parse_user_id;
use crate::domain::interest::InterestId;
use crate::domain::user::UserId;
use crate::domain::{DomainError, RecordFilter, UserInterest, UserInterestLink};

/// An interest attached to a user, joined with its name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInterestResponse {
    pub users_id: i32,
    pub interests_id: i32,
    pub added: bool,
    pub name: String,
}

impl From<&UserInterest> for UserInterestResponse {
    fn from(interest: &UserInterest) -> Self {
        Self {
            users_id: interest.users_id.as_i32(),
            interests_id: interest.interests_id.as_i32(),
            added: interest.added,
            name: interest.name.clone(),
        }
    }
}

/// A raw association row, as returned by a delete
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInterestLinkResponse {
    pub users_id: i32,
    pub interests_id: i32,
    pub added: bool,
}

impl From<&UserInterestLink> for UserInterestLinkResponse {
    fn from(link: &UserInterestLink) -> Self {
        Self {
            users_id: link.users_id.as_i32(),
            interests_id: link.interests_id.as_i32(),
            added: link.added,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

fn parse_path(user_id: &str, interest_id: &str) -> Result<(UserId, InterestId), ApiError> {
    let user_id = parse_user_id(user_id)?;
    let interest_id = InterestId::parse(interest_id).map_err(|e| {
        ApiError::from(DomainError::invalid_id(e.to_string())).with_param("interest_id")
    })?;

    Ok((user_id, interest_id))
}

/// GET /users/{id}/interest
pub async fn list_interests(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Vec<UserInterestResponse>>, ApiError> {
    let user_id = parse_user_id(&user_id)?;

    debug!(user_id = %user_id, filters = query.len(), "Listing user interests");

    let filter = RecordFilter::for_records::<UserInterest, _>(&query)?;
    let interests = state.interest_service.list(user_id, &filter).await?;

    Ok(Json(
        interests.iter().map(UserInterestResponse::from).collect(),
    ))
}

/// GET /users/{id}/interest/{interest_id}
pub async fn get_interest(
    State(state): State<AppState>,
    Path((user_id, interest_id)): Path<(String, String)>,
) -> Result<Json<UserInterestResponse>, ApiError> {
    let (user_id, interest_id) = parse_path(&user_id, &interest_id)?;

    debug!(user_id = %user_id, interest_id = %interest_id, "Getting user interest");

    let interest = state.interest_service.get(user_id, interest_id).await?;

    Ok(Json(UserInterestResponse::from(&interest)))
}

/// POST /users/{id}/interest/{interest_id}
pub async fn add_interest(
    State(state): State<AppState>,
    Path((user_id, interest_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    let (user_id, interest_id) = parse_path(&user_id, &interest_id)?;

    debug!(user_id = %user_id, interest_id = %interest_id, "Adding user interest");

    state.interest_service.add(user_id, interest_id).await?;

    Ok(Json(MessageResponse {
        message: "Interest Added".to_string(),
    }))
}

/// DELETE /users/{id}/interest/{interest_id}
pub async fn remove_interest(
    State(state): State<AppState>,
    Path((user_id, interest_id)): Path<(String, String)>,
) -> Result<Json<UserInterestLinkResponse>, ApiError> {
    let (user_id, interest_id) = parse_path(&user_id, &interest_id)?;

    debug!(user_id = %user_id, interest_id = %interest_id, "Removing user interest");

    let removed = state.interest_service.remove(user_id, interest_id).await?;

    Ok(Json(UserInterestLinkResponse::from(&removed)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_path() {
        let (user, interest) = parse_path("5", "3").unwrap();
        assert_eq!(user.as_i32(), 5);
        assert_eq!(interest.as_i32(), 3);

        let err = parse_path("5", "music").unwrap_err();
        assert_eq!(err.response.error.param, Some("interest_id".to_string()));

        let err = parse_path("x", "3").unwrap_err();
        assert_eq!(err.response.error.param, Some("id".to_string()));
    }

    #[test]
    fn test_interest_response_serialization() {
        let link = UserInterestLink::added(UserId::new(1).unwrap(), InterestId::new(2).unwrap());
        let interest = UserInterest::from_link(link, "Hiking");

        let json = serde_json::to_value(UserInterestResponse::from(&interest)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"users_id": 1, "interests_id": 2, "added": true, "name": "Hiking"})
        );

        let json = serde_json::to_value(UserInterestLinkResponse::from(&link)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"users_id": 1, "interests_id": 2, "added": true})
        );
    }
}
