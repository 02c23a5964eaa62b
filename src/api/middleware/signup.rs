//! Shape checks on signup payloads
//!
//! Runs before the signup handler and rejects bodies whose `password` or
//! `email` is missing or malformed. Bodies that are not JSON objects are
//! passed through so the handler's extractor reports them.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::api::types::ApiError;
use crate::domain::user::{validate_email, validate_password};

/// Largest signup body the check will buffer
pub const MAX_SIGNUP_BODY_BYTES: usize = 64 * 1024;

/// Middleware validating `password` and `email` on signup
pub async fn signup_shape_middleware(request: Request<Body>, next: Next) -> Response {
    let (parts, body) = request.into_parts();

    let declared_length = parts
        .headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<usize>().ok());

    if let Some(len) = declared_length.filter(|len| *len > MAX_SIGNUP_BODY_BYTES) {
        return too_large(len).into_response();
    }

    // Bodies without a usable length header are cut off at the limit while buffering
    let bytes = match to_bytes(body, MAX_SIGNUP_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(error = %e, "Signup body exceeded the buffer limit");
            return ApiError::payload_too_large(format!(
                "Request body too large (max: {} bytes)",
                MAX_SIGNUP_BODY_BYTES
            ))
            .into_response();
        }
    };

    if let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(&bytes) {
        if let Err(err) = check_shape(&fields) {
            tracing::debug!(param = ?err.response.error.param, "Signup payload rejected");
            return err.into_response();
        }
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn too_large(len: usize) -> ApiError {
    ApiError::payload_too_large(format!(
        "Request body too large: {} bytes (max: {} bytes)",
        len, MAX_SIGNUP_BODY_BYTES
    ))
}

fn check_shape(fields: &serde_json::Map<String, Value>) -> Result<(), ApiError> {
    let password = match fields.get("password") {
        Some(Value::String(password)) => password,
        Some(_) => {
            return Err(ApiError::bad_request("Password must be a string").with_param("password"));
        }
        None => return Err(ApiError::bad_request("Password is required").with_param("password")),
    };

    validate_password(password)
        .map_err(|e| ApiError::bad_request(e.to_string()).with_param("password"))?;

    let email = match fields.get("email") {
        Some(Value::String(email)) => email,
        Some(_) => return Err(ApiError::bad_request("Email must be a string").with_param("email")),
        None => return Err(ApiError::bad_request("Email is required").with_param("email")),
    };

    validate_email(email).map_err(|e| ApiError::bad_request(e.to_string()).with_param("email"))
}
