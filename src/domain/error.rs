use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid ID format: {message}")]
    InvalidId { message: String },

    #[error("Invalid filter: {message}")]
    InvalidFilter { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }

    pub fn invalid_filter(message: impl Into<String>) -> Self {
        Self::InvalidFilter {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// True for failures caused by the backing store or the process, as
    /// opposed to failures caused by the request
    pub fn is_server_side(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::Storage { .. } | Self::Internal { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("User 'ann' not found");
        assert_eq!(error.to_string(), "Not found: User 'ann' not found");
    }

    #[test]
    fn test_conflict_error() {
        let error = DomainError::conflict("Username or email already exists");
        assert_eq!(
            error.to_string(),
            "Conflict: Username or email already exists"
        );
    }

    #[test]
    fn test_unauthorized_error() {
        let error = DomainError::unauthorized("Invalid email or password");
        assert_eq!(error.to_string(), "Unauthorized: Invalid email or password");
    }

    #[test]
    fn test_invalid_filter_error() {
        let error = DomainError::invalid_filter("Unknown field 'shoe_size'");
        assert_eq!(error.to_string(), "Invalid filter: Unknown field 'shoe_size'");
    }

    #[test]
    fn test_server_side_classification() {
        assert!(DomainError::storage("boom").is_server_side());
        assert!(DomainError::internal("boom").is_server_side());
        assert!(DomainError::configuration("boom").is_server_side());
        assert!(!DomainError::not_found("x").is_server_side());
        assert!(!DomainError::conflict("x").is_server_side());
        assert!(!DomainError::unauthorized("x").is_server_side());
    }
}
