use serde::{Deserialize, Serialize};
use wastewatch_domain::shared::{DomainError, ErrorCode, ErrorSeverity};

use crate::application::config::ConfigError;

/// Structured error carried in a response envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Numeric code (2xxx-6xxx range)
    pub code: u16,

    pub message: String,

    pub severity: ErrorSeverity,

    /// Whether retrying the same call can succeed
    pub recoverable: bool,
}

impl ApiError {
    pub fn from_code(error_code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: error_code.code(),
            message: message.into(),
            severity: error_code.severity(),
            recoverable: error_code.is_recoverable(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::from_code(ErrorCode::InfrastructureError, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::from_code(ErrorCode::ValidationError, message)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self {
            code: err.code().code(),
            message: err.message().to_string(),
            severity: err.severity(),
            recoverable: err.is_recoverable(),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::infrastructure(err.to_string())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::infrastructure(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::infrastructure(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_from_domain_error() {
        let err: ApiError = DomainError::UserNotFound("u-123".to_string()).into();

        assert_eq!(err.code, 2001);
        assert_eq!(err.message, "u-123");
        assert_eq!(err.severity, ErrorSeverity::Info);
        assert!(!err.recoverable);
    }

    #[test]
    fn test_concurrency_conflict_is_recoverable() {
        let err: ApiError = DomainError::ConcurrencyConflict("lost race".to_string()).into();
        assert_eq!(err.code, 3002);
        assert!(err.recoverable);
        assert_eq!(err.severity, ErrorSeverity::Warning);
    }

    #[test]
    fn test_helpers() {
        assert_eq!(ApiError::validation("bad").code, 6001);
        assert_eq!(ApiError::infrastructure("down").code, 5001);
        assert_eq!(ApiError::infrastructure("down").to_string(), "[5001] down");
    }
}
