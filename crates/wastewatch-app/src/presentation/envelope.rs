use serde::{Deserialize, Serialize};
use wastewatch_domain::shared::DomainError;

use super::ApiError;

/// Uniform `{success, data?, error?}` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn fail(error: impl Into<ApiError>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

impl<T> From<Result<T, DomainError>> for ApiResponse<T> {
    fn from(result: Result<T, DomainError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => Self::fail(err),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| {
            format!(
                r#"{{"success":false,"error":{{"code":5001,"message":"{}"}}}}"#,
                e.to_string().replace('"', "'")
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::STATS_UNAVAILABLE;
    use serde_json::Value;

    #[test]
    fn test_ok_envelope_omits_error() {
        let response: ApiResponse<u32> = Ok(16).into();
        let json: Value = serde_json::from_str(&response.to_json()).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 16);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_error_envelope_carries_code() {
        let response: ApiResponse<u32> =
            Err(DomainError::Repository(STATS_UNAVAILABLE.to_string())).into();
        let json: Value = serde_json::from_str(&response.to_json()).unwrap();

        assert_eq!(json["success"], false);
        assert!(json.get("data").is_none());
        assert_eq!(json["error"]["code"], 4001);
        assert_eq!(json["error"]["message"], "stats unavailable");
        assert_eq!(json["error"]["severity"], "Warning");
    }
}
