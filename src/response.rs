// Uniform API response envelope and error classification
// Every endpoint returns this envelope; the error kind decides the HTTP status

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Classification of a failed operation
///
/// Every kind maps to exactly one HTTP status class. A successful response
/// carries no kind at all, so `success == true` can never be paired with one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ErrorKind {
    Validation,
    Unauthorized,
    NotFound,
    Conflict,
    Forbidden,
    ServerError,
}

impl ErrorKind {
    /// Map this kind to its transport status
    ///
    /// The match is exhaustive: a new kind cannot be added without choosing
    /// a status, and anything unexpected lands on ServerError upstream.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Response envelope shared by all account endpoints
///
/// Shape on the wire: `{success, message, data, errors, errorType}` with the
/// optional fields omitted when absent.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ErrorKind>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying a payload
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            errors: None,
            error_type: None,
        }
    }

    /// Successful response with a message only
    pub fn ok_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            errors: None,
            error_type: None,
        }
    }

    /// Failed response with an error list and classification
    pub fn fail(errors: Vec<String>, kind: ErrorKind) -> Self {
        debug_assert!(!errors.is_empty(), "failed responses carry at least one error");
        Self {
            success: false,
            message: None,
            data: None,
            errors: Some(errors),
            error_type: Some(kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_status() {
        let cases = [
            (ErrorKind::Validation, StatusCode::BAD_REQUEST),
            (ErrorKind::Unauthorized, StatusCode::UNAUTHORIZED),
            (ErrorKind::NotFound, StatusCode::NOT_FOUND),
            (ErrorKind::Conflict, StatusCode::CONFLICT),
            (ErrorKind::Forbidden, StatusCode::FORBIDDEN),
            (ErrorKind::ServerError, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (kind, status) in cases {
            assert_eq!(kind.status_code(), status);
        }
    }

    #[test]
    fn test_ok_carries_no_error_kind() {
        let response = ApiResponse::ok(42, "done");
        assert!(response.success);
        assert!(response.error_type.is_none());
        assert!(response.errors.is_none());
        assert_eq!(response.data, Some(42));
    }

    #[test]
    fn test_fail_carries_errors_and_kind() {
        let response: ApiResponse<()> =
            ApiResponse::fail(vec!["bad input".to_string()], ErrorKind::Validation);
        assert!(!response.success);
        assert_eq!(response.error_type, Some(ErrorKind::Validation));
        assert_eq!(response.errors.as_deref(), Some(&["bad input".to_string()][..]));
    }

    #[test]
    fn test_envelope_field_names() {
        let response: ApiResponse<()> =
            ApiResponse::fail(vec!["nope".to_string()], ErrorKind::Unauthorized);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["errorType"], "Unauthorized");
        assert_eq!(json["errors"][0], "nope");
        // absent fields are omitted entirely
        assert!(json.get("data").is_none());
        assert!(json.get("message").is_none());
    }
}
