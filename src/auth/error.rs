// Authentication error types and their transport mapping

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error, warn};

use crate::response::{ApiResponse, ErrorKind};

/// Errors raised by the account flows
///
/// Every expected failure is one of these variants; handlers never panic and
/// never let store errors escape unclassified.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Validation failed")]
    Validation(Vec<String>),

    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Refresh token is expired")]
    ExpiredRefreshToken,

    #[error("Missing authentication token")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Email has already been confirmed")]
    EmailAlreadyConfirmed,

    #[error("Email confirmation failed. The link may have expired or is invalid")]
    ConfirmationInvalid,

    #[error("User does not exist")]
    UserNotFound,

    #[error("Password hashing error")]
    PasswordHash,

    #[error("Token generation error: {0}")]
    TokenGeneration(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl AuthError {
    /// Classify this error per the response taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) | AuthError::ConfirmationInvalid => ErrorKind::Validation,
            AuthError::InvalidCredentials
            | AuthError::InvalidRefreshToken
            | AuthError::ExpiredRefreshToken
            | AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::ExpiredToken => ErrorKind::Unauthorized,
            AuthError::EmailAlreadyExists | AuthError::EmailAlreadyConfirmed => ErrorKind::Conflict,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::PasswordHash | AuthError::TokenGeneration(_) | AuthError::Database(_) => {
                ErrorKind::ServerError
            }
        }
    }

    /// Error strings safe to send to clients
    ///
    /// Internal failures collapse to a generic message so store or hashing
    /// details never leak.
    pub fn client_errors(&self) -> Vec<String> {
        match self {
            AuthError::Validation(reasons) => reasons.clone(),
            AuthError::PasswordHash | AuthError::TokenGeneration(_) | AuthError::Database(_) => {
                vec!["Internal server error".to_string()]
            }
            other => vec![other.to_string()],
        }
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::Database(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AuthError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut reasons: Vec<String> = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for field_error in field_errors {
                let reason = field_error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                reasons.push(reason);
            }
        }
        if reasons.is_empty() {
            reasons.push("Request validation failed".to_string());
        }
        AuthError::Validation(reasons)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        match &self {
            AuthError::Database(msg) => error!("Database error in auth: {}", msg),
            AuthError::PasswordHash => error!("Password hashing error"),
            AuthError::TokenGeneration(msg) => error!("Token generation error: {}", msg),
            AuthError::InvalidCredentials
            | AuthError::InvalidRefreshToken
            | AuthError::ExpiredRefreshToken
            | AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::ExpiredToken => warn!("Authentication failure: {}", self),
            other => debug!("Request rejected: {}", other),
        }

        let body: ApiResponse<()> = ApiResponse::fail(self.client_errors(), kind);
        (kind.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_credential_failures_are_unauthorized() {
        assert_eq!(AuthError::InvalidCredentials.kind(), ErrorKind::Unauthorized);
        assert_eq!(AuthError::InvalidRefreshToken.kind(), ErrorKind::Unauthorized);
        assert_eq!(AuthError::ExpiredRefreshToken.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn test_conflict_and_not_found_classification() {
        assert_eq!(AuthError::EmailAlreadyExists.kind(), ErrorKind::Conflict);
        assert_eq!(AuthError::EmailAlreadyConfirmed.kind(), ErrorKind::Conflict);
        assert_eq!(AuthError::UserNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(AuthError::ConfirmationInvalid.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_internal_errors_do_not_leak_details() {
        let err = AuthError::Database("connection refused at 10.0.0.5:5432".to_string());
        assert_eq!(err.kind().status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_errors(), vec!["Internal server error".to_string()]);
    }

    #[test]
    fn test_validation_errors_keep_their_reasons() {
        let err = AuthError::Validation(vec![
            "Password must be at least 8 characters long".to_string(),
            "Password must contain at least one digit".to_string(),
        ]);
        assert_eq!(err.kind().status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.client_errors().len(), 2);
    }
}
