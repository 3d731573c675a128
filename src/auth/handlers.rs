// HTTP handlers for account endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{
    error::AuthError,
    middleware::AuthenticatedUser,
    models::{ConfirmEmailParams, LoginRequest, RefreshRequest, RegisterRequest, SessionResponse, UserResponse},
    service::AuthService,
};
use crate::response::ApiResponse;

/// Log a user in
/// POST /api/accounts/login
#[utoipa::path(
    post,
    path = "/api/accounts/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = SessionResponse),
        (status = 401, description = "Incorrect credentials", body = String, example = json!({"success": false, "errors": ["Incorrect email or password"], "errorType": "Unauthorized"}))
    ),
    tag = "accounts"
)]
pub async fn login_handler(
    State(service): State<Arc<AuthService>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, AuthError> {
    request.validate()?;
    let session = service.login(&request.email, &request.password).await?;
    Ok(Json(ApiResponse::ok(session, "Login successful")))
}

/// Register a new user
/// POST /api/accounts/register
#[utoipa::path(
    post,
    path = "/api/accounts/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registration accepted, confirmation pending", body = String, example = json!({"success": true, "message": "Confirmation email has been sent"})),
        (status = 400, description = "Validation failed", body = String, example = json!({"success": false, "errors": ["Password must contain at least one digit"], "errorType": "Validation"})),
        (status = 409, description = "Email already registered", body = String, example = json!({"success": false, "errors": ["Email already exists"], "errorType": "Conflict"}))
    ),
    tag = "accounts"
)]
pub async fn register_handler(
    State(service): State<Arc<AuthService>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<()>>, AuthError> {
    request.validate()?;
    service
        .register(&request.name, &request.email, &request.password)
        .await?;
    Ok(Json(ApiResponse::ok_message("Confirmation email has been sent")))
}

/// Exchange a refresh token for a new session
/// POST /api/accounts/refresh
#[utoipa::path(
    post,
    path = "/api/accounts/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New session issued", body = SessionResponse),
        (status = 401, description = "Invalid or expired refresh token", body = String, example = json!({"success": false, "errors": ["Invalid refresh token"], "errorType": "Unauthorized"}))
    ),
    tag = "accounts"
)]
pub async fn refresh_handler(
    State(service): State<Arc<AuthService>>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, AuthError> {
    let session = service.refresh(&request.refresh_token).await?;
    Ok(Json(ApiResponse::ok(session, "Success")))
}

/// Confirm a user's email address
/// POST /api/accounts/confirm-email?userId=&token=
#[utoipa::path(
    post,
    path = "/api/accounts/confirm-email",
    params(
        ("userId" = Uuid, Query, description = "User id from the confirmation link"),
        ("token" = String, Query, description = "Confirmation token from the link")
    ),
    responses(
        (status = 200, description = "Email confirmed", body = String, example = json!({"success": true, "message": "Email has been successfully confirmed"})),
        (status = 404, description = "Unknown user", body = String, example = json!({"success": false, "errors": ["User does not exist"], "errorType": "NotFound"})),
        (status = 409, description = "Already confirmed", body = String, example = json!({"success": false, "errors": ["Email has already been confirmed"], "errorType": "Conflict"}))
    ),
    tag = "accounts"
)]
pub async fn confirm_email_handler(
    State(service): State<Arc<AuthService>>,
    Query(params): Query<ConfirmEmailParams>,
) -> Result<Json<ApiResponse<()>>, AuthError> {
    service.confirm_email(params.user_id, &params.token).await?;
    Ok(Json(ApiResponse::ok_message("Email has been successfully confirmed")))
}

/// Get the authenticated caller's user summary
/// GET /api/accounts/me
#[utoipa::path(
    get,
    path = "/api/accounts/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing or invalid access token", body = String, example = json!({"success": false, "errors": ["Missing authentication token"], "errorType": "Unauthorized"}))
    ),
    tag = "accounts"
)]
pub async fn me_handler(
    State(service): State<Arc<AuthService>>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<UserResponse>>, AuthError> {
    tracing::debug!("Fetching current user for {}", user.email);
    let current = service.current_user(user.user_id).await?;
    Ok(Json(ApiResponse::ok(current, "")))
}
