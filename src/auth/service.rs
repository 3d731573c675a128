// Authentication service - business logic layer

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::auth::{
    confirmation::ConfirmationTokens,
    error::AuthError,
    models::{SessionResponse, User, UserResponse},
    password::PasswordService,
    repository::{TokenRepository, UserRepository},
    token::TokenService,
};
use crate::email::EmailSender;

/// Refresh tokens live for seven days from issuance
const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

/// Authentication service coordinating all account operations
pub struct AuthService {
    users: UserRepository,
    tokens: TokenRepository,
    token_service: TokenService,
    confirmations: ConfirmationTokens,
    email_sender: Arc<dyn EmailSender>,
    frontend_url: String,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(
        users: UserRepository,
        tokens: TokenRepository,
        token_service: TokenService,
        confirmations: ConfirmationTokens,
        email_sender: Arc<dyn EmailSender>,
        frontend_url: String,
    ) -> Self {
        Self {
            users,
            tokens,
            token_service,
            confirmations,
            email_sender,
            frontend_url,
        }
    }

    /// Log a user in with email and password
    ///
    /// Unknown email and wrong password fail identically so callers cannot
    /// probe which accounts exist.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionResponse, AuthError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !PasswordService::verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!("User {} logged in", user.id);
        self.issue_session(user).await
    }

    /// Register a new user and dispatch a confirmation email
    ///
    /// No session is issued here; tokens are only handed out by login once
    /// the account holder chooses to sign in. A failed email dispatch is
    /// logged and does not roll the registration back.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        if email.trim().is_empty() {
            return Err(AuthError::Validation(vec!["Email is required".to_string()]));
        }

        if self.users.find_by_email(email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }

        PasswordService::validate_strength(password).map_err(AuthError::Validation)?;
        let password_hash = PasswordService::hash_password(password)?;

        let user = self.users.create_user(name, email, &password_hash).await?;
        tracing::info!("User {} registered with email {}", user.id, user.email);

        let token = self.confirmations.generate(&user);
        let link = format!(
            "{}/confirm-email?userId={}&token={}",
            self.frontend_url, user.id, token
        );
        let body = format!("Click <a href='{}'>here</a> to confirm your email", link);

        if let Err(e) = self.email_sender.send(&user.email, "Confirm Email", &body).await {
            tracing::error!(
                "Failed to send confirmation email to {}: {}",
                user.email,
                e
            );
        }

        Ok(user)
    }

    /// Exchange a refresh token for a new session
    ///
    /// The presented token is consumed and replaced atomically; it is valid
    /// for exactly one refresh.
    pub async fn refresh(&self, presented: &str) -> Result<SessionResponse, AuthError> {
        let replacement = TokenService::generate_refresh_token();
        let expires_at = Utc::now() + Duration::days(REFRESH_TOKEN_TTL_DAYS);

        let user = self.tokens.rotate(presented, &replacement, expires_at).await?;
        tracing::info!("Rotated refresh token for user {}", user.id);

        let access_token = self.token_service.create_access_token(&user)?;
        Ok(SessionResponse {
            user: user.into(),
            token: access_token,
            refresh_token: replacement,
        })
    }

    /// Confirm a user's email address with a confirmation token
    ///
    /// Confirming an already-confirmed address is rejected with Conflict so
    /// double-confirmation attempts are visible to the caller.
    pub async fn confirm_email(&self, user_id: Uuid, token: &str) -> Result<(), AuthError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.email_confirmed {
            return Err(AuthError::EmailAlreadyConfirmed);
        }

        if !self.confirmations.verify(&user, token) {
            return Err(AuthError::ConfirmationInvalid);
        }

        self.users.mark_email_confirmed(user.id).await?;
        tracing::info!("Email confirmed for user {}", user.id);
        Ok(())
    }

    /// Get the user summary for an authenticated caller
    pub async fn current_user(&self, user_id: Uuid) -> Result<UserResponse, AuthError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(user.into())
    }

    /// Store a fresh refresh token and mint an access token for the user
    async fn issue_session(&self, user: User) -> Result<SessionResponse, AuthError> {
        let refresh_token = TokenService::generate_refresh_token();
        let expires_at = Utc::now() + Duration::days(REFRESH_TOKEN_TTL_DAYS);

        self.tokens
            .store_refresh_token(user.id, &refresh_token, expires_at)
            .await?;

        let access_token = self.token_service.create_access_token(&user)?;
        Ok(SessionResponse {
            user: user.into(),
            token: access_token,
            refresh_token,
        })
    }
}
