// Application configuration loaded once at startup from environment variables

use std::env;

/// Process-wide configuration
///
/// Constructed once in `main` and handed to the components that need it.
/// Nothing reads the environment after startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL connection string
    pub database_url: String,
    /// Bind address host
    pub host: String,
    /// Bind address port
    pub port: String,
    /// HS256 signing secret for access and confirmation tokens
    pub jwt_secret: String,
    /// Access token lifetime in seconds
    pub access_token_ttl_secs: i64,
    /// Base URL of the frontend, used to build confirmation links
    pub frontend_url: String,
    /// From-address for outgoing confirmation emails
    pub email_from: String,
}

impl AppConfig {
    /// Load configuration from the environment
    ///
    /// `DATABASE_URL` and `JWT_SECRET` are required; everything else has a
    /// development default.
    pub fn from_env() -> Result<Self, String> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set in environment".to_string())?;
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| "JWT_SECRET must be set in environment".to_string())?;

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
        let access_token_ttl_secs = match env::var("ACCESS_TOKEN_TTL_SECS") {
            Ok(raw) => raw
                .parse::<i64>()
                .map_err(|_| format!("ACCESS_TOKEN_TTL_SECS is not a number: {}", raw))?,
            Err(_) => 900,
        };
        let frontend_url = env::var("FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());
        let email_from = env::var("EMAIL_FROM")
            .unwrap_or_else(|_| "no-reply@decisions.local".to_string());

        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            access_token_ttl_secs,
            frontend_url,
            email_from,
        })
    }
}
