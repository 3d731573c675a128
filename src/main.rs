mod auth;
mod config;
mod db;
mod email;
mod response;

use std::sync::Arc;

use axum::{
    extract::FromRef,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth::{
    confirm_email_handler, login_handler, me_handler, refresh_handler, register_handler,
    AuthService, ConfirmationTokens, TokenRepository, TokenService, UserRepository,
};
use config::AppConfig;
use email::LogEmailSender;
use response::{ApiResponse, ErrorKind};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::login_handler,
        auth::handlers::register_handler,
        auth::handlers::refresh_handler,
        auth::handlers::confirm_email_handler,
        auth::handlers::me_handler,
    ),
    components(
        schemas(
            auth::models::LoginRequest,
            auth::models::RegisterRequest,
            auth::models::RefreshRequest,
            auth::models::SessionResponse,
            auth::models::UserResponse,
            response::ErrorKind,
        )
    ),
    tags(
        (name = "accounts", description = "Account registration, login and token lifecycle")
    ),
    info(
        title = "Decisions Account API",
        version = "1.0.0",
        description = "User accounts with email confirmation, password login and refresh-token rotation"
    )
)]
struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    auth: Arc<AuthService>,
    tokens: TokenService,
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl FromRef<AppState> for TokenService {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

/// Last-resort handler for faults that escape the normal error mapping
///
/// Logs the panic internally and returns a generic server error; no internal
/// detail reaches the caller.
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> axum::response::Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!("Unhandled panic while serving request: {}", detail);

    let body: ApiResponse<()> = ApiResponse::fail(
        vec!["Something went wrong".to_string()],
        ErrorKind::ServerError,
    );
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// Creates and configures the application router
/// Maps the account endpoints to their handlers and adds CORS and
/// panic-catching middleware
fn create_router(state: AppState) -> Router {
    use tower_http::catch_panic::CatchPanicLayer;
    use tower_http::cors::{Any, CorsLayer};

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Account routes
        .route("/api/accounts/login", post(login_handler))
        .route("/api/accounts/register", post(register_handler))
        .route("/api/accounts/refresh", post(refresh_handler))
        .route("/api/accounts/confirm-email", post(confirm_email_handler))
        .route("/api/accounts/me", get(me_handler))
        .layer(cors)
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

/// Wire repositories and services into the shared application state
fn build_state(pool: sqlx::PgPool, config: &AppConfig) -> AppState {
    let token_service = TokenService::new(
        config.jwt_secret.clone(),
        config.access_token_ttl_secs,
    );
    let auth = AuthService::new(
        UserRepository::new(pool.clone()),
        TokenRepository::new(pool),
        token_service.clone(),
        ConfirmationTokens::new(config.jwt_secret.clone()),
        Arc::new(LogEmailSender::new(config.email_from.clone())),
        config.frontend_url.clone(),
    );

    AppState {
        auth: Arc::new(auth),
        tokens: token_service,
    }
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Decisions Account API - Starting...");

    let config = AppConfig::from_env().expect("Configuration error");

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    let addr = format!("{}:{}", config.host, config.port);
    let app = create_router(build_state(db_pool, &config));

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Decisions Account API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}

#[cfg(test)]
mod tests;
