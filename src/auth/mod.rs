// Authentication module
// Registration with email confirmation, password login, refresh-token
// rotation, and JWT issuance

pub mod confirmation;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use confirmation::ConfirmationTokens;
pub use error::AuthError;
pub use handlers::{
    confirm_email_handler, login_handler, me_handler, refresh_handler, register_handler,
};
pub use middleware::AuthenticatedUser;
pub use models::{
    ConfirmEmailParams, LoginRequest, RefreshRequest, RegisterRequest, SessionResponse, User,
    UserResponse,
};
pub use repository::{TokenRepository, UserRepository};
pub use service::AuthService;
pub use token::TokenService;
