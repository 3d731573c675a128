// Access token signing and refresh token generation

use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind as JwtErrorKind, DecodingKey, EncodingKey, Header, Validation};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::error::AuthError;
use crate::auth::models::User;

/// Number of random bytes in a refresh token (256 bits of entropy)
const REFRESH_TOKEN_BYTES: usize = 32;

/// JWT claims carried by access tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    pub email: String,
    /// Expiration timestamp (seconds)
    pub exp: i64,
    /// Issued-at timestamp (seconds)
    pub iat: i64,
}

/// Token service for access token signing and refresh token generation
///
/// Holds the process-wide signing secret; read-only after construction.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    access_token_ttl_secs: i64,
}

impl TokenService {
    /// Create a new TokenService with the signing secret and access lifetime
    pub fn new(secret: String, access_token_ttl_secs: i64) -> Self {
        Self {
            secret,
            access_token_ttl_secs,
        }
    }

    /// Sign a short-lived access token carrying the user's id and email
    pub fn create_access_token(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            iat: now,
            exp: now + self.access_token_ttl_secs,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    /// Validate an access token and return its claims
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            JwtErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })
    }

    /// Generate an opaque refresh token string
    ///
    /// 32 bytes from the OS CSPRNG, hex-encoded; carries no decodable
    /// structure and is never persisted in plain form.
    pub fn generate_refresh_token() -> String {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn test_token_service() -> TokenService {
        TokenService::new("test_secret_key_for_testing_purposes".to_string(), 900)
    }

    fn test_user(id: Uuid, email: &str) -> User {
        User {
            id,
            name: "Test".to_string(),
            email: email.to_string(),
            password_hash: String::new(),
            email_confirmed: false,
            security_stamp: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_access_token_lifetime_is_configured() {
        let service = test_token_service();
        let user = test_user(Uuid::new_v4(), "test@example.com");
        let token = service.create_access_token(&user).unwrap();
        let claims = service.validate_access_token(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_token_claims_contain_user_identity() {
        let service = test_token_service();
        let id = Uuid::new_v4();
        let user = test_user(id, "user@example.com");

        let token = service.create_access_token(&user).unwrap();
        let claims = service.validate_access_token(&token).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.email, "user@example.com");
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let service = test_token_service();

        assert!(service.validate_access_token("").is_err());
        assert!(service.validate_access_token("not.a.token").is_err());
        assert!(service.validate_access_token("invalid_token_format").is_err());
        assert!(service
            .validate_access_token("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.invalid.signature")
            .is_err());
    }

    #[test]
    fn test_token_signature_verification() {
        let service1 = TokenService::new("secret1".to_string(), 900);
        let service2 = TokenService::new("secret2".to_string(), 900);
        let user = test_user(Uuid::new_v4(), "test@example.com");

        let token = service1.create_access_token(&user).unwrap();

        assert!(service1.validate_access_token(&token).is_ok());
        assert!(service2.validate_access_token(&token).is_err());
    }

    #[test]
    fn test_refresh_tokens_are_opaque_and_distinct() {
        let mut seen = HashSet::new();
        for _ in 0..100 {
            let token = TokenService::generate_refresh_token();
            // 32 bytes hex-encoded
            assert_eq!(token.len(), 64);
            assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
            assert!(seen.insert(token), "refresh tokens must never repeat");
        }
    }

    proptest! {
        #[test]
        fn prop_access_token_roundtrip(
            email in "[a-z]{3,10}@[a-z]{3,10}\\.(com|org|net)"
        ) {
            let service = test_token_service();
            let id = Uuid::new_v4();
            let user = test_user(id, &email);

            let token = service.create_access_token(&user)?;
            let claims = service.validate_access_token(&token)?;
            prop_assert_eq!(claims.sub, id);
            prop_assert_eq!(claims.email, email);
            prop_assert_eq!(claims.exp - claims.iat, 900);
        }

        #[test]
        fn prop_malformed_tokens_rejected(
            malformed in "[a-zA-Z0-9]{10,50}"
        ) {
            let service = test_token_service();
            let result = service.validate_access_token(&malformed);
            prop_assert!(result.is_err());
        }
    }
}
