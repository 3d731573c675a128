// Email confirmation tokens
// Derived from the user's identity and security stamp, validated by
// recomputation; nothing is stored.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::models::User;

type HmacSha256 = Hmac<Sha256>;

/// Issues and validates email confirmation tokens
///
/// A token is the HMAC-SHA256 of the user's id and current security stamp.
/// Rotating the stamp invalidates every previously issued token for that
/// user.
#[derive(Clone)]
pub struct ConfirmationTokens {
    secret: String,
}

impl ConfirmationTokens {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    fn mac_for(&self, user: &User) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(b"confirm-email:");
        mac.update(user.id.as_bytes());
        mac.update(b":");
        mac.update(user.security_stamp.as_bytes());
        mac
    }

    /// Generate a confirmation token for the user's current security stamp
    pub fn generate(&self, user: &User) -> String {
        hex::encode(self.mac_for(user).finalize().into_bytes())
    }

    /// Check a presented token against the user's current security stamp
    ///
    /// Malformed input and stale tokens both return false; the comparison is
    /// constant-time.
    pub fn verify(&self, user: &User, token: &str) -> bool {
        let Ok(presented) = hex::decode(token) else {
            return false;
        };
        self.mac_for(user).verify_slice(&presented).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: String::new(),
            email_confirmed: false,
            security_stamp: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_roundtrip_for_issuing_user() {
        let tokens = ConfirmationTokens::new("secret".to_string());
        let user = test_user();

        let token = tokens.generate(&user);
        assert!(tokens.verify(&user, &token));
    }

    #[test]
    fn test_token_fails_for_other_user() {
        let tokens = ConfirmationTokens::new("secret".to_string());
        let alice = test_user();
        let mut bob = test_user();
        bob.id = Uuid::new_v4();

        let token = tokens.generate(&alice);
        assert!(!tokens.verify(&bob, &token));
    }

    #[test]
    fn test_token_goes_stale_when_stamp_rotates() {
        let tokens = ConfirmationTokens::new("secret".to_string());
        let mut user = test_user();

        let token = tokens.generate(&user);
        user.security_stamp = Uuid::new_v4();
        assert!(!tokens.verify(&user, &token));
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let tokens = ConfirmationTokens::new("secret".to_string());
        let user = test_user();

        assert!(!tokens.verify(&user, ""));
        assert!(!tokens.verify(&user, "not-hex!"));
        assert!(!tokens.verify(&user, "deadbeef"));
    }

    #[test]
    fn test_token_is_bound_to_secret() {
        let issuing = ConfirmationTokens::new("secret-a".to_string());
        let other = ConfirmationTokens::new("secret-b".to_string());
        let user = test_user();

        let token = issuing.generate(&user);
        assert!(!other.verify(&user, &token));
    }
}
