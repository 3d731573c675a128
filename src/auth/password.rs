// Password hashing and strength policy

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::auth::error::AuthError;

/// Password service for hashing and verification
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using Argon2id with a fresh random salt
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| AuthError::PasswordHash)?;
        Ok(hash.to_string())
    }

    /// Verify a password against a stored PHC-format hash
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Validate password strength requirements
    ///
    /// Returns every violated rule so the client sees the full list at once.
    pub fn validate_strength(password: &str) -> Result<(), Vec<String>> {
        let mut reasons = Vec::new();

        if password.len() < 8 {
            reasons.push("Password must be at least 8 characters long".to_string());
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            reasons.push("Password must contain at least one uppercase letter".to_string());
        }
        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            reasons.push("Password must contain at least one lowercase letter".to_string());
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            reasons.push("Password must contain at least one digit".to_string());
        }
        if password.chars().all(|c| c.is_ascii_alphanumeric()) {
            reasons.push(
                "Password must contain at least one non-alphanumeric character".to_string(),
            );
        }

        if reasons.is_empty() {
            Ok(())
        } else {
            Err(reasons)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = PasswordService::hash_password("P@ssw0rd!").unwrap();
        assert!(PasswordService::verify_password("P@ssw0rd!", &hash).unwrap());
        assert!(!PasswordService::verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = PasswordService::hash_password("P@ssw0rd!").unwrap();
        let second = PasswordService::hash_password("P@ssw0rd!").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_strong_password_passes_policy() {
        assert!(PasswordService::validate_strength("P@ssw0rd!").is_ok());
    }

    #[test]
    fn test_policy_reports_every_violation() {
        let reasons = PasswordService::validate_strength("abc").unwrap_err();
        // too short, no uppercase, no digit, no special character
        assert_eq!(reasons.len(), 4);
        assert!(reasons[0].contains("at least 8 characters"));
    }

    #[test]
    fn test_policy_single_violation() {
        let reasons = PasswordService::validate_strength("Password1").unwrap_err();
        assert_eq!(
            reasons,
            vec!["Password must contain at least one non-alphanumeric character".to_string()]
        );
    }
}
