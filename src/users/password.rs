//! One-way password hashing.
//!
//! Hashes are Argon2id PHC strings. A value starting with `!` marks an unusable
//! password: it is stored like a hash but nothing ever verifies against it.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};
use thiserror::Error;

pub const PASSWORD_MIN_LENGTH: usize = 5;
pub const PASSWORD_MAX_LENGTH: usize = 128;

const UNUSABLE_PASSWORD_PREFIX: char = '!';
const UNUSABLE_PASSWORD_SUFFIX_LENGTH: usize = 40;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(argon2::password_hash::Error),
}

/// Hash a raw password with Argon2id and a random salt.
///
/// # Errors
/// Returns an error if Argon2 rejects the input or parameters.
pub fn hash_password(raw: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(raw.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError::Hash)
}

/// Check a raw password against a stored hash.
#[must_use]
pub fn verify_password(raw: &str, encoded: &str) -> bool {
    if !is_usable(encoded) {
        return false;
    }

    PasswordHash::new(encoded).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(raw.as_bytes(), &parsed)
            .is_ok()
    })
}

/// A random marker value that can never verify.
#[must_use]
pub fn unusable_password() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(UNUSABLE_PASSWORD_SUFFIX_LENGTH)
        .map(char::from)
        .collect();

    format!("{UNUSABLE_PASSWORD_PREFIX}{suffix}")
}

#[must_use]
pub fn is_usable(encoded: &str) -> bool {
    !encoded.starts_with(UNUSABLE_PASSWORD_PREFIX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_not_the_raw_password() {
        let hash = hash_password("hihihihihih").unwrap();
        assert_ne!(hash, "hihihihihih");
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn verify_accepts_the_right_password() {
        let hash = hash_password("teasd123123").unwrap();
        assert!(verify_password("teasd123123", &hash));
        assert!(!verify_password("nopeddd", &hash));
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_password("teasd123123").unwrap();
        let b = hash_password("teasd123123").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn unusable_password_never_verifies() {
        let marker = unusable_password();
        assert!(!is_usable(&marker));
        assert_eq!(marker.len(), 1 + UNUSABLE_PASSWORD_SUFFIX_LENGTH);
        assert!(!verify_password("", &marker));
        assert!(!verify_password(&marker, &marker));
    }

    #[test]
    fn malformed_hash_does_not_verify() {
        assert!(!verify_password("secret", "not-a-phc-string"));
    }
}
