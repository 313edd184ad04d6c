//! Salted password hashing.
//!
//! Stored format is `<salt>$<hex digest>` where the digest is
//! SHA-256 over salt bytes followed by password bytes.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    let digest = digest(&salt, password);
    format!("{salt}${digest}")
}

/// Verify a password against a stored `salt$digest` hash.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match stored.split_once('$') {
        Some((salt, expected)) => digest(salt, password) == expected,
        None => false,
    }
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let stored = hash_password("correct horse battery staple");

        assert!(verify_password("correct horse battery staple", &stored));
        assert!(!verify_password("wrong password", &stored));
    }

    #[test]
    fn test_distinct_salts() {
        let a = hash_password("same password");
        let b = hash_password("same password");

        assert_ne!(a, b, "two hashes of the same password should differ by salt");
        assert!(verify_password("same password", &a));
        assert!(verify_password("same password", &b));
    }

    #[test]
    fn test_malformed_stored_hash() {
        assert!(!verify_password("anything", "no-dollar-separator"));
        assert!(!verify_password("anything", ""));
    }
}
