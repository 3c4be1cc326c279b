//! Salted password hashing for link edit protection.
//!
//! Only the Argon2id PHC string is ever stored, never the plaintext.
//! Verification is constant-time inside the argon2 crate, so the comparison
//! leaks no timing information about the stored hash.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .expect("Argon2 hashing should not fail with a valid salt")
        .to_string()
}

/// Verify a password against a stored PHC hash string.
/// An unparseable stored hash verifies as false rather than erroring.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
