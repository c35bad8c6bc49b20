//! Salted password hashing for the credential store.
//!
//! Uses Argon2id with a random per-password salt, stored as a PHC string.
//! Hashing the same password twice therefore yields different strings, and
//! both verify; there is no deterministic digest to compare against.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Errors during password hashing and verification.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
}

/// Hash a password with Argon2id and a fresh random salt.
///
/// # Errors
/// Returns `PasswordError::Hash` if the hasher fails.
pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hash(e.to_string()))?
        .to_string();
    Ok(hash)
}

/// Verify a password against a stored PHC string.
///
/// A wrong password returns `Ok(false)`; a stored hash that does not parse
/// is an error, since it can only arise from a damaged credential table.
///
/// # Errors
/// Returns `PasswordError::MalformedHash` if the stored hash is not a valid
/// PHC string.
pub fn verify_password(plain: &str, phc: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(phc).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
