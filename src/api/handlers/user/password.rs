//! Argon2id password hashing.
//!
//! Hashes are PHC strings carrying their own salt and parameters. Stored
//! hashes are never compared by equality, only through [`verify`].

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;

/// Hash a password with Argon2id and return the PHC string.
///
/// # Errors
///
/// Returns an error if hashing fails.
pub fn hash(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Verify a password against a stored PHC hash.
///
/// An unparseable stored hash verifies as `false` rather than surfacing an
/// error to the caller.
#[must_use]
pub fn verify(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
