//! Slow-hash credential handling.
//!
//! Passwords and hashes are taken by reference and never logged, the only
//! thing a caller learns from verification is yes or no.

use anyhow::{Context, Result};

/// Hash a plaintext password for storage.
///
/// # Errors
/// Returns an error if hashing fails.
pub fn hash(plaintext: &str) -> Result<String> {
    bcrypt::hash(plaintext, bcrypt::DEFAULT_COST).context("failed to hash password")
}

/// Check a plaintext password against a stored hash.
///
/// A stored hash that cannot be parsed counts as a mismatch.
#[must_use]
pub fn verify(plaintext: &str, stored_hash: &str) -> bool {
    bcrypt::verify(plaintext, stored_hash).unwrap_or(false)
}
