use crate::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};

/// Hashes a plaintext password with bcrypt at the default cost.
///
/// The output is self-describing (algorithm, cost, and a fresh salt are
/// encoded alongside the digest), so two calls with the same input produce
/// different strings.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verifies a plaintext password against a stored bcrypt hash.
///
/// Any bcrypt error — including a malformed or foreign hash string —
/// collapses to `false`. Callers never distinguish "wrong password" from
/// "unverifiable hash".
pub fn verify_password(password: &str, hashed_password: &str) -> bool {
    verify(password, hashed_password).unwrap_or(false)
}
