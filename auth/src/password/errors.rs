use thiserror::Error;

/// Error type for password operations.
///
/// Verification never fails, so only hashing has an error path.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
