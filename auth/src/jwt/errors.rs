use thiserror::Error;

/// Error type for token operations.
///
/// Every validation failure collapses into `Invalid`, so callers cannot
/// tell an expired token from a tampered one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("invalid or expired token")]
    Invalid,
}
