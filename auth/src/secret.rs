use std::fmt;

use thiserror::Error;

/// Hardcoded development secret used when none is configured.
///
/// Anyone who reads this source can forge tokens signed with it.
pub const INSECURE_FALLBACK_SECRET: &str = "your-secret-key-change-this-in-production";

/// Error for signing secret resolution.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SigningSecretError {
    #[error("JWT signing secret must not be empty")]
    Empty,

    #[error("no JWT signing secret configured and the insecure fallback is disabled")]
    Missing,
}

/// Symmetric key used to sign and verify access tokens.
///
/// Resolved once at startup and handed to the token codec; immutable for
/// the lifetime of the process.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Wrap an explicitly configured secret.
    ///
    /// # Errors
    /// * `Empty` - The secret has no bytes
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, SigningSecretError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(SigningSecretError::Empty);
        }
        Ok(Self(secret))
    }

    /// Resolve the secret from configuration.
    ///
    /// A configured secret always wins. Without one, the insecure fallback
    /// is used only when `allow_insecure_fallback` is set.
    ///
    /// # Errors
    /// * `Empty` - The configured secret is an empty string
    /// * `Missing` - Nothing configured and the fallback is disabled
    pub fn resolve(
        configured: Option<&str>,
        allow_insecure_fallback: bool,
    ) -> Result<Self, SigningSecretError> {
        match configured {
            Some(secret) => Self::new(secret),
            None if allow_insecure_fallback => {
                tracing::warn!(
                    "No JWT signing secret configured, falling back to the insecure default secret"
                );
                Self::new(INSECURE_FALLBACK_SECRET)
            }
            None => Err(SigningSecretError::Missing),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret([redacted])")
    }
}
