use crate::jwt::Claims;
use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::secret::SigningSecret;

/// Authentication coordinator combining password verification and token issuance.
///
/// Shared by the credential service (hashing, login) and the request gate
/// (token validation). Holds only immutable state.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

/// Identity fields embedded into an issued token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject: String,
    pub username: String,
    pub email: String,
}

impl Identity {
    pub fn new(subject: impl ToString, username: impl ToString, email: impl ToString) -> Self {
        Self {
            subject: subject.to_string(),
            username: username.to_string(),
            email: email.to_string(),
        }
    }
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Secret resolved once at startup for token signing
    pub fn new(secret: &SigningSecret) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against a stored hash; malformed hashes never match.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `identity` - Identity to encode in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match the hash
    /// * `Token` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        identity: &Identity,
    ) -> Result<String, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(identity)?)
    }

    /// Issue an access token without password verification.
    pub fn issue_token(&self, identity: &Identity) -> Result<String, TokenError> {
        self.token_codec
            .issue(&identity.subject, &identity.username, &identity.email)
    }

    /// Validate an access token and return its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_codec.validate(token)
    }
}
