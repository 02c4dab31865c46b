use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;
use crate::secret::SigningSecret;

/// Access token codec.
///
/// Issues `base64url(header).base64url(claims).base64url(signature)` tokens
/// signed with HMAC-SHA256 and validates them back into [`Claims`].
/// The verification algorithm is fixed to HS256; whatever the token header
/// declares, nothing else is accepted.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Create a codec bound to the process signing secret.
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issue a token for an identity, valid for 24 hours from now.
    ///
    /// # Errors
    /// * `SigningFailed` - Claims could not be serialized or signed
    pub fn issue(
        &self,
        subject: impl ToString,
        username: impl ToString,
        email: impl ToString,
    ) -> Result<String, TokenError> {
        self.issue_at(subject, username, email, Utc::now())
    }

    /// Issue a token as if it had been issued at `issued_at`.
    pub fn issue_at(
        &self,
        subject: impl ToString,
        username: impl ToString,
        email: impl ToString,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        self.encode(&Claims::new(subject, username, email, issued_at))
    }

    /// Sign prepared claims.
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `Invalid` - Malformed, wrong algorithm, bad signature, or expired
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(reason = ?e.kind(), "token rejected");
                TokenError::Invalid
            })
    }
}
