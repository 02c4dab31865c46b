//! Credential and token authentication library
//!
//! Provides the authentication core shared by the account service:
//! - Password hashing (Argon2id, self-describing PHC strings)
//! - Signed, expiring access tokens (HS256 JWT)
//! - Authentication coordination (verify, then issue)
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{SigningSecret, TokenCodec};
//!
//! let secret = SigningSecret::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let codec = TokenCodec::new(&secret);
//! let token = codec.issue("user123", "alice", "alice@example.com").unwrap();
//! let claims = codec.validate(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Identity, SigningSecret};
//!
//! let secret = SigningSecret::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let auth = Authenticator::new(&secret);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let identity = Identity::new("user123", "alice", "alice@example.com");
//! let token = auth.authenticate("password123", &hash, &identity).unwrap();
//!
//! // Every protected request: validate token
//! let claims = auth.validate_token(&token).unwrap();
//! assert_eq!(claims.username, "alice");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod secret;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::Identity;
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use jwt::TOKEN_TTL_HOURS;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use secret::SigningSecret;
pub use secret::SigningSecretError;
pub use secret::INSECURE_FALLBACK_SECRET;
