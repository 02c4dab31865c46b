use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

use crate::account::errors::AccountError;
use crate::account::errors::AccountIdError;
use crate::account::errors::EmailError;
use crate::account::errors::NameError;
use crate::account::errors::PasswordPolicyError;
use crate::account::errors::UsernameError;

lazy_static! {
    static ref NAME_PATTERN: Regex = Regex::new(r"^[\p{L}\p{N}\s]+$").unwrap();
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
}

/// Account credential entity.
///
/// Owned by the user store; the service reads and writes it through the
/// store and never caches it.
#[derive(Debug, Clone)]
pub struct Credential {
    pub id: AccountId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    /// Identity fields embedded into access tokens.
    pub fn identity(&self) -> auth::Identity {
        auth::Identity::new(self.id, self.username.as_str(), self.email.as_str())
    }
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an account ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        Uuid::parse_str(s)
            .map(AccountId)
            .map_err(|e| AccountIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Non-empty, at least 3 characters, letters, digits and whitespace only.
/// Case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `Required` - Username is empty
    /// * `TooShort` - Username shorter than 3 characters
    /// * `InvalidCharacters` - Contains anything but letters, digits and whitespace
    pub fn new(username: String) -> Result<Self, UsernameError> {
        if username.is_empty() {
            return Err(UsernameError::Required);
        }

        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }

        if !NAME_PATTERN.is_match(&username) {
            return Err(UsernameError::InvalidCharacters);
        }

        Ok(Self(username))
    }

    /// Wrap a username read back from the store. Rows written under older
    /// rules stay loadable.
    pub(crate) fn from_stored(username: String) -> Self {
        Self(username)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type. Case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `Required` - Email is empty
    /// * `InvalidFormat` - Email does not look like `local@domain.tld`
    pub fn new(email: String) -> Result<Self, EmailError> {
        if email.is_empty() {
            return Err(EmailError::Required);
        }

        if !EMAIL_PATTERN.is_match(&email) {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self(email))
    }

    pub(crate) fn from_stored(email: String) -> Self {
        Self(email)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// First or last name of the account holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    pub fn first_name(name: String) -> Result<Self, NameError> {
        Self::new("first name", name)
    }

    pub fn last_name(name: String) -> Result<Self, NameError> {
        Self::new("last name", name)
    }

    fn new(field: &'static str, name: String) -> Result<Self, NameError> {
        if name.is_empty() {
            return Err(NameError::Required { field });
        }

        if !NAME_PATTERN.is_match(&name) {
            return Err(NameError::InvalidCharacters { field });
        }

        Ok(Self(name))
    }

    pub(crate) fn from_stored(name: String) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Plaintext password that satisfies the registration policy.
///
/// Only ever handed to the password hasher; `Debug` never prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;

    /// # Errors
    /// * `Required` - Password is empty
    /// * `TooShort` - Password shorter than 6 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.is_empty() {
            return Err(PasswordPolicyError::Required);
        }

        if password.chars().count() < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([redacted])")
    }
}

/// Encoded password hash as produced by `auth::PasswordHasher`.
///
/// Opaque to the service: stored and handed back to the hasher, never
/// decoded, compared or logged here.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(encoded: String) -> Self {
        Self(encoded)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash([redacted])")
    }
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: Password,
    pub first_name: PersonName,
    pub last_name: PersonName,
}

impl RegisterCommand {
    /// Validate raw registration input.
    ///
    /// Fields are checked in order (username, email, password, first name,
    /// last name) and the first violation is returned.
    pub fn new(
        username: String,
        email: String,
        password: String,
        first_name: String,
        last_name: String,
    ) -> Result<Self, AccountError> {
        Ok(Self {
            username: Username::new(username)?,
            email: EmailAddress::new(email)?,
            password: Password::new(password)?,
            first_name: PersonName::first_name(first_name)?,
            last_name: PersonName::last_name(last_name)?,
        })
    }
}

/// Command to replace the profile fields of an existing account.
///
/// The password is never part of a profile update.
#[derive(Debug)]
pub struct UpdateProfileCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub first_name: PersonName,
    pub last_name: PersonName,
}

impl UpdateProfileCommand {
    /// Validate raw profile input with the registration rules.
    pub fn new(
        username: String,
        email: String,
        first_name: String,
        last_name: String,
    ) -> Result<Self, AccountError> {
        Ok(Self {
            username: Username::new(username)?,
            email: EmailAddress::new(email)?,
            first_name: PersonName::first_name(first_name)?,
            last_name: PersonName::last_name(last_name)?,
        })
    }
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub account: Credential,
}
