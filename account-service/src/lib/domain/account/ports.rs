use async_trait::async_trait;

use crate::domain::account::models::AccountId;
use crate::domain::account::models::Credential;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::Session;
use crate::domain::account::models::UpdateProfileCommand;
use crate::account::errors::AccountError;

/// Port for credential service operations.
#[async_trait]
pub trait CredentialServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Validated username, email, password and names
    ///
    /// # Returns
    /// Created account
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Hashing` - Randomness source unavailable
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Credential, AccountError>;

    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `identifier` - Username, or email when it contains `@`
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Session with the access token and the account
    ///
    /// # Errors
    /// * `InvalidCredentials` - Empty input, unknown account or wrong password
    /// * `Token` - Token generation failed
    /// * `DatabaseError` - Store operation failed
    async fn login(&self, identifier: &str, password: &str) -> Result<Session, AccountError>;

    /// Retrieve account by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Store operation failed
    async fn get_account(&self, id: &AccountId) -> Result<Credential, AccountError>;

    /// Replace the profile fields of an account; the password hash is kept.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `UsernameAlreadyExists` - New username belongs to another account
    /// * `EmailAlreadyExists` - New email belongs to another account
    /// * `DatabaseError` - Store operation failed
    async fn update_profile(
        &self,
        id: &AccountId,
        command: UpdateProfileCommand,
    ) -> Result<Credential, AccountError>;

    /// Delete an account.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Store operation failed
    async fn delete_account(&self, id: &AccountId) -> Result<(), AccountError>;
}

/// Persistence operations for account credentials.
///
/// Username and email uniqueness is enforced here authoritatively; the
/// service-level pre-checks are only an early exit.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Persist a new credential.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Store operation failed
    async fn insert(&self, credential: Credential) -> Result<Credential, AccountError>;

    /// Retrieve credential by identifier (None if not found).
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Credential>, AccountError>;

    /// Retrieve credential by exact, case-sensitive username.
    async fn find_by_username(&self, username: &str) -> Result<Option<Credential>, AccountError>;

    /// Retrieve credential by exact, case-sensitive email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, AccountError>;

    /// Update an existing credential.
    ///
    /// # Errors
    /// * `NotFound` - Credential does not exist
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Store operation failed
    async fn update(&self, credential: Credential) -> Result<Credential, AccountError>;

    /// Remove a credential.
    ///
    /// # Errors
    /// * `NotFound` - Credential does not exist
    /// * `DatabaseError` - Store operation failed
    async fn delete(&self, id: &AccountId) -> Result<(), AccountError>;
}
