use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::ports::CredentialServicePort;
use crate::account::ports::UserStore;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::Credential;
use crate::domain::account::models::Password;
use crate::domain::account::models::PasswordHash;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::Session;
use crate::domain::account::models::UpdateProfileCommand;

/// Domain service implementation for credential operations.
///
/// Concrete implementation of CredentialServicePort with dependency injection.
/// Password hashing and verification run on the blocking thread pool.
pub struct CredentialService<S>
where
    S: UserStore,
{
    store: Arc<S>,
    authenticator: Arc<Authenticator>,
}

impl<S> CredentialService<S>
where
    S: UserStore,
{
    /// Create a new credential service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(store: Arc<S>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            store,
            authenticator,
        }
    }

    async fn hash_password(&self, password: Password) -> Result<PasswordHash, AccountError> {
        let authenticator = Arc::clone(&self.authenticator);
        let current_span = tracing::Span::current();

        let encoded = tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| authenticator.hash_password(password.expose()))
        })
        .await??;

        Ok(PasswordHash::new(encoded))
    }

    async fn authenticate(
        &self,
        account: &Credential,
        password: String,
    ) -> Result<String, AccountError> {
        let authenticator = Arc::clone(&self.authenticator);
        let stored_hash = account.password_hash.clone();
        let identity = account.identity();
        let current_span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                authenticator.authenticate(&password, stored_hash.as_str(), &identity)
            })
        })
        .await?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => AccountError::InvalidCredentials,
            AuthenticationError::Token(err) => AccountError::Token(err),
        })
    }
}

#[async_trait]
impl<S> CredentialServicePort for CredentialService<S>
where
    S: UserStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<Credential, AccountError> {
        // Advisory only: the store's unique constraints decide races
        if self
            .store
            .find_by_username(command.username.as_str())
            .await?
            .is_some()
        {
            return Err(AccountError::UsernameAlreadyExists);
        }

        if self
            .store
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AccountError::EmailAlreadyExists);
        }

        let password_hash = self.hash_password(command.password).await?;

        let now = Utc::now();
        let credential = Credential {
            id: AccountId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            first_name: command.first_name,
            last_name: command.last_name,
            created_at: now,
            updated_at: now,
        };

        let created = self.store.insert(credential).await?;

        tracing::info!(
            account_id = %created.id,
            username = %created.username,
            "Account registered"
        );

        Ok(created)
    }

    async fn login(&self, identifier: &str, password: &str) -> Result<Session, AccountError> {
        if identifier.is_empty() || password.is_empty() {
            return Err(AccountError::InvalidCredentials);
        }

        let account = if identifier.contains('@') {
            self.store.find_by_email(identifier).await?
        } else {
            self.store.find_by_username(identifier).await?
        };

        let Some(account) = account else {
            tracing::debug!("Login attempted for unknown account");
            return Err(AccountError::InvalidCredentials);
        };

        let token = self
            .authenticate(&account, password.to_string())
            .await
            .inspect_err(|e| {
                if matches!(e, AccountError::InvalidCredentials) {
                    tracing::debug!(account_id = %account.id, "Login rejected: password mismatch");
                }
            })?;

        tracing::info!(account_id = %account.id, "Login succeeded");

        Ok(Session { token, account })
    }

    async fn get_account(&self, id: &AccountId) -> Result<Credential, AccountError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AccountError::NotFound(id.to_string()))
    }

    async fn update_profile(
        &self,
        id: &AccountId,
        command: UpdateProfileCommand,
    ) -> Result<Credential, AccountError> {
        let mut account = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AccountError::NotFound(id.to_string()))?;

        account.username = command.username;
        account.email = command.email;
        account.first_name = command.first_name;
        account.last_name = command.last_name;
        account.updated_at = Utc::now();

        let updated = self.store.update(account).await?;

        tracing::info!(account_id = %updated.id, "Account profile updated");

        Ok(updated)
    }

    async fn delete_account(&self, id: &AccountId) -> Result<(), AccountError> {
        self.store.delete(id).await?;

        tracing::info!(account_id = %id, "Account deleted");

        Ok(())
    }
}
