use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::account::errors::AccountError;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::Credential;
use crate::domain::account::ports::UserStore;

/// Process-local user store.
///
/// Uniqueness checks and writes happen under one write lock, so concurrent
/// registrations with the same username cannot both succeed.
#[derive(Default)]
pub struct InMemoryUserStore {
    credentials: RwLock<HashMap<AccountId, Credential>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_unique(
    credentials: &HashMap<AccountId, Credential>,
    candidate: &Credential,
) -> Result<(), AccountError> {
    let others = credentials.values().filter(|c| c.id != candidate.id);

    for other in others {
        if other.username == candidate.username {
            return Err(AccountError::UsernameAlreadyExists);
        }
        if other.email == candidate.email {
            return Err(AccountError::EmailAlreadyExists);
        }
    }

    Ok(())
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, credential: Credential) -> Result<Credential, AccountError> {
        let mut credentials = self.credentials.write().await;

        if credentials.contains_key(&credential.id) {
            return Err(AccountError::DatabaseError(format!(
                "duplicate account id: {}",
                credential.id
            )));
        }
        check_unique(&credentials, &credential)?;

        credentials.insert(credential.id, credential.clone());
        Ok(credential)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Credential>, AccountError> {
        Ok(self.credentials.read().await.get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Credential>, AccountError> {
        Ok(self
            .credentials
            .read()
            .await
            .values()
            .find(|c| c.username.as_str() == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, AccountError> {
        Ok(self
            .credentials
            .read()
            .await
            .values()
            .find(|c| c.email.as_str() == email)
            .cloned())
    }

    async fn update(&self, credential: Credential) -> Result<Credential, AccountError> {
        let mut credentials = self.credentials.write().await;

        let Some(existing) = credentials.get(&credential.id) else {
            return Err(AccountError::NotFound(credential.id.to_string()));
        };
        check_unique(&credentials, &credential)?;

        // Profile updates never touch password_hash
        let updated = Credential {
            password_hash: existing.password_hash.clone(),
            ..credential
        };
        credentials.insert(updated.id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: &AccountId) -> Result<(), AccountError> {
        self.credentials
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AccountError::NotFound(id.to_string()))
    }
}
