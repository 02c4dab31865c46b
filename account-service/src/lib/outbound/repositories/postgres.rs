use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::account::errors::AccountError;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::Credential;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::PasswordHash;
use crate::domain::account::models::PersonName;
use crate::domain::account::models::Username;
use crate::domain::account::ports::UserStore;

const USERNAME_CONSTRAINT: &str = "accounts_username_key";
const EMAIL_CONSTRAINT: &str = "accounts_email_key";

pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(
        &self,
        sql: &'static str,
        key: &str,
    ) -> Result<Option<Credential>, AccountError> {
        sqlx::query_as::<_, CredentialRow>(sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Credential::from))
            .map_err(|e| AccountError::DatabaseError(e.to_string()))
    }
}

#[derive(Debug, FromRow)]
struct CredentialRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CredentialRow> for Credential {
    fn from(row: CredentialRow) -> Self {
        Credential {
            id: AccountId(row.id),
            username: Username::from_stored(row.username),
            email: EmailAddress::from_stored(row.email),
            password_hash: PasswordHash::new(row.password_hash),
            first_name: PersonName::from_stored(row.first_name),
            last_name: PersonName::from_stored(row.last_name),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Translate unique violations into conflicts; everything else is a database error.
fn write_error(e: sqlx::Error) -> AccountError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some(USERNAME_CONSTRAINT) => return AccountError::UsernameAlreadyExists,
                Some(EMAIL_CONSTRAINT) => return AccountError::EmailAlreadyExists,
                _ => {}
            }
        }
    }
    AccountError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn insert(&self, credential: Credential) -> Result<Credential, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO accounts
                (id, username, email, password_hash, first_name, last_name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(credential.id.0)
        .bind(credential.username.as_str())
        .bind(credential.email.as_str())
        .bind(credential.password_hash.as_str())
        .bind(credential.first_name.as_str())
        .bind(credential.last_name.as_str())
        .bind(credential.created_at)
        .bind(credential.updated_at)
        .execute(&self.pool)
        .await
        .map_err(write_error)?;

        Ok(credential)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Credential>, AccountError> {
        sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id, username, email, password_hash, first_name, last_name, created_at, updated_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(Credential::from))
        .map_err(|e| AccountError::DatabaseError(e.to_string()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Credential>, AccountError> {
        self.find_one(
            r#"
            SELECT id, username, email, password_hash, first_name, last_name, created_at, updated_at
            FROM accounts
            WHERE username = $1
            "#,
            username,
        )
        .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, AccountError> {
        self.find_one(
            r#"
            SELECT id, username, email, password_hash, first_name, last_name, created_at, updated_at
            FROM accounts
            WHERE email = $1
            "#,
            email,
        )
        .await
    }

    async fn update(&self, credential: Credential) -> Result<Credential, AccountError> {
        // Profile updates never touch password_hash
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET username = $2, email = $3, first_name = $4, last_name = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(credential.id.0)
        .bind(credential.username.as_str())
        .bind(credential.email.as_str())
        .bind(credential.first_name.as_str())
        .bind(credential.last_name.as_str())
        .bind(credential.updated_at)
        .execute(&self.pool)
        .await
        .map_err(write_error)?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(credential.id.to_string()));
        }

        Ok(credential)
    }

    async fn delete(&self, id: &AccountId) -> Result<(), AccountError> {
        let result = sqlx::query(
            r#"
            DELETE FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_rows_load_without_revalidation() {
        let now = Utc::now();
        let row = CredentialRow {
            id: Uuid::new_v4(),
            username: "al".to_string(),
            email: "legacy@localhost".to_string(),
            password_hash: "$argon2id$v=19$m=65536,t=1,p=4$c2FsdA$ZGlnZXN0".to_string(),
            first_name: "O'Brien".to_string(),
            last_name: String::new(),
            created_at: now,
            updated_at: now,
        };
        let id = row.id;

        let credential = Credential::from(row);

        assert_eq!(credential.id, AccountId(id));
        assert_eq!(credential.username.as_str(), "al");
        assert_eq!(credential.email.as_str(), "legacy@localhost");
        assert_eq!(credential.first_name.as_str(), "O'Brien");
        assert_eq!(credential.last_name.as_str(), "");
    }
}
