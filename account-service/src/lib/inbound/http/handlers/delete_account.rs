use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ensure_owner;
use crate::account::errors::AccountError;
use crate::domain::account::models::AccountId;
use crate::domain::account::ports::CredentialServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_account(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<DeleteAccountResponseData>, ApiError> {
    let account_id = AccountId::from_string(&id).map_err(AccountError::from)?;
    ensure_owner(&caller, &account_id)?;

    state
        .credential_service
        .delete_account(&account_id)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                DeleteAccountResponseData {
                    message: "account deleted".to_string(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteAccountResponseData {
    pub message: String,
}
