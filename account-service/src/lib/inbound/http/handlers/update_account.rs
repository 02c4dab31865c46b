use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ensure_owner;
use crate::account::errors::AccountError;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::UpdateProfileCommand;
use crate::domain::account::ports::CredentialServicePort;
use crate::inbound::http::handlers::AccountData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating a profile (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl UpdateAccountRequest {
    fn try_into_command(self) -> Result<UpdateProfileCommand, AccountError> {
        UpdateProfileCommand::new(self.username, self.email, self.first_name, self.last_name)
    }
}

pub async fn update_account(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateAccountRequest>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let account_id = AccountId::from_string(&id).map_err(AccountError::from)?;
    ensure_owner(&caller, &account_id)?;
    let command = req.try_into_command()?;

    state
        .credential_service
        .update_profile(&account_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref credential| ApiSuccess::new(StatusCode::OK, credential.into()))
}
