//! Accounts API endpoints - JSON responses
//!
//! Endpoints:
//! - api_accounts: Ranked account list
//! - api_account_create: Create a new account
//! - api_account_set_closed: Set an account's closed flag

use crate::error::ApiResult;
use crate::AppState;
use axum::extract::Path;
use axum::Json;

/// Payload for account creation
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateAccountPayload {
    #[serde(default)]
    pub name: String,
}

/// Payload for the closed-flag toggle
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SetClosedPayload {
    pub closed: bool,
}

/// List accounts ranked for display (JSON API)
///
/// Open accounts come first, each group ordered by most recent entry
/// date; accounts without transactions sink to the end of their group.
pub async fn api_accounts(state: axum::extract::State<AppState>) -> ApiResult<String> {
    let ledger = state.ledger.read().await;
    let accounts = ledger.list_accounts().await?;
    Ok(serde_json::to_string(&accounts).unwrap_or_default())
}

/// Create an account (JSON API)
pub async fn api_account_create(
    state: axum::extract::State<AppState>,
    Json(payload): Json<CreateAccountPayload>,
) -> ApiResult<String> {
    let ledger = state.ledger.read().await;
    let account = ledger.create_account(&payload.name).await?;
    log::info!("created account '{}' ({})", account.name, account.id);
    Ok(serde_json::to_string(&account).unwrap_or_default())
}

/// Set an account's closed flag (JSON API)
///
/// The toggle itself is never guarded; a closed account can always be
/// reopened through this endpoint.
pub async fn api_account_set_closed(
    state: axum::extract::State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SetClosedPayload>,
) -> ApiResult<String> {
    let ledger = state.ledger.read().await;
    ledger.set_closed(&id, payload.closed).await?;
    Ok(format!(r#"{{"success": true, "closed": {}}}"#, payload.closed))
}
