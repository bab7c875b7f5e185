use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::info;

use crate::errors::ApiResult;
use crate::services::discord::apply_unverified_role;
use crate::state::AppState;

/// `POST /users/update-in-discord`
pub async fn set_in_discord_false(State(state): State<AppState>) -> Json<Value> {
    let changed = state.store.set_in_discord_for_all(false).await;
    info!("Reset in_discord on {} users", changed);

    Json(json!({
        "message": "Successfully added the in_discord field to false for all users"
    }))
}

/// `POST /users`: tags guild members that never linked an account.
pub async fn apply_unverified_roles(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let linked = state.store.linked_discord_ids().await;
    let applied = apply_unverified_role(
        state.directory.as_ref(),
        &linked,
        &state.config.discord.unverified_role_id,
    )
    .await?;
    info!("Unverified role applied to {} members", applied.len());

    Ok(Json(json!({ "message": "ROLES APPLIED SUCCESSFULLY" })))
}
