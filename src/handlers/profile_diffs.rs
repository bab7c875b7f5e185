use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::errors::{ApiError, ApiResult};
use crate::models::profile_diff::{Approval, ProfileChanges};
use crate::models::requests::{ApproveDiffRequest, RejectDiffRequest};
use crate::services::store::StoreError;
use crate::state::AppState;
use crate::validation::ValidatedJson;

const PROFILE_DIFF_NOT_FOUND: &str = "Profile Diff doesn't exist";

/// `PATCH /users/rejectDiff`
pub async fn reject_profile_diff(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RejectDiffRequest>,
) -> ApiResult<Json<Value>> {
    let id = body.profile_diff_id.unwrap_or_default();
    let diff = state
        .store
        .set_diff_approval(&id, Approval::NotApproved, body.message)
        .await?;
    info!("Profile diff {} for {} rejected", diff.id, diff.user_id);

    Ok(Json(json!({ "message": "Profile Diff Rejected successfully!" })))
}

/// `PATCH /users/:id`: applies the reviewed fields and approves the diff.
pub async fn approve_profile_diff(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    ValidatedJson(body): ValidatedJson<ApproveDiffRequest>,
) -> ApiResult<Json<Value>> {
    let diff_id = body.id.unwrap_or_default();
    let changes = ProfileChanges {
        first_name: body.first_name,
        last_name: body.last_name,
        yoe: body.yoe,
        company: body.company,
        designation: body.designation,
        github_id: body.github_id,
        linkedin_id: body.linkedin_id,
        twitter_id: body.twitter_id,
        instagram_id: body.instagram_id,
        website: body.website,
    };

    let diff = state
        .store
        .approve_diff(&diff_id, &user_id, &changes, body.message)
        .await
        .map_err(|e| match e {
            StoreError::UserNotFound(_) => ApiError::not_found(PROFILE_DIFF_NOT_FOUND),
            other => other.into(),
        })?;
    info!("Profile diff {} for {} approved", diff.id, user_id);

    Ok(Json(json!({ "message": "Updated user's data successfully!" })))
}
