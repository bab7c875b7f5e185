use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::errors::{ApiError, ApiResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::photo_verification::{ImageCheck, ImageKind, PhotoVerification};
use crate::models::requests::VerifyPictureQuery;
use crate::state::AppState;
use crate::validation::ValidatedQuery;

/// `POST /users/verify`: queues the caller's pictures for review.
pub async fn request_verification(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> ApiResult<Json<Value>> {
    let discord_url = match &user.profile.discord_id {
        Some(id) => state
            .directory
            .find_member(id)
            .await?
            .and_then(|m| m.avatar_url()),
        None => None,
    };
    let profile_url = user
        .profile
        .picture
        .as_ref()
        .map(|p| p.url.clone())
        .or_else(|| user.profile.img.clone());

    state
        .store
        .set_photo_verification(PhotoVerification {
            user_id: user.id.clone(),
            discord_id: user.profile.discord_id.clone(),
            profile: ImageCheck {
                url: profile_url,
                approved: false,
            },
            discord: ImageCheck {
                url: discord_url,
                approved: false,
            },
        })
        .await;
    info!("Queued photo verification for {}", user.username());

    Ok(Json(json!({
        "message": "Your request has been queued successfully"
    })))
}

/// `PATCH /users/picture/verify/:id?type=profile|discord`
pub async fn verify_user_image(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    ValidatedQuery(query): ValidatedQuery<VerifyPictureQuery>,
) -> ApiResult<Json<Value>> {
    let kind = query
        .kind
        .as_deref()
        .and_then(|k| k.parse::<ImageKind>().ok())
        .ok_or_else(|| ApiError::bad_request("Invalid verification type was provided!"))?;

    state.store.approve_photo(&user_id, kind).await?;

    Ok(Json(json!({
        "message": format!("{} image was verified successfully!", kind.as_str())
    })))
}

/// `GET /users/picture/:id`
pub async fn get_user_image_verification(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Value>> {
    let record = state.store.find_photo_verification(&user_id).await?;

    Ok(Json(json!({
        "message": "User image verification record fetched successfully!",
        "data": record
    })))
}
