use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::errors::{ApiError, ApiResult, USER_NOT_FOUND};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::profile_diff::ProfileChanges;
use crate::models::requests::{ProfileUrlRequest, SelfQuery, UpdateSelfRequest, UsersQuery};
use crate::models::user::{Availability, User};
use crate::services::pagination::{links, paginate, Position, DEFAULT_PAGE_SIZE};
use crate::services::store::StoreError;
use crate::state::AppState;
use crate::validation::{ValidatedJson, ValidatedQuery};

const USERS_PATH: &str = "/users";
const USERNAME_NOT_AVAILABLE: &str = "Username not available";

/// `GET /users`: a page of active users, or a single user when `id` is given.
pub async fn list_users(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<UsersQuery>,
) -> ApiResult<Json<Value>> {
    if let Some(id) = &query.id {
        let user = state
            .store
            .find_user_by_id(id)
            .await
            .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))?;
        return Ok(Json(json!({
            "message": "User returned successfully!",
            "user": user.public()
        })));
    }

    let size = query
        .size
        .map(|s| s as usize)
        .unwrap_or(DEFAULT_PAGE_SIZE);
    let position = Position::from_query(query.page, query.next.as_deref(), query.prev.as_deref())
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    let search = query.search.as_deref().map(str::to_lowercase);

    let sorted = state.store.list_active_users(search.as_deref()).await;
    let page = paginate(sorted, &position, size);
    let links = links(USERS_PATH, &page, search.as_deref(), size);
    let users: Vec<_> = page.iter().map(User::public).collect();

    Ok(Json(json!({
        "message": "Users returned successfully!",
        "users": users,
        "links": links
    })))
}

/// `GET /users/self`
pub async fn get_self(
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    ValidatedQuery(query): ValidatedQuery<SelfQuery>,
) -> Json<Value> {
    if query.private {
        Json(json!(user.private()))
    } else {
        Json(json!(user.public()))
    }
}

/// `PATCH /users/self`: contact and availability apply at once; profile
/// fields wait in the pending profile diff for approval. The rename check
/// happens inside the store write.
pub async fn update_self(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    ValidatedJson(body): ValidatedJson<UpdateSelfRequest>,
) -> ApiResult<StatusCode> {
    let changes = ProfileChanges {
        first_name: body.first_name,
        last_name: body.last_name,
        yoe: body.yoe,
        company: body.company,
        designation: body.designation,
        github_id: None,
        linkedin_id: body.linkedin_id,
        twitter_id: body.twitter_id,
        instagram_id: body.instagram_id,
        website: body.website,
    };
    let status = body
        .status
        .as_deref()
        .and_then(|s| s.parse::<Availability>().ok());

    let username = body.username;
    let email = body.email;
    let phone = body.phone;
    let img = body.img;
    let github_display_name = body.github_display_name;

    state
        .store
        .update_user(&user.id, |u| {
            if let Some(name) = username {
                u.profile.username = name;
            }
            if status.is_some() {
                u.profile.status = status;
            }
            if email.is_some() {
                u.contact.email = email;
            }
            if phone.is_some() {
                u.contact.phone = phone;
            }
            if img.is_some() {
                u.profile.img = img;
            }
            if github_display_name.is_some() {
                u.profile.github_display_name = github_display_name;
            }
        })
        .await
        .map_err(|e| match e {
            StoreError::UsernameTaken(_) => ApiError::Forbidden(USERNAME_NOT_AVAILABLE.into()),
            other => other.into(),
        })?;

    if !changes.is_empty() {
        let diff_id = state.store.upsert_pending_diff(&user.id, changes).await;
        info!("Profile diff {} pending for {}", diff_id, user.username());
    }

    Ok(StatusCode::NO_CONTENT)
}

/// `GET /users/:username`
pub async fn get_user_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<Value>> {
    let user = state
        .store
        .find_user_by_username(&username)
        .await
        .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))?;

    Ok(Json(json!({
        "message": "User returned successfully!",
        "user": user.public()
    })))
}

/// `GET /users/userId/:id`
pub async fn get_user_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let user = state
        .store
        .find_user_by_id(&id)
        .await
        .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))?;

    Ok(Json(json!({
        "message": "User returned successfully!",
        "user": user.public()
    })))
}

/// `GET /users/isUsernameAvailable/:username`
pub async fn is_username_available(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Json<Value> {
    let available = state.store.is_username_available(&username).await;
    Json(json!({ "isUsernameAvailable": available }))
}

/// `PATCH /users/profileURL`
pub async fn update_profile_url(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    ValidatedJson(body): ValidatedJson<ProfileUrlRequest>,
) -> ApiResult<Json<Value>> {
    state
        .store
        .update_user(&user.id, |u| u.profile.profile_url = body.profile_url)
        .await?;

    Ok(Json(json!({ "message": "updated profile URL!!" })))
}

/// `GET /users/chaincode`
pub async fn generate_chaincode(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> ApiResult<Json<Value>> {
    let chaincode = state.store.create_chaincode(&user.id).await?;
    info!("Issued chaincode for {}", user.username());

    Ok(Json(json!({
        "message": "Chaincode returned successfully",
        "chaincode": chaincode
    })))
}
