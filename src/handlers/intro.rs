use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::errors::{ApiError, ApiResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::join::{Biodata, Intro, JoinData, Location};
use crate::models::requests::JoinRequest;
use crate::models::user_status::{StatusState, StatusUpdate};
use crate::state::AppState;
use crate::validation::ValidatedJson;

/// Weeks counted into a month of committed hours.
const WEEKS_PER_MONTH: u32 = 4;

/// `GET /users/:id/intro`
pub async fn get_user_intro(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Value>> {
    let data = state.store.find_join_data(&user_id).await;
    if data.is_empty() {
        return Err(ApiError::not_found("Data Not Found"));
    }

    Ok(Json(json!({
        "message": "User data returned",
        "data": data
    })))
}

/// `PUT /users/self/intro`: stores the join answers once and moves the
/// caller into onboarding.
pub async fn add_user_intro(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    ValidatedJson(body): ValidatedJson<JoinRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let hours = body.number_of_hours.unwrap_or_default();

    let data = JoinData {
        user_id: user.id.clone(),
        biodata: Biodata {
            first_name: body.first_name.unwrap_or_default(),
            last_name: body.last_name.unwrap_or_default(),
        },
        location: Location {
            city: body.city.unwrap_or_default(),
            state: body.state.unwrap_or_default(),
            country: body.country.unwrap_or_default(),
        },
        found_from: body.found_from.unwrap_or_default(),
        intro: Intro {
            introduction: body.introduction.unwrap_or_default(),
            skills: body.skills.unwrap_or_default(),
            college: body.college.unwrap_or_default(),
            for_fun: body.for_fun.unwrap_or_default(),
            fun_fact: body.fun_fact.unwrap_or_default(),
            why_rds: body.why_rds.unwrap_or_default(),
            flow_state: body.flow_state,
            number_of_hours: hours,
        },
        timestamp: chrono::Utc::now(),
    };

    state.store.add_join_data(data).await?;
    let status = state
        .store
        .update_user_status(
            &user.id,
            StatusUpdate {
                state: Some(StatusState::Onboarding),
                message: None,
                committed_hours: Some(WEEKS_PER_MONTH * hours),
            },
        )
        .await;
    info!(
        "{} joined, status document {} now onboarding",
        user.username(),
        status.id
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User join data and newstatus data added and updated successfully"
        })),
    ))
}
