use crate::errors::ApiError;
use crate::models::user::User;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header::COOKIE, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

/// The caller resolved from the session cookie.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Returns the value of cookie `name` from every `Cookie` header.
fn session_token(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // 1. Extract the session cookie
    let token = session_token(req.headers(), &state.config.auth.cookie_name)
        .ok_or(ApiError::Unauthenticated)?;

    // 2. Verify signature and expiry
    let claims = state.tokens.verify(&token).map_err(|e| {
        warn!("Invalid session token: {:#}", e);
        ApiError::Unauthenticated
    })?;

    // 3. Resolve the user the token was issued for
    let user = state
        .store
        .find_user_by_id(&claims.user_id)
        .await
        .ok_or_else(|| {
            warn!("Session token for unknown user {}", claims.user_id);
            ApiError::Unauthenticated
        })?;

    debug!("Authenticated {}", user.username());
    req.extensions_mut().insert(AuthenticatedUser(user));
    Ok(next.run(req).await)
}

/// Must run after [`authenticate`].
pub async fn authorize_super_user(req: Request, next: Next) -> Result<Response, ApiError> {
    let user = req
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or(ApiError::Unauthenticated)?;

    if !user.0.is_super_user() {
        warn!("{} attempted a super_user action", user.0.username());
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(req).await)
}
