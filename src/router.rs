use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};

use crate::errors::{json_error_bodies, route_not_found};
use crate::handlers::{discord, health, intro, profile_diffs, users, verification};
use crate::middleware::auth::{authenticate, authorize_super_user};
use crate::state::AppState;

/// Builds the full route table. Path parameters directly under `/users/`
/// share the name `:id`; each handler reads it as the key it expects.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/users", get(users::list_users))
        .route("/users/", get(users::list_users))
        .route("/users/:id", get(users::get_user_by_username));

    let authenticated_routes = Router::new()
        .route(
            "/users/self",
            get(users::get_self).patch(users::update_self),
        )
        .route("/users/self/intro", put(intro::add_user_intro))
        .route("/users/userId/:id", get(users::get_user_by_id))
        .route(
            "/users/isUsernameAvailable/:username",
            get(users::is_username_available),
        )
        .route("/users/chaincode", get(users::generate_chaincode))
        .route("/users/profileURL", patch(users::update_profile_url))
        .route("/users/verify", post(verification::request_verification))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let super_user_routes = Router::new()
        .route("/users", post(discord::apply_unverified_roles))
        .route("/users/:id", patch(profile_diffs::approve_profile_diff))
        .route("/users/:id/intro", get(intro::get_user_intro))
        .route("/users/rejectDiff", patch(profile_diffs::reject_profile_diff))
        .route(
            "/users/picture/verify/:id",
            patch(verification::verify_user_image),
        )
        .route(
            "/users/picture/:id",
            get(verification::get_user_image_verification),
        )
        .route(
            "/users/update-in-discord",
            post(discord::set_in_discord_false),
        )
        .route_layer(middleware::from_fn(authorize_super_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let max_request_size = state.config.server.max_request_size;

    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .merge(super_user_routes)
        .fallback(route_not_found)
        .layer(tower_http::limit::RequestBodyLimitLayer::new(
            max_request_size,
        ))
        .layer(middleware::map_response(json_error_bodies))
        .layer(tower_http::cors::CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}
