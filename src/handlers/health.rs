use axum::{response::IntoResponse, Json};
use serde_json::json;

const CACHE_CONTROL_NO_CACHE: &str = "no-cache, no-store, must-revalidate";

pub async fn health_check() -> impl IntoResponse {
    (
        [(
            axum::http::header::CACHE_CONTROL,
            axum::http::HeaderValue::from_static(CACHE_CONTROL_NO_CACHE),
        )],
        Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339()
        })),
    )
}
