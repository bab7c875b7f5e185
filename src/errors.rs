use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

pub const UNAUTHENTICATED: &str = "Unauthenticated User";
pub const UNAUTHORIZED: &str = "You are not authorized for this action.";
pub const INTERNAL_SERVER_ERROR: &str = "An internal server error occurred";
pub const USER_NOT_FOUND: &str = "User doesn't exist";

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{}", UNAUTHENTICATED)]
    Unauthenticated,
    #[error("{}", UNAUTHORIZED)]
    Unauthorized,
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Request body is too large")]
    PayloadTooLarge,
    #[error("internal error: {0}")]
    Internal(String),
}

/// Error body in the `{statusCode, error, message}` shape clients already parse.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub error: String,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(cause: impl std::fmt::Display) -> Self {
        Self::Internal(cause.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::Internal(_) => INTERNAL_SERVER_ERROR.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let Self::Internal(cause) = &self {
            error!("Request failed: {}", cause);
        } else if status.is_client_error() {
            warn!("Rejected request: {} - {}", status.as_u16(), self);
        }

        let body = ErrorBody {
            status_code: status.as_u16(),
            error: status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string(),
            message: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Unmatched routes.
pub async fn route_not_found() -> ApiError {
    ApiError::not_found("Not Found")
}

/// Rewrites bare error responses from the router and the body limit into
/// the same JSON shape handlers produce. `Allow` on a 405 is kept.
pub async fn json_error_bodies(response: Response) -> Response {
    let status = response.status();
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .is_some_and(|v| v.as_bytes().starts_with(b"application/json"));
    if is_json || !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let reason = status.canonical_reason().unwrap_or("Unknown Error");
    let allow = response.headers().get(header::ALLOW).cloned();
    let body = ErrorBody {
        status_code: status.as_u16(),
        error: reason.to_string(),
        message: reason.to_string(),
    };
    let mut rewritten = (status, Json(body)).into_response();
    if let Some(allow) = allow {
        rewritten.headers_mut().insert(header::ALLOW, allow);
    }
    rewritten
}
