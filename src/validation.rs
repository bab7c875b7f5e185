//! Request extractors that turn serde and `validator` failures into
//! `400 Bad Request` bodies carrying a single, field-ordered message.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{request::Parts, StatusCode},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use crate::errors::ApiError;

/// A request payload with a fixed set of accepted keys.
///
/// `FIELDS` lists the wire names in the order failures are reported.
pub trait Schema: DeserializeOwned + Validate {
    const FIELDS: &'static [&'static str];

    /// Bodies reject keys outside `FIELDS`; queries ignore them.
    const DENY_UNKNOWN: bool = true;
}

fn normalize(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Picks the failure for the earliest field in `fields`, then any
/// struct-level failure, so one message is reported per request.
pub fn first_message(errors: &ValidationErrors, fields: &[&str]) -> String {
    let field_errors = errors.field_errors();

    let mut ranked: Vec<(usize, String, String)> = field_errors
        .iter()
        .filter_map(|(key, errs)| {
            let key: &str = key;
            let err = errs.first()?;
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("\"{}\" is invalid", key));
            let wanted = normalize(key);
            let rank = fields
                .iter()
                .position(|f| normalize(f) == wanted)
                .unwrap_or(if key == "__all__" {
                    fields.len()
                } else {
                    fields.len() + 1
                });
            Some((rank, key.to_string(), message))
        })
        .collect();
    ranked.sort();

    ranked
        .into_iter()
        .next()
        .map(|(_, _, message)| message)
        .unwrap_or_else(|| "Invalid request".to_string())
}

/// Joi-style wording for a serde type mismatch at `path`.
fn mismatch_message(path: &str, cause: &str) -> String {
    let field = path.rsplit('.').next().unwrap_or(path);
    if field.is_empty() || field == "." {
        return "\"value\" must be of type object".to_string();
    }

    let expected = cause
        .split_once("expected ")
        .map(|(_, rest)| rest)
        .unwrap_or_default();
    let numeric = expected
        .strip_prefix(['i', 'u', 'f'])
        .is_some_and(|bits| bits.starts_with(|c: char| c.is_ascii_digit()));

    let kind = if numeric
        || cause.contains("invalid digit")
        || cause.contains("parse integer")
        || cause.contains("too large")
        || cause.contains("too small")
    {
        "a number"
    } else if expected.starts_with("a boolean") || cause.contains("`true` or `false`") {
        "a boolean"
    } else if expected.starts_with("a string") || expected.starts_with("a borrowed string") {
        "a string"
    } else if expected.starts_with("a sequence") {
        "an array"
    } else if expected.starts_with("struct") || expected.starts_with("a map") {
        "of type object"
    } else {
        return format!("\"{field}\" is invalid");
    };
    format!("\"{field}\" must be {kind}")
}

fn check<T: Schema>(value: T) -> Result<T, ApiError> {
    match value.validate() {
        Ok(()) => Ok(value),
        Err(errors) => Err(ApiError::bad_request(first_message(&errors, T::FIELDS))),
    }
}

fn decode_body<T: Schema>(bytes: &[u8]) -> Result<T, ApiError> {
    let value: Value = if bytes.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Default::default())
    } else {
        serde_json::from_slice(bytes)
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {e}")))?
    };

    let Value::Object(map) = &value else {
        return Err(ApiError::bad_request("\"value\" must be of type object"));
    };
    if T::DENY_UNKNOWN {
        if let Some(key) = map.keys().find(|k| !T::FIELDS.contains(&k.as_str())) {
            return Err(ApiError::bad_request(format!("\"{key}\" is not allowed")));
        }
    }

    serde_path_to_error::deserialize(value).map_err(|e| {
        ApiError::bad_request(mismatch_message(&e.path().to_string(), &e.inner().to_string()))
    })
}

fn decode_query<T: Schema>(query: &str) -> Result<T, ApiError> {
    let deserializer =
        serde_urlencoded::Deserializer::new(form_urlencoded::parse(query.as_bytes()));
    serde_path_to_error::deserialize(deserializer).map_err(|e| {
        ApiError::bad_request(mismatch_message(&e.path().to_string(), &e.inner().to_string()))
    })
}

/// JSON body extractor backed by a [`Schema`]. An empty body counts as `{}`.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: Schema,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::PayloadTooLarge
            } else {
                ApiError::bad_request(e.body_text())
            }
        })?;
        let value = decode_body::<T>(&bytes)?;
        check(value).map(ValidatedJson)
    }
}

/// Query-string extractor backed by a [`Schema`].
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: Schema,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = decode_query::<T>(parts.uri.query().unwrap_or_default())?;
        check(value).map(ValidatedQuery)
    }
}
