use serde::Deserialize;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use super::user::Availability;
use crate::validation::Schema;

fn invalid(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(message))
}

fn validate_availability(value: &str) -> Result<(), ValidationError> {
    value.parse::<Availability>().map(|_| ()).map_err(|_| {
        invalid(
            "status",
            format!(
                "\"status\" must be one of [{}]",
                Availability::VARIANTS.join(", ")
            ),
        )
    })
}

fn validate_username(value: &str) -> Result<(), ValidationError> {
    let well_formed = value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !well_formed {
        return Err(invalid(
            "username",
            "\"username\" must only contain lowercase alpha-numeric characters".to_string(),
        ));
    }
    Ok(())
}

/// `PATCH /users/self`
#[derive(Debug, Deserialize, Validate, Default)]
pub struct UpdateSelfRequest {
    #[validate(
        length(min = 4, max = 20, message = "\"username\" length must be between 4 and 20 characters"),
        custom(function = "validate_username")
    )]
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email(message = "\"email\" must be a valid email"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub yoe: Option<u32>,
    pub company: Option<String>,
    pub designation: Option<String>,
    pub img: Option<String>,
    pub github_display_name: Option<String>,
    pub linkedin_id: Option<String>,
    pub twitter_id: Option<String>,
    pub instagram_id: Option<String>,
    pub website: Option<String>,
    #[validate(custom(function = "validate_availability"))]
    pub status: Option<String>,
}

impl Schema for UpdateSelfRequest {
    const FIELDS: &'static [&'static str] = &[
        "username",
        "first_name",
        "last_name",
        "email",
        "phone",
        "yoe",
        "company",
        "designation",
        "img",
        "github_display_name",
        "linkedin_id",
        "twitter_id",
        "instagram_id",
        "website",
        "status",
    ];
}

/// `PATCH /users/profileURL`
#[derive(Debug, Deserialize, Validate)]
pub struct ProfileUrlRequest {
    #[serde(rename = "profileURL")]
    #[validate(
        required(message = "\"profileURL\" is required"),
        url(message = "\"profileURL\" must be a valid uri")
    )]
    pub profile_url: Option<String>,
}

impl Schema for ProfileUrlRequest {
    const FIELDS: &'static [&'static str] = &["profileURL"];
}

/// `PATCH /users/rejectDiff`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RejectDiffRequest {
    #[validate(
        required(message = "\"profileDiffId\" is required"),
        length(min = 1, message = "\"profileDiffId\" is not allowed to be empty")
    )]
    pub profile_diff_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Schema for RejectDiffRequest {
    const FIELDS: &'static [&'static str] = &["profileDiffId", "message"];
}

/// `PATCH /users/:id`: approves the diff `id` with the fields as reviewed.
#[derive(Debug, Deserialize, Validate)]
pub struct ApproveDiffRequest {
    #[validate(
        required(message = "\"id\" is required"),
        length(min = 1, message = "\"id\" is not allowed to be empty")
    )]
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub yoe: Option<u32>,
    pub company: Option<String>,
    pub designation: Option<String>,
    pub github_id: Option<String>,
    pub linkedin_id: Option<String>,
    pub twitter_id: Option<String>,
    pub instagram_id: Option<String>,
    pub website: Option<String>,
    pub message: Option<String>,
}

impl Schema for ApproveDiffRequest {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "first_name",
        "last_name",
        "yoe",
        "company",
        "designation",
        "github_id",
        "linkedin_id",
        "twitter_id",
        "instagram_id",
        "website",
        "message",
    ];
}

/// `PUT /users/self/intro`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    #[validate(required(message = "\"firstName\" is required"))]
    pub first_name: Option<String>,
    #[validate(required(message = "\"lastName\" is required"))]
    pub last_name: Option<String>,
    #[validate(required(message = "\"city\" is required"))]
    pub city: Option<String>,
    #[validate(required(message = "\"state\" is required"))]
    pub state: Option<String>,
    #[validate(required(message = "\"country\" is required"))]
    pub country: Option<String>,
    #[validate(required(message = "\"foundFrom\" is required"))]
    pub found_from: Option<String>,
    #[validate(
        required(message = "\"introduction\" is required"),
        length(min = 100, message = "\"introduction\" length must be at least 100 characters long")
    )]
    pub introduction: Option<String>,
    #[validate(required(message = "\"skills\" is required"))]
    pub skills: Option<String>,
    #[validate(required(message = "\"college\" is required"))]
    pub college: Option<String>,
    #[validate(
        required(message = "\"forFun\" is required"),
        length(min = 100, message = "\"forFun\" length must be at least 100 characters long")
    )]
    pub for_fun: Option<String>,
    #[validate(
        required(message = "\"funFact\" is required"),
        length(min = 100, message = "\"funFact\" length must be at least 100 characters long")
    )]
    pub fun_fact: Option<String>,
    #[validate(
        required(message = "\"whyRds\" is required"),
        length(min = 100, message = "\"whyRds\" length must be at least 100 characters long")
    )]
    pub why_rds: Option<String>,
    pub flow_state: Option<String>,
    #[validate(
        required(message = "\"numberOfHours\" is required"),
        range(min = 1, max = 100, message = "\"numberOfHours\" must be between 1 and 100")
    )]
    pub number_of_hours: Option<u32>,
}

impl Schema for JoinRequest {
    const FIELDS: &'static [&'static str] = &[
        "firstName",
        "lastName",
        "city",
        "state",
        "country",
        "foundFrom",
        "introduction",
        "skills",
        "college",
        "forFun",
        "funFact",
        "whyRds",
        "flowState",
        "numberOfHours",
    ];
}

/// Query of `GET /users`.
#[derive(Debug, Deserialize, Validate, Default)]
#[validate(schema(function = "validate_cursor_params"))]
pub struct UsersQuery {
    #[validate(range(min = 1, max = 100, message = "size must be in range 1-100"))]
    pub size: Option<i64>,
    #[validate(range(min = 0, message = "page must be a positive number"))]
    pub page: Option<i64>,
    pub next: Option<String>,
    pub prev: Option<String>,
    #[validate(length(min = 1, message = "\"search\" is not allowed to be empty"))]
    pub search: Option<String>,
    pub id: Option<String>,
}

fn validate_cursor_params(query: &UsersQuery) -> Result<(), ValidationError> {
    let conflict = match (&query.next, &query.prev, &query.page) {
        (Some(_), Some(_), _) => Some("Both prev and next can't be passed"),
        (Some(_), None, Some(_)) => Some("Both page and next can't be passed"),
        (None, Some(_), Some(_)) => Some("Both page and prev can't be passed"),
        _ => None,
    };
    match conflict {
        Some(message) => Err(invalid("cursor", message.to_string())),
        None => Ok(()),
    }
}

impl Schema for UsersQuery {
    const FIELDS: &'static [&'static str] = &["size", "page", "next", "prev", "search", "id"];
    const DENY_UNKNOWN: bool = false;
}

/// Query of `GET /users/self`.
#[derive(Debug, Deserialize, Validate, Default)]
pub struct SelfQuery {
    #[serde(default)]
    pub private: bool,
}

impl Schema for SelfQuery {
    const FIELDS: &'static [&'static str] = &["private"];
    const DENY_UNKNOWN: bool = false;
}

/// Query of `PATCH /users/picture/verify/:id`.
#[derive(Debug, Deserialize, Validate, Default)]
pub struct VerifyPictureQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl Schema for VerifyPictureQuery {
    const FIELDS: &'static [&'static str] = &["type"];
    const DENY_UNKNOWN: bool = false;
}
