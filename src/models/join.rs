use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Biodata {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Location {
    pub city: String,
    pub state: String,
    pub country: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Intro {
    pub introduction: String,
    pub skills: String,
    pub college: String,
    pub for_fun: String,
    pub fun_fact: String,
    pub why_rds: String,
    #[serde(default)]
    pub flow_state: Option<String>,
    pub number_of_hours: u32,
}

/// Answers a prospective member submits while joining.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JoinData {
    pub user_id: String,
    pub biodata: Biodata,
    pub location: Location,
    pub found_from: String,
    pub intro: Intro,
    pub timestamp: DateTime<Utc>,
}
