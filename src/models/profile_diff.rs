use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::Profile;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Approval {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "APPROVED")]
    Approved,
    #[serde(rename = "NOT APPROVED")]
    NotApproved,
}

/// Profile fields that go through approval before they reach the user document.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ProfileChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yoe: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Later values win; fields absent from `newer` are kept.
    pub fn merge(&mut self, newer: ProfileChanges) {
        fn take<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }
        take(&mut self.first_name, newer.first_name);
        take(&mut self.last_name, newer.last_name);
        take(&mut self.yoe, newer.yoe);
        take(&mut self.company, newer.company);
        take(&mut self.designation, newer.designation);
        take(&mut self.github_id, newer.github_id);
        take(&mut self.linkedin_id, newer.linkedin_id);
        take(&mut self.twitter_id, newer.twitter_id);
        take(&mut self.instagram_id, newer.instagram_id);
        take(&mut self.website, newer.website);
    }

    pub fn apply_to(&self, profile: &mut Profile) {
        fn put<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
            if let Some(v) = value {
                *slot = Some(v.clone());
            }
        }
        put(&mut profile.first_name, &self.first_name);
        put(&mut profile.last_name, &self.last_name);
        put(&mut profile.yoe, &self.yoe);
        put(&mut profile.company, &self.company);
        put(&mut profile.designation, &self.designation);
        put(&mut profile.github_id, &self.github_id);
        put(&mut profile.linkedin_id, &self.linkedin_id);
        put(&mut profile.twitter_id, &self.twitter_id);
        put(&mut profile.instagram_id, &self.instagram_id);
        put(&mut profile.website, &self.website);
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProfileDiff {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(flatten)]
    pub changes: ProfileChanges,
    pub approval: Approval,
    #[serde(default)]
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
}
