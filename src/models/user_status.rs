use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusState {
    Active,
    Idle,
    Ooo,
    Onboarding,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentStatus {
    pub state: StatusState,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub until: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyHours {
    pub committed: u32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserStatus {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub current_status: Option<CurrentStatus>,
    #[serde(default)]
    pub monthly_hours: Option<MonthlyHours>,
}

/// Partial status write; `None` leaves the stored part untouched.
#[derive(Debug, Clone, Default)]
pub struct StatusUpdate {
    pub state: Option<StatusState>,
    pub message: Option<String>,
    pub committed_hours: Option<u32>,
}

impl UserStatus {
    pub fn apply(&mut self, update: StatusUpdate, now: DateTime<Utc>) {
        if let Some(state) = update.state {
            let message = update
                .message
                .or_else(|| self.current_status.as_ref().map(|c| c.message.clone()))
                .unwrap_or_default();
            self.current_status = Some(CurrentStatus {
                state,
                message,
                from: Some(now),
                until: None,
                updated_at: now,
            });
        }
        if let Some(committed) = update.committed_hours {
            self.monthly_hours = Some(MonthlyHours {
                committed,
                updated_at: now,
            });
        }
    }
}
