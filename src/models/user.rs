use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Self-reported availability, set through `PATCH /users/self`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Ooo,
    Idle,
    Active,
}

impl Availability {
    pub const VARIANTS: [&'static str; 3] = ["ooo", "idle", "active"];
}

impl FromStr for Availability {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ooo" => Ok(Self::Ooo),
            "idle" => Ok(Self::Idle),
            "active" => Ok(Self::Active),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ooo => "ooo",
            Self::Idle => "idle",
            Self::Active => "active",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Roles {
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub super_user: bool,
    #[serde(default)]
    pub member: bool,
    #[serde(default)]
    pub in_discord: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Picture {
    pub url: String,
    #[serde(rename = "publicId", default)]
    pub public_id: Option<String>,
}

/// Fields any caller may see.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Profile {
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub yoe: Option<u32>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub picture: Option<Picture>,
    #[serde(rename = "profileURL", default)]
    pub profile_url: Option<String>,
    #[serde(default)]
    pub github_id: Option<String>,
    #[serde(default)]
    pub github_display_name: Option<String>,
    #[serde(default)]
    pub linkedin_id: Option<String>,
    #[serde(default)]
    pub twitter_id: Option<String>,
    #[serde(default)]
    pub instagram_id: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(rename = "discordId", default)]
    pub discord_id: Option<String>,
    #[serde(rename = "isMember", default)]
    pub is_member: bool,
    #[serde(default)]
    pub status: Option<Availability>,
    #[serde(default)]
    pub roles: Roles,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields only the owner sees, and only when asking for them.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct User {
    pub id: String,
    #[serde(flatten)]
    pub profile: Profile,
    #[serde(flatten)]
    pub contact: Contact,
    #[serde(default)]
    pub chaincode: Option<String>,
}

impl User {
    pub fn username(&self) -> &str {
        &self.profile.username
    }

    pub fn is_super_user(&self) -> bool {
        self.profile.roles.super_user
    }

    pub fn public(&self) -> UserView<'_> {
        UserView {
            id: &self.id,
            profile: &self.profile,
            contact: None,
        }
    }

    pub fn private(&self) -> UserView<'_> {
        UserView {
            id: &self.id,
            profile: &self.profile,
            contact: Some(&self.contact),
        }
    }
}

/// Response projection of a [`User`]. Never carries the chaincode.
#[derive(Debug, Serialize)]
pub struct UserView<'a> {
    id: &'a str,
    #[serde(flatten)]
    profile: &'a Profile,
    #[serde(flatten)]
    contact: Option<&'a Contact>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Chaincode {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
}
