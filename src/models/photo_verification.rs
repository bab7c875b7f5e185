use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ImageCheck {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub approved: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct PhotoVerification {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "discordId", default)]
    pub discord_id: Option<String>,
    #[serde(default)]
    pub profile: ImageCheck,
    #[serde(default)]
    pub discord: ImageCheck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Profile,
    Discord,
}

impl ImageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Discord => "discord",
        }
    }
}

impl FromStr for ImageKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "profile" => Ok(Self::Profile),
            "discord" => Ok(Self::Discord),
            _ => Err(()),
        }
    }
}

impl PhotoVerification {
    pub fn approve(&mut self, kind: ImageKind) {
        match kind {
            ImageKind::Profile => self.profile.approved = true,
            ImageKind::Discord => self.discord.approved = true,
        }
    }
}
