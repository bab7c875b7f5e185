use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::config::DiscordConfig;

const DISCORD_CDN: &str = "https://cdn.discordapp.com";
/// Role calls in flight at once.
const ROLE_CONCURRENCY: usize = 8;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct DiscordUser {
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct DiscordMember {
    pub user: DiscordUser,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl DiscordMember {
    pub fn avatar_url(&self) -> Option<String> {
        self.user
            .avatar
            .as_ref()
            .map(|hash| format!("{DISCORD_CDN}/avatars/{}/{hash}.png", self.user.id))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Directory returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Invalid directory response: {0}")]
    Decode(String),
}

impl From<DirectoryError> for crate::errors::ApiError {
    fn from(err: DirectoryError) -> Self {
        crate::errors::ApiError::internal(err)
    }
}

/// The guild member directory roles are applied through.
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    async fn list_members(&self) -> Result<Vec<DiscordMember>, DirectoryError>;

    async fn add_role(&self, member_id: &str, role_id: &str) -> Result<(), DirectoryError>;

    async fn find_member(&self, member_id: &str) -> Result<Option<DiscordMember>, DirectoryError> {
        let members = self.list_members().await?;
        Ok(members.into_iter().find(|m| m.user.id == member_id))
    }
}

#[derive(Serialize)]
struct AddRoleBody<'a> {
    userid: &'a str,
    roleid: &'a str,
}

/// HTTP client for the Discord bot service.
pub struct DiscordClient {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl DiscordClient {
    pub fn new(config: &DiscordConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {e}"))?;

        Ok(Self {
            base_url: config.bot_url.trim_end_matches('/').to_string(),
            token: config.bot_token.clone(),
            client,
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if self.token.is_empty() {
            builder
        } else {
            builder.bearer_auth(&self.token)
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, DirectoryError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        error!("Discord bot error: {} - {}", status, body);
        Err(DirectoryError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl MemberDirectory for DiscordClient {
    async fn list_members(&self) -> Result<Vec<DiscordMember>, DirectoryError> {
        let response = self
            .request(reqwest::Method::GET, "/discord-members")
            .send()
            .await
            .map_err(|e| DirectoryError::Network(e.to_string()))?;
        let response = Self::check(response).await?;
        response
            .json::<Vec<DiscordMember>>()
            .await
            .map_err(|e| DirectoryError::Decode(e.to_string()))
    }

    async fn add_role(&self, member_id: &str, role_id: &str) -> Result<(), DirectoryError> {
        let response = self
            .request(reqwest::Method::PUT, "/roles/add")
            .json(&AddRoleBody {
                userid: member_id,
                roleid: role_id,
            })
            .send()
            .await
            .map_err(|e| DirectoryError::Network(e.to_string()))?;
        Self::check(response).await?;
        Ok(())
    }
}

/// Gives `role_id` to every guild member that is not linked to a user
/// (`linked` holds the linked Discord ids) and does not hold it yet.
/// Returns the ids the role was applied to.
pub async fn apply_unverified_role(
    directory: &dyn MemberDirectory,
    linked: &HashSet<String>,
    role_id: &str,
) -> Result<Vec<String>, DirectoryError> {
    let members = directory.list_members().await?;

    let targets: Vec<String> = members
        .into_iter()
        .filter(|m| !linked.contains(&m.user.id))
        .filter(|m| !m.roles.iter().any(|r| r == role_id))
        .map(|m| m.user.id)
        .collect();

    if targets.is_empty() {
        info!("No guild members need the unverified role");
        return Ok(targets);
    }

    let results: Vec<(String, Result<(), DirectoryError>)> = stream::iter(targets)
        .map(|id| async move {
            let result = directory.add_role(&id, role_id).await;
            (id, result)
        })
        .buffer_unordered(ROLE_CONCURRENCY)
        .collect()
        .await;

    let mut applied = Vec::new();
    let mut first_error = None;
    for (id, result) in results {
        match result {
            Ok(()) => applied.push(id),
            Err(e) => {
                warn!("Applying unverified role to {} failed: {}", id, e);
                first_error.get_or_insert(e);
            }
        }
    }
    applied.sort();

    if let Some(e) = first_error {
        warn!("Unverified role applied only to {:?}", applied);
        return Err(e);
    }

    info!("Applied unverified role to {} members", applied.len());
    Ok(applied)
}
