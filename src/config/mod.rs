use config::{Config, ConfigError};
use serde::Deserialize;
use std::env;
use validator::Validate;

const DEFAULT_MAX_REQUEST_SIZE: usize = 1024 * 1024;
const DEFAULT_TOKEN_TTL_SECS: u64 = 30 * 24 * 3600;
const DEFAULT_DISCORD_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct ServerConfig {
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(range(min = 1, max = 65535))]
    pub port: u16,
    #[serde(default = "default_max_request_size")]
    pub max_request_size: usize,
    /// JSON array of users loaded into the store at startup.
    #[serde(default)]
    pub seed_file: Option<String>,
}

fn default_max_request_size() -> usize {
    DEFAULT_MAX_REQUEST_SIZE
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[validate(length(min = 1))]
    pub cookie_name: String,
    #[validate(range(min = 1))]
    pub token_ttl_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct LogConfig {
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_format() -> String {
    "pretty".to_string()
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct DiscordConfig {
    #[validate(length(min = 1))]
    pub bot_url: String,
    pub bot_token: String,
    #[validate(length(min = 1))]
    pub unverified_role_id: String,
    #[validate(range(min = 1))]
    #[serde(default = "default_discord_timeout")]
    pub timeout_secs: u64,
}

fn default_discord_timeout() -> u64 {
    DEFAULT_DISCORD_TIMEOUT_SECS
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct AppConfig {
    #[validate(nested)]
    pub server: ServerConfig,
    #[validate(nested)]
    pub auth: AuthConfig,
    #[validate(nested)]
    pub log: LogConfig,
    #[validate(nested)]
    pub discord: DiscordConfig,
}

fn parse_port(value: &str) -> Result<i64, ConfigError> {
    value.parse::<i64>().map_err(|e| {
        ConfigError::Message(format!(
            "Invalid port value '{}': {}. Port must be a number between 1 and 65535.",
            value, e
        ))
    })
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.max_request_size", DEFAULT_MAX_REQUEST_SIZE as i64)?
            .set_default("auth.jwt_secret", "")?
            .set_default("auth.cookie_name", "member-session")?
            .set_default("auth.token_ttl_secs", DEFAULT_TOKEN_TTL_SECS)?
            .set_default("log.level", "info")?
            .set_default("log.format", "pretty")?
            .set_default("discord.bot_url", "http://localhost:8787")?
            .set_default("discord.bot_token", "")?
            .set_default("discord.unverified_role_id", "unverified")?
            .set_default("discord.timeout_secs", DEFAULT_DISCORD_TIMEOUT_SECS)?
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.host", env::var("APP_SERVER__HOST").ok())?
            .set_override_option(
                "server.port",
                env::var("APP_SERVER__PORT")
                    .ok()
                    .map(|v| parse_port(&v))
                    .transpose()?,
            )?
            .set_override_option("auth.jwt_secret", env::var("APP_AUTH__JWT_SECRET").ok())?
            .build()?;

        let config: AppConfig = s.try_deserialize()?;

        if let Err(e) = config.validate() {
            return Err(ConfigError::Message(format!("Validation error: {}", e)));
        }

        if config.auth.jwt_secret.is_empty() {
            return Err(ConfigError::Message(
                "APP_AUTH__JWT_SECRET is required to sign session tokens".into(),
            ));
        }

        Ok(config)
    }
}
