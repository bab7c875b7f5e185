// Test utilities for in-process router tests
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

use member_api::config::{AppConfig, AuthConfig, DiscordConfig, LogConfig, ServerConfig};
use member_api::router::create_router;
use member_api::services::auth::TokenService;
use member_api::services::discord::DiscordClient;
use member_api::services::store::Store;
use member_api::state::AppState;

pub const COOKIE_NAME: &str = "member-session";
pub const JWT_SECRET: &str = "integration-test-secret";
pub const UNVERIFIED_ROLE: &str = "unverified-role";

pub fn test_config(bot_url: &str) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            max_request_size: 1024 * 1024,
            seed_file: None,
        },
        auth: AuthConfig {
            jwt_secret: JWT_SECRET.to_string(),
            cookie_name: COOKIE_NAME.to_string(),
            token_ttl_secs: 3600,
        },
        log: LogConfig {
            level: "error".to_string(), // Quiet during tests
            format: "pretty".to_string(),
        },
        discord: DiscordConfig {
            bot_url: bot_url.to_string(),
            bot_token: "bot-token".to_string(),
            unverified_role_id: UNVERIFIED_ROLE.to_string(),
            timeout_secs: 2,
        },
    }
}

pub struct TestServer {
    pub app: Router,
    pub store: Store,
    pub tokens: TokenService,
}

impl TestServer {
    /// Nothing listens on this bot URL; use [`TestServer::with_bot_url`]
    /// for tests that reach Discord.
    pub fn new() -> Self {
        Self::with_bot_url("http://127.0.0.1:9")
    }

    pub fn with_bot_url(bot_url: &str) -> Self {
        let config = test_config(bot_url);
        let tokens = TokenService::from_config(&config.auth).expect("token service");
        let directory = DiscordClient::new(&config.discord).expect("discord client");
        let store = Store::new();

        let state = AppState {
            config: Arc::new(config),
            store: store.clone(),
            tokens: tokens.clone(),
            directory: Arc::new(directory),
        };

        Self {
            app: create_router(state),
            store,
            tokens,
        }
    }

    pub fn token_for(&self, user_id: &str) -> String {
        self.tokens.generate(user_id).expect("sign token")
    }

    pub async fn call(&self, req: Request<Body>) -> axum::response::Response {
        self.app.clone().oneshot(req).await.unwrap()
    }

    /// Sends the request and returns the status with the parsed JSON body
    /// (`Value::Null` for an empty body).
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        body: Option<&str>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let response = self.call(self.make_request(method, uri, body, token)).await;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body should be JSON")
        };
        (status, json)
    }

    pub fn make_request(
        &self,
        method: &str,
        uri: &str,
        body: Option<&str>,
        token: Option<&str>,
    ) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("Cookie", format!("{COOKIE_NAME}={token}"));
        }

        if let Some(body_str) = body {
            builder = builder.header("Content-Type", "application/json");
            builder.body(Body::from(body_str.to_string())).unwrap()
        } else {
            builder.body(Body::empty()).unwrap()
        }
    }
}
