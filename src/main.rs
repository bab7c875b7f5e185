use member_api::config::AppConfig;
use member_api::models::user::User;
use member_api::router::create_router;
use member_api::services::auth::TokenService;
use member_api::services::discord::DiscordClient;
use member_api::services::store::Store;
use member_api::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

async fn setup_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => Some(s),
            Err(e) => {
                warn!("Failed to register SIGTERM handler: {}", e);
                None
            }
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, initiating graceful shutdown");
            }
            () = async {
                if let Some(ref mut sigterm) = sigterm {
                    if sigterm.recv().await.is_none() {
                        warn!("SIGTERM signal stream closed unexpectedly");
                    }
                }
            } => {
                info!("Received SIGTERM, initiating graceful shutdown");
            }
        }
    }
    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            return;
        }
        info!("Received Ctrl+C, initiating graceful shutdown");
    }
}

fn setup_logging(config: &AppConfig) {
    let filter = EnvFilter::try_new(format!(
        "{level},tower_http=debug",
        level = config.log.level
    ))
    .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    match config.log.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(false)
                        .with_file(true)
                        .with_line_number(true)
                        .with_current_span(true)
                        .with_span_list(true),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .init();
        }
    }
}

async fn seed_store(store: &Store, path: &str) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read seed file {path}: {e}"))?;
    let users: Vec<User> = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("Invalid seed file {path}: {e}"))?;
    let loaded = store
        .load_users(users)
        .await
        .map_err(|e| anyhow::anyhow!("Seed file {path} rejected: {e}"))?;
    info!("Seeded {loaded} users from {path}");
    Ok(())
}

async fn initialize_state(config: AppConfig) -> anyhow::Result<AppState> {
    let tokens = TokenService::from_config(&config.auth).map_err(|e| {
        error!("Failed to initialize TokenService: {e}");
        anyhow::anyhow!("TokenService initialization failed: {e}")
    })?;
    let directory = DiscordClient::new(&config.discord)?;

    let store = Store::new();
    if let Some(path) = &config.server.seed_file {
        seed_store(&store, path).await?;
    }

    Ok(AppState {
        config: Arc::new(config),
        store,
        tokens,
        directory: Arc::new(directory),
    })
}

async fn run_server(app: axum::Router, host: &str, port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address {host}:{port}: {e}"))?;

    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let server = axum::serve(listener, app).with_graceful_shutdown(setup_shutdown_signal());

    if let Err(e) = server.await {
        error!("Server error: {e}");
        return Err(anyhow::anyhow!("Server failed: {e}"));
    }

    info!("Server shutdown complete");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::new().map_err(|e| {
        anyhow::anyhow!(
            "Failed to load configuration: {e}. Please check your environment variables and configuration."
        )
    })?;

    setup_logging(&config);

    info!("Starting member-api v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Config loaded: Host={}, Port={}, Discord bot={}",
        config.server.host, config.server.port, config.discord.bot_url
    );

    let host = config.server.host.clone();
    let port = config.server.port;
    let state = initialize_state(config).await?;
    let app = create_router(state);

    run_server(app, &host, port).await
}
