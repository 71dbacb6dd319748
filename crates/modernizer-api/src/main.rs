use anyhow::{Context, Result};
use clap::Parser;
use modernizer_api::{AppState, Server};
use modernizer_core::ConfigManager;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "modernizer-api",
    version,
    about = "HTTP service for legacy code ingestion, documentation and target code generation"
)]
struct Cli {
    /// Directory holding default.toml, {env}.toml and local.toml
    #[arg(long, env = "MODERNIZER_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Configuration environment (development, production, ...)
    #[arg(long)]
    env: Option<String>,

    /// Bind address, overrides server.host
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overrides server.port
    #[arg(short, long)]
    port: Option<u16>,

    /// Artifact root directory, overrides storage.output_root
    #[arg(long)]
    output_root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let manager = ConfigManager::new(cli.config_dir, cli.env);
    let mut settings = manager.load()?;
    if let Some(host) = cli.host {
        settings.server.host = host;
    }
    if let Some(port) = cli.port {
        settings.server.port = port;
    }
    if let Some(output_root) = cli.output_root {
        settings.storage.output_root = output_root;
    }
    settings.validate()?;

    let default_directive = format!(
        "modernizer_api={level},modernizer_core={level},modernizer_ai={level},tower_http={level}",
        level = settings.logging.level
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Loaded configuration from {:?} (env: {})",
        manager.config_dir(),
        manager.env()
    );

    let addr = tokio::net::lookup_host((settings.server.host.as_str(), settings.server.port))
        .await
        .with_context(|| format!("resolving {}:{}", settings.server.host, settings.server.port))?
        .next()
        .with_context(|| format!("no address for {}", settings.server.host))?;

    let state = AppState::new(settings)?;
    Server::new(state, addr).run().await
}
