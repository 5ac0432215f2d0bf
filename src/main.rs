use anyhow::{Context as _, Result};
use caselink_auth::TokenManager;
use caselink_config::{Config, LogConfig};
use caselink_server::AppState;
use caselink_types::{BearerToken, ResourceKind};
use caselink_upstream::{Endpoints, ResourceClient};
use clap::{Parser, Subcommand};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

const DEFAULT_LOG_FILE: &str = "caselink.log";

#[derive(Parser, Debug)]
#[command(
    name = "caselink",
    version,
    about = "caselink — Slack slash commands for Figure 1 cases, profiles and collections"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in to the upstream API and start the webhook server.
    Serve {
        /// Path to the YAML or JSON configuration file.
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Override the listening port (default: 3200).
        #[arg(short, long)]
        port: Option<u16>,
        /// Override the listening address (default: 0.0.0.0).
        #[arg(long)]
        host: Option<String>,
    },
    /// Check that the configured credentials are accepted upstream.
    Login {
        /// Path to the YAML or JSON configuration file.
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Print the identifier a slash command would resolve.
    Extract {
        /// Resource kind (case / user / collection).
        kind: String,
        /// Raw id or link, as typed after the slash command.
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, port, host } => cmd_serve(config, port, host).await,
        Commands::Login { config } => cmd_login(config).await,
        Commands::Extract { kind, text } => cmd_extract(&kind, &text),
    }
}

async fn cmd_serve(
    config_path: Option<PathBuf>,
    port: Option<u16>,
    host: Option<String>,
) -> Result<()> {
    let mut config = load_config(config_path.as_deref())?;
    if let Some(p) = port {
        config.port = p;
    }
    if let Some(h) = host {
        config.host = h;
    }

    let _guard = init_tracing(&config.log);
    config.validate()?;

    let http = reqwest::Client::new();
    let auth = Arc::new(token_manager(&config, http.clone())?);
    auth.authenticate()
        .await
        .context("failed to retrieve bearer token")?;

    let endpoints = Endpoints::new(
        config.upstream.base_url.clone(),
        config.upstream.collections_base(),
    );
    let fetcher = Arc::new(ResourceClient::new(http.clone(), endpoints, auth));

    let addr = config.listen_addr();
    let state = AppState::new(Arc::new(config), fetcher, http);
    let app = caselink_server::make_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "caselink listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn cmd_login(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path.as_deref())?;
    let _guard = init_tracing(&config.log);
    config.validate()?;

    let auth = token_manager(&config, reqwest::Client::new())?;
    auth.authenticate().await.context("login failed")?;
    eprintln!("logged in as {}", config.email);
    Ok(())
}

fn cmd_extract(kind: &str, text: &str) -> Result<()> {
    let kind: ResourceKind = kind
        .parse()
        .with_context(|| format!("unknown resource kind '{kind}'"))?;
    let id = caselink_extract::extract_or_err(kind, text.trim())?;
    println!("{id}");
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            Config::from_file(path).map_err(|e| anyhow::anyhow!("config error: {e}"))
        }
        None => Config::from_env().map_err(|e| anyhow::anyhow!("config error: {e}")),
    }
}

fn token_manager(config: &Config, http: reqwest::Client) -> Result<TokenManager> {
    Ok(TokenManager::new(
        http,
        &config.upstream.base_url,
        config.credential(),
        Arc::new(BearerToken::new()),
    )?)
}

/// Installs the global subscriber. `RUST_LOG` wins over `log.level`.
///
/// The returned guard flushes the file writer and must outlive the server.
fn init_tracing(log: &LogConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let registry = tracing_subscriber::registry().with(filter);

    if let Some(file) = log.file.as_deref() {
        let path = Path::new(file);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let name = path
            .file_name()
            .map_or_else(|| DEFAULT_LOG_FILE.into(), |n| n.to_os_string());
        let (writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, name));
        registry
            .with(fmt::layer().with_writer(writer).with_ansi(false))
            .init();
        Some(guard)
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
        None
    }
}
