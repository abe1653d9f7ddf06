use anyhow::Context;
use clap::Parser;
use formcheck_api::{serve, ApiConfig, AppState};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "formcheck-server", version, about = "Pose comparison and coaching API")]
struct Args {
    /// Configuration file (TOML, JSON or YAML); environment only when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the bind address
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ApiConfig::from_file(&path.to_string_lossy())
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ApiConfig::from_env().context("loading config from environment")?,
    };
    if let Some(bind) = args.bind {
        config.http.bind_addr = bind;
    }

    let state = AppState::from_config(&config).context("initializing application state")?;

    serve(config, state).await.context("server error")?;
    Ok(())
}
