use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use taskd::{
    config::ServerConfig,
    rest::{self, auth::TokenMap},
    storage::Storage,
    AppContext,
};

#[derive(Parser)]
#[command(name = "taskd", about = "taskd — personal task management REST service", version)]
struct Args {
    /// HTTP server port
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Data directory for the SQLite database, config, and token registry
    #[arg(long, env = "TASKD_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TASKD_LOG")]
    log: Option<String>,

    /// Bind address (default: 127.0.0.1; use 0.0.0.0 for LAN access)
    #[arg(long, env = "TASKD_BIND")]
    bind_address: Option<String>,

    /// Log format: compact or json
    #[arg(long, env = "TASKD_LOG_FORMAT")]
    log_format: Option<String>,
}

fn init_tracing(log_level: &str, log_format: &str) {
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(log_level)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(log_level)
            .compact()
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = ServerConfig::new(
        args.port,
        args.data_dir,
        args.log,
        args.bind_address,
        args.log_format,
    );
    init_tracing(&config.log, &config.log_format);

    info!("data dir: {}", config.data_dir.display());
    let storage = Storage::new(&config.data_dir).await?;
    let identity = Arc::new(TokenMap::load(&config.data_dir)?);

    let ctx = Arc::new(AppContext::new(config, storage, identity));
    rest::start_rest_server(ctx).await
}
