//! Mock market data API for the heatmap dashboard

mod mock;
mod routes;

use std::fs::OpenOptions;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(version, about = "Mock market data API for the heatmap dashboard")]
struct Config {
    /// Address to listen on
    #[arg(long, env = "HEATMAP_BIND", default_value = "127.0.0.1:8080")]
    bind: SocketAddr,
    /// Serve the built frontend from this directory
    #[arg(long, env = "HEATMAP_STATIC_DIR")]
    static_dir: Option<PathBuf>,
    /// Also append logs to this file
    #[arg(long, env = "HEATMAP_LOG_FILE")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum ServerError {
    #[error("failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to install logger: {0}")]
    Logger(String),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

fn init_logging(log_file: Option<&Path>) -> Result<(), ServerError> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    let registry = tracing_subscriber::registry().with(filter).with(fmt::layer());

    let installed = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| ServerError::LogFile {
                    path: path.to_path_buf(),
                    source,
                })?;
            registry
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .try_init()
        }
        None => registry.try_init(),
    };
    installed.map_err(|e| ServerError::Logger(e.to_string()))
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let config = Config::parse();
    init_logging(config.log_file.as_deref())?;

    let app = routes::router(config.static_dir.as_deref());
    if let Some(dir) = &config.static_dir {
        tracing::info!("Serving frontend from {}", dir.display());
    }

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.bind,
            source,
        })?;
    tracing::info!("Heatmap API listening on http://{}", config.bind);

    axum::serve(listener, app).await?;
    Ok(())
}
