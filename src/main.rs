//! Versioned API demo server.
//!
//! Serves one echo handler per configured version range.
//!
//! ```text
//! GET /api/...            version from the Accept-Version header
//! GET /v2.1.0/api/...     version from the route parameter
//!     → VersionDispatcher picks the handler
//!     → response carries X-Api-Version with the matched range
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use version_dispatch::config::{load_config, validate_config, ServiceConfig};
use version_dispatch::observability::{logging, metrics};
use version_dispatch::HttpServer;

#[derive(Parser)]
#[command(name = "version-dispatch")]
#[command(about = "Serve handlers selected by requested API version", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(version_dispatch::config::ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability.log_filter);

    tracing::info!("version-dispatch v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        versions = config.versions.iter().count(),
        request_header = %config.dispatch.request_header,
        route_param = %config.dispatch.route_param,
        fallback_latest = config.dispatch.fallback_latest,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
