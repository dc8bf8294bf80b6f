//! HTTP service.

use crate::ServeArgs;
use anyhow::{Context, Result};
use huevar_server::{ServerConfig, VariationService};
use std::sync::Arc;
use tracing::{info, warn};

/// Runs the serve command until Ctrl-C.
pub fn run(args: ServeArgs) -> Result<()> {
    let mut config = ServerConfig::from_env_or_default(args.config.as_deref())
        .context("Failed to load server config")?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if config.uses_dev_secret() {
        warn!("Using the built-in signing secret; set HUEVAR_SIGNING_SECRET in production");
    }

    let addr = config.bind_addr()?;
    let service = VariationService::from_config(&config).context("Failed to start service")?;
    info!(
        storage = %config.storage_root.display(),
        hues = config.hues.len(),
        "Starting server"
    );

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime
        .block_on(huevar_server::serve(Arc::new(service), addr))
        .with_context(|| format!("Server on {addr} failed"))
}
