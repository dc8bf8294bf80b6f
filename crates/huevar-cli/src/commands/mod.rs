//! CLI command implementations

pub mod generate;
pub mod palette;
pub mod serve;
pub mod shift;

use anyhow::{Context, Result};
use huevar_core::Image;
use huevar_server::ServerConfig;
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<Image> {
    huevar_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &Image) -> Result<()> {
    huevar_io::write(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Load the YAML config if given, defaults otherwise
pub fn load_config(path: Option<&Path>) -> Result<ServerConfig> {
    match path {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(ServerConfig::default()),
    }
}

/// Format file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
