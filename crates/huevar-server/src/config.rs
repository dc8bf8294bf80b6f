//! Service configuration.
//!
//! Loaded once at startup from YAML; every field has a default, so an empty
//! file (or no file at all) is a valid configuration.
//!
//! ```yaml
//! port: 8080
//! storage_root: /var/lib/huevar
//! signing_secret: s3cret
//! hues: [20, 40, 60]
//! palette: ["#3d34e8", "#8f32dd"]
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use huevar_color::ColorPalette;
use huevar_io::jpeg::DEFAULT_QUALITY;
use huevar_ops::HueShiftSpec;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServerError};

/// Secret used when none is configured. Only fit for local runs.
pub const DEV_SIGNING_SECRET: &str = "huevar-dev-secret";

/// Lifetime of signed URLs when none is configured (100 years).
pub const DEFAULT_URL_TTL_SECS: u64 = 100 * 365 * 24 * 60 * 60;

/// Environment variable overriding [`ServerConfig::port`].
pub const ENV_PORT: &str = "PORT";
/// Environment variable overriding [`ServerConfig::signing_secret`].
pub const ENV_SIGNING_SECRET: &str = "HUEVAR_SIGNING_SECRET";

/// HTTP service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Directory holding stored objects.
    pub storage_root: PathBuf,
    /// JSON file persisting records. In-memory only when unset.
    pub records_path: Option<PathBuf>,
    /// Base of signed object URLs.
    pub public_url: String,
    /// Key for URL signatures.
    pub signing_secret: String,
    /// Lifetime of signed URLs in seconds.
    pub url_ttl_secs: u64,
    /// JPEG quality of generated variants.
    pub jpeg_quality: u8,
    /// Serve the palette in reverse order.
    pub reverse_palette: bool,
    /// Accepted user ids. Empty accepts any non-empty id.
    pub allowed_users: Vec<String>,
    /// Hue rotations applied to each source.
    pub hues: HueShiftSpec,
    /// Display colors returned with every batch.
    pub palette: ColorPalette,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            storage_root: PathBuf::from("./storage"),
            records_path: None,
            public_url: "http://localhost:3000".to_string(),
            signing_secret: DEV_SIGNING_SECRET.to_string(),
            url_ttl_secs: DEFAULT_URL_TTL_SECS,
            jpeg_quality: DEFAULT_QUALITY,
            reverse_palette: true,
            allowed_users: Vec::new(),
            hues: HueShiftSpec::default(),
            palette: ColorPalette::default(),
        }
    }
}

impl ServerConfig {
    /// Reads a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_yaml(&text)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))
    }

    /// Parses YAML text. An empty document yields the defaults.
    pub fn from_yaml(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Loads `path` (or the defaults) and applies environment overrides.
    pub fn from_env_or_default(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Applies `PORT` and `HUEVAR_SIGNING_SECRET` from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port
                .trim()
                .parse()
                .map_err(|e| ServerError::Config(format!("{ENV_PORT}={port}: {e}")))?;
        }
        if let Some(secret) = lookup(ENV_SIGNING_SECRET).filter(|s| !s.is_empty()) {
            self.signing_secret = secret;
        }
        Ok(())
    }

    /// Socket address built from `host` and `port`.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ServerError::Config(format!("bind address {}:{}: {e}", self.host, self.port)))
    }

    /// Whether the built-in development secret is still in use.
    pub fn uses_dev_secret(&self) -> bool {
        self.signing_secret == DEV_SIGNING_SECRET
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.jpeg_quality, 90);
        assert!(config.reverse_palette);
        assert_eq!(config.hues.len(), 17);
        assert_eq!(config.palette.len(), 17);
        assert!(config.uses_dev_secret());
        assert_eq!(config.bind_addr().unwrap().port(), 3000);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(ServerConfig::from_yaml("").unwrap(), ServerConfig::default());
        assert_eq!(ServerConfig::from_yaml("{}").unwrap(), ServerConfig::default());
    }

    #[test]
    fn test_partial_yaml() {
        let config = ServerConfig::from_yaml(
            "port: 8080\nhues: [10, 20]\npalette: ['#000000']\nreverse_palette: false\n",
        )
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.hues.hues(), &[10, 20]);
        assert_eq!(config.palette.len(), 1);
        assert!(!config.reverse_palette);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(ServerConfig::from_yaml("hues: []").is_err());
        assert!(ServerConfig::from_yaml("palette: ['blue']").is_err());
        assert!(ServerConfig::from_yaml("colour: red").is_err());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huevar.yaml");
        std::fs::write(&path, "port: 9000\nsigning_secret: abc\n").unwrap();
        let config = ServerConfig::load(&path).unwrap();
        assert_eq!(config.port, 9000);
        assert!(!config.uses_dev_secret());

        let missing = ServerConfig::load(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(missing, ServerError::Config(_)));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [(ENV_PORT, "4321"), (ENV_SIGNING_SECRET, "xyz")].into();
        let mut config = ServerConfig::default();
        config
            .apply_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.port, 4321);
        assert_eq!(config.signing_secret, "xyz");

        let mut config = ServerConfig::default();
        let err = config
            .apply_overrides(|k| (k == ENV_PORT).then(|| "http".to_string()))
            .unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }
}
