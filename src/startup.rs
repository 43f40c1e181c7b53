use crate::config::{Config, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use crate::error::Error;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Loaded from the file (or defaults for a missing file) without error
    Loaded(PathBuf),
    /// Loading failed; the defaults are in use
    Fallback(String),
}

/// Configuration file path from `DCO_CONFIG`, or the default location
pub fn config_path() -> PathBuf {
    env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Load the configuration, falling back to the defaults on any failure
pub fn load_config(path: impl AsRef<Path>) -> (Config, ConfigSource) {
    let path = path.as_ref();
    match Config::load(path) {
        Ok(config) => {
            info!(path = %path.display(), zones = config.zones.len(), "Configuration loaded");
            (config, ConfigSource::Loaded(path.to_path_buf()))
        }
        Err(e) => {
            warn!("Failed to load configuration, using defaults: {}", e);
            (Config::default(), ConfigSource::Fallback(e.to_string()))
        }
    }
}
