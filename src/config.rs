use crate::components::render::SlotWindow;
use crate::components::report::ReportLayout;
use crate::components::zones::ZoneConfig;
use crate::error::{config_error, PlaybookResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use tracing::info;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/dco.toml";

/// Environment variable naming a different configuration file
pub const CONFIG_PATH_ENV: &str = "DCO_CONFIG";

pub const DEFAULT_DAY_START_HOUR: u32 = 9;
pub const DEFAULT_DAY_END_HOUR: u32 = 21;

/// Main configuration of the playbook builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// First hour of the printed time axis
    pub day_start_hour: u32,
    /// Last hour of the printed time axis
    pub day_end_hour: u32,
    /// Report export conventions
    pub report: ReportLayout,
    /// Zones in hotkey order
    pub zones: ZoneConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            day_start_hour: DEFAULT_DAY_START_HOUR,
            day_end_hour: DEFAULT_DAY_END_HOUR,
            report: ReportLayout::default(),
            zones: ZoneConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file and the environment.
    ///
    /// A missing file yields the defaults. `DCO_DAY_START_HOUR` and
    /// `DCO_DAY_END_HOUR` override the file.
    pub fn load(path: impl AsRef<Path>) -> PlaybookResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let path = path.as_ref();
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)?;
            toml::from_str::<Config>(&content)?
        } else {
            info!(path = %path.display(), "No config file, using defaults");
            Config::default()
        };

        if let Some(hour) = env_hour("DCO_DAY_START_HOUR")? {
            config.day_start_hour = hour;
        }
        if let Some(hour) = env_hour("DCO_DAY_END_HOUR")? {
            config.day_end_hour = hour;
        }

        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as TOML, creating the directory if needed
    pub fn save(&self, path: impl AsRef<Path>) -> PlaybookResult<()> {
        self.validate()?;
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_str = toml::to_string(self)?;
        fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn validate(&self) -> PlaybookResult<()> {
        if self.day_start_hour > 23 || self.day_end_hour > 23 {
            return Err(config_error("day hours must be between 0 and 23"));
        }
        if self.day_start_hour > self.day_end_hour {
            return Err(config_error("day_start_hour must not be after day_end_hour"));
        }
        Ok(())
    }

    /// Configured time axis before per-day widening
    pub fn slot_window(&self) -> SlotWindow {
        SlotWindow::new(self.day_start_hour, self.day_end_hour)
    }
}

fn env_hour(key: &str) -> PlaybookResult<Option<u32>> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| config_error(&format!("Invalid {key} format"))),
        Err(_) => Ok(None),
    }
}
