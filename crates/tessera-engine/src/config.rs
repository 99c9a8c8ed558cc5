//! Engine configuration.
//!
//! Host-level parameters for the screen surface, scrolling policy, and
//! world seed. Configuration can be loaded from and saved to a TOML file;
//! a missing or unreadable file falls back to defaults with a warning.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tessera_common::TesseraResult;
use tracing::{info, warn};

/// Configuration file name.
const CONFIG_FILE: &str = "tessera.toml";

/// Engine configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Screen surface width in pixels
    pub screen_width: i32,
    /// Screen surface height in pixels
    pub screen_height: i32,
    /// Wrap the camera toroidally instead of clamping at the map edges
    pub infinite_scrolling: bool,
    /// World seed (None = derive from entropy)
    pub world_seed: Option<u64>,
    /// Default log filter when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            screen_width: 1280,
            screen_height: 720,
            infinite_scrolling: true,
            world_seed: None,
            log_filter: "info".to_owned(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from the default file, falling back to defaults
    /// when the file is missing or malformed.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(CONFIG_FILE)
    }

    /// Loads configuration from a specific path with default fallback.
    #[must_use]
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => match toml::from_str(&text) {
                Ok(config) => {
                    info!(path = %path.display(), "loaded engine config");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "bad engine config, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                info!(path = %path.display(), "no engine config found, using defaults");
                Self::default()
            }
        }
    }

    /// Saves configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> TesseraResult<()> {
        let text = toml::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        fs::write(path.as_ref(), text)?;
        info!(path = %path.as_ref().display(), "saved engine config");
        Ok(())
    }
}
