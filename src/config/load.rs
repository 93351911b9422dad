use std::env;
use std::path::{Path, PathBuf};

use ::config::{Config, ConfigError, Environment, File};

use super::schema::Settings;
use crate::audio::{GAIN_PERCENT_RANGE, SPEED_RANGE};

const ENV_PREFIX: &str = "DUODECK";
const CONFIG_PATH_VAR: &str = "DUODECK_CONFIG_PATH";

impl Settings {
    /// Load from the config file (`DUODECK_CONFIG_PATH` or the XDG location)
    /// with `DUODECK__SECTION__KEY` variables on top. A missing file is not
    /// an error.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(resolve_config_path().as_deref())
    }

    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(false));
        }
        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Reject values the decks would refuse at startup.
    pub fn validate(&self) -> Result<(), String> {
        let audio = &self.audio;
        if audio.tick_ms == 0 {
            return Err("audio.tick_ms must be at least 1".to_string());
        }
        if !GAIN_PERCENT_RANGE.contains(&audio.default_volume) {
            return Err(format!(
                "audio.default_volume {} is outside 0..=100",
                audio.default_volume
            ));
        }
        if !SPEED_RANGE.contains(&audio.default_speed) {
            return Err(format!(
                "audio.default_speed {} is outside 0..=100",
                audio.default_speed
            ));
        }
        if self.ui.thumbnail_cache_entries == 0 {
            return Err("ui.thumbnail_cache_entries must be at least 1".to_string());
        }
        Ok(())
    }
}

/// The config file named by `DUODECK_CONFIG_PATH`, else the default location.
pub fn resolve_config_path() -> Option<PathBuf> {
    env::var_os(CONFIG_PATH_VAR)
        .map(PathBuf::from)
        .or_else(default_config_path)
}

/// `$XDG_CONFIG_HOME/duodeck/config.toml`, falling back to
/// `~/.config/duodeck/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(config_home.join("duodeck").join("config.toml"))
}
