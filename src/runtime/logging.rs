use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;

use crate::config::LoggingSettings;

/// Send log output to a file; the terminal belongs to the UI.
///
/// `RUST_LOG` takes precedence over the configured level. Returns the log
/// file path.
pub fn init(settings: &LoggingSettings) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = settings
        .file
        .clone()
        .unwrap_or_else(|| env::temp_dir().join("duodeck.log"));
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(settings.level.as_str()))
        .format_timestamp_millis()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;

    Ok(path)
}
