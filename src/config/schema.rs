use std::path::PathBuf;

use serde::Deserialize;

/// Everything read from `config.toml`, `DUODECK__*` variables and the
/// built-in defaults. See `Settings::load` for the lookup order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
    pub library: LibrarySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Period of the deck poll timer (loop wraparound, playhead refresh), in milliseconds.
    pub tick_ms: u64,
    /// Volume slider value (percent) applied at startup and after every load.
    pub default_volume: f64,
    /// Speed slider value applied at startup and after every load.
    pub default_speed: f64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            tick_ms: 500,
            default_volume: 50.0,
            default_speed: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// How many waveform thumbnails to keep in memory across both decks.
    pub thumbnail_cache_entries: usize,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ two decks, one mixer ~ ".to_string(),
            thumbnail_cache_entries: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Position slider step for `h` / `l`, as a fraction of the track.
    pub position_step: f64,
    /// Volume slider step, in percent.
    pub volume_step: f64,
    /// Speed slider step.
    pub speed_step: f64,
    /// Loop window slider step, in seconds.
    pub loop_step: f64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            position_step: 0.01,
            volume_step: 5.0,
            speed_step: 0.1,
            loop_step: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Explicit playlist file. When unset the file is looked up in a
    /// `Resources` directory above the working directory.
    pub playlist_path: Option<PathBuf>,
    /// File name used inside the `Resources` directory.
    pub playlist_file_name: String,
    /// How many parent directories to climb looking for `Resources`.
    pub resources_search_depth: usize,
    /// Directory listed by the library browser.
    pub music_dir: Option<PathBuf>,
    /// Browser file types, matched on the extension without its dot.
    /// Case does not matter.
    pub extensions: Vec<String>,
    pub follow_links: bool,
    /// List entries whose name starts with a dot.
    pub include_hidden: bool,
    /// `false` lists `music_dir` itself only.
    pub recursive: bool,
    /// Deepest directory level visited when `recursive` is set.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            playlist_path: None,
            playlist_file_name: "playlist.txt".to_string(),
            resources_search_depth: 15,
            music_dir: None,
            extensions: ["mp3", "flac", "wav", "ogg", "m4a"]
                .into_iter()
                .map(String::from)
                .collect(),
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `env_logger` filter string, e.g. `info` or `duodeck=debug`.
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Log file. The terminal belongs to the UI, so logs never go to stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
