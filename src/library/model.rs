use std::borrow::Cow;
use std::path::PathBuf;

use percent_encoding::percent_decode_str;

/// One playlist entry. Immutable once built; the three strings are exactly
/// what gets written to the playlist file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    title: String,
    length: String,
    path: String,
}

impl Track {
    pub fn new(title: impl Into<String>, length: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            length: length.into(),
            path: path.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Track length as `m:ss`.
    pub fn length(&self) -> &str {
        &self.length
    }

    /// The stored path, either a plain filesystem path or a `file://` URI.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Resolve the stored path to something `File::open` understands.
    pub fn file_path(&self) -> PathBuf {
        resolve_path(&self.path)
    }
}

/// Turn a plain path or a `file://` URI into a filesystem path.
///
/// Older playlist files store `file://` URIs with percent-encoded
/// characters; plain paths are returned unchanged.
pub fn resolve_path(raw: &str) -> PathBuf {
    match raw.strip_prefix("file://") {
        Some(rest) => {
            let decoded: Cow<'_, str> = percent_decode_str(rest)
                .decode_utf8()
                .unwrap_or(Cow::Borrowed(rest));
            PathBuf::from(decoded.as_ref())
        }
        None => PathBuf::from(raw),
    }
}

/// Format seconds as `m:ss` (minutes unpadded), flooring partial seconds.
/// Negative and non-finite inputs format as `0:00`.
pub fn format_length(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
