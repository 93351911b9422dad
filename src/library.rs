//! Track records and the flat-file playlist library.
//!
//! The playlist lives in a plain text file, one `title|length|path` record
//! per line. `store` owns reading and rewriting that file, `search` filters
//! the loaded list and `scan` walks a music directory for new files.

use std::path::PathBuf;

use thiserror::Error;

mod locate;
mod model;
mod scan;
mod search;
mod store;

pub use locate::{locate_playlist_file, locate_resources_dir};
pub use model::{Track, format_length, resolve_path};
pub use scan::{read_track, scan};
pub use search::matching_indices;
pub use store::{FIELD_SEPARATOR, PlaylistStore, tokenise};

#[derive(Error, Debug)]
pub enum PlaylistError {
    #[error("Cannot open playlist file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Playlist field '{field}' is empty or contains a separator or line break")]
    InvalidField { field: String },
    #[error("Playlist has no line {index} (it has {len})")]
    NoSuchLine { index: usize, len: usize },
    #[error("No playlist file: no Resources folder found and none configured")]
    NoLibrary,
}

#[cfg(test)]
mod tests;
