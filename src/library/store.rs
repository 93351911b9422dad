//! Pipe-delimited playlist persistence.
//!
//! No locking: the application is the only writer of its playlist file.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::PlaylistError;
use super::model::Track;

pub const FIELD_SEPARATOR: char = '|';

/// Split `line` on `separator`, skipping empty tokens.
///
/// Consecutive separators never produce an empty field, so a record with a
/// blank field shifts its neighbours left and ends up with fewer than three
/// tokens.
pub fn tokenise(line: &str, separator: char) -> Vec<&str> {
    line.split(separator).filter(|t| !t.is_empty()).collect()
}

fn track_from_tokens(tokens: &[&str]) -> Option<Track> {
    match tokens {
        [title, length, path] => Some(Track::new(*title, *length, *path)),
        _ => None,
    }
}

fn check_field(field: &str) -> Result<(), PlaylistError> {
    if field.is_empty() || field.contains(FIELD_SEPARATOR) || field.contains(['\n', '\r']) {
        return Err(PlaylistError::InvalidField {
            field: field.to_string(),
        });
    }
    Ok(())
}

#[derive(Debug)]
pub struct PlaylistStore {
    path: PathBuf,
}

impl PlaylistStore {
    /// Open `path` for appending, creating the file if it does not exist.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, PlaylistError> {
        let store = Self { path: path.into() };
        store.open_append()?;
        log::info!("Playlist file: {}", store.path.display());
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_append(&self) -> Result<File, PlaylistError> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| PlaylistError::Io {
                path: self.path.clone(),
                source,
            })
    }

    /// Read every well-formed record. Lines without exactly three fields are
    /// skipped; a missing or unreadable file yields an empty list.
    pub fn load_all(&self) -> Vec<Track> {
        self.load_numbered().into_iter().map(|(_, t)| t).collect()
    }

    /// Like `load_all`, pairing each track with its 0-based line in the file.
    /// Use the line number with `delete_line`; it differs from the list
    /// index once a bad line has been skipped.
    pub fn load_numbered(&self) -> Vec<(usize, Track)> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                log::warn!("Playlist file {} not open: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        let mut tracks = Vec::new();
        for (number, line) in BufReader::new(file).lines().enumerate() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    log::warn!("Stopped reading {} at line {}: {}", self.path.display(), number, e);
                    break;
                }
            };
            match track_from_tokens(&tokenise(&line, FIELD_SEPARATOR)) {
                Some(track) => tracks.push((number, track)),
                None => log::warn!("Skipping bad playlist line {}: {:?}", number, line),
            }
        }
        tracks
    }

    /// Append one `title|length|path` record.
    pub fn append(&self, title: &str, length: &str, path: &str) -> Result<(), PlaylistError> {
        for field in [title, length, path] {
            check_field(field)?;
        }

        let mut file = self.open_append()?;
        writeln!(file, "{title}{FIELD_SEPARATOR}{length}{FIELD_SEPARATOR}{path}").map_err(
            |source| PlaylistError::Io {
                path: self.path.clone(),
                source,
            },
        )
    }

    /// Remove line `index` (0-based, file order) and rewrite the file.
    pub fn delete_line(&self, index: usize) -> Result<(), PlaylistError> {
        let io_err = |source| PlaylistError::Io {
            path: self.path.clone(),
            source,
        };

        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(io_err(e)),
        };

        let lines: Vec<&str> = contents.lines().collect();
        if index >= lines.len() {
            return Err(PlaylistError::NoSuchLine {
                index,
                len: lines.len(),
            });
        }

        let mut rewritten = String::with_capacity(contents.len());
        for (i, line) in lines.iter().enumerate() {
            if i != index {
                rewritten.push_str(line);
                rewritten.push('\n');
            }
        }
        fs::write(&self.path, rewritten).map_err(io_err)
    }
}
