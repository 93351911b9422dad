//! Library browser source: audio files under a music directory.

use std::collections::HashSet;
use std::path::Path;

use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};
use walkdir::{DirEntry, WalkDir};

use crate::config::LibrarySettings;

use super::model::{Track, format_length};

/// Which directory entries count as audio files.
struct AudioFilter<'a> {
    extensions: HashSet<String>,
    settings: &'a LibrarySettings,
}

impl<'a> AudioFilter<'a> {
    fn new(settings: &'a LibrarySettings) -> Self {
        let extensions = settings
            .extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self {
            extensions,
            settings,
        }
    }

    fn has_audio_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.contains(&ext.to_ascii_lowercase()))
    }

    /// Whether to descend into (or list) `entry`. The scan root is always kept.
    fn visible(&self, entry: &DirEntry) -> bool {
        self.settings.include_hidden || entry.depth() == 0 || !is_dotfile(entry.path())
    }

    fn accepts(&self, entry: &DirEntry) -> bool {
        entry.file_type().is_file() && self.has_audio_extension(entry.path())
    }
}

fn is_dotfile(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

fn walker(dir: &Path, settings: &LibrarySettings) -> WalkDir {
    let walker = WalkDir::new(dir).follow_links(settings.follow_links);
    match (settings.recursive, settings.max_depth) {
        (false, _) => walker.max_depth(1),
        (true, Some(depth)) => walker.max_depth(depth),
        (true, None) => walker,
    }
}

/// Build a `Track` for a single file.
///
/// The title comes from the tag when there is one, otherwise from the file
/// stem. Files lofty cannot read get a `0:00` length.
pub fn read_track(path: &Path) -> Track {
    let mut title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let mut seconds = 0.0;

    match lofty::read_from_path(path) {
        Ok(tagged) => {
            seconds = tagged.properties().duration().as_secs_f64();
            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(v) = tag.title() {
                    if !v.trim().is_empty() {
                        title = v.trim().to_string();
                    }
                }
            }
        }
        Err(e) => log::debug!("No tags for {}: {}", path.display(), e),
    }

    Track::new(title, format_length(seconds), path.display().to_string())
}

/// Walk `dir` for audio files, sorted by title ignoring case.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let filter = AudioFilter::new(settings);
    let mut tracks: Vec<Track> = walker(dir, settings)
        .into_iter()
        .filter_entry(|entry| filter.visible(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!("Skipping unreadable entry: {e}");
                None
            }
        })
        .filter(|entry| filter.accepts(entry))
        .map(|entry| read_track(entry.path()))
        .collect();

    tracks.sort_by_key(|t| t.title().to_lowercase());
    log::info!("Found {} audio files under {}", tracks.len(), dir.display());
    tracks
}
