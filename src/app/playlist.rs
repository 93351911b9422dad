//! The playlist panel: the stored tracks, the search box and the selection.

use std::path::Path;

use crate::library::{PlaylistError, PlaylistStore, Track, matching_indices};

pub struct PlaylistView {
    store: Option<PlaylistStore>,
    tracks: Vec<Track>,
    /// File line of each entry in `tracks`.
    lines: Vec<usize>,
    /// Indices into `tracks` that match `query`, in file order.
    display: Vec<usize>,
    query: String,
    selected: usize,
}

impl PlaylistView {
    /// A view over `store`. Without a store the view stays empty and every
    /// edit fails with `PlaylistError::NoLibrary`.
    pub fn new(store: Option<PlaylistStore>) -> Self {
        let mut view = Self {
            store,
            tracks: Vec::new(),
            lines: Vec::new(),
            display: Vec::new(),
            query: String::new(),
            selected: 0,
        };
        view.reload();
        view
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    pub fn location(&self) -> Option<&Path> {
        self.store.as_ref().map(PlaylistStore::path)
    }

    fn store(&self) -> Result<&PlaylistStore, PlaylistError> {
        self.store.as_ref().ok_or(PlaylistError::NoLibrary)
    }

    /// Re-read the file and re-apply the search.
    pub fn reload(&mut self) {
        let entries = self
            .store
            .as_ref()
            .map(PlaylistStore::load_numbered)
            .unwrap_or_default();
        let (lines, tracks): (Vec<usize>, Vec<Track>) = entries.into_iter().unzip();
        self.lines = lines;
        self.tracks = tracks;
        self.refilter();
    }

    fn refilter(&mut self) {
        self.display = matching_indices(&self.tracks, &self.query);
        if self.selected >= self.display.len() {
            self.selected = self.display.len().saturating_sub(1);
        }
    }

    /// Append `track` unless a track with the same path is already listed.
    /// Returns whether it was added.
    pub fn add(&mut self, track: &Track) -> Result<bool, PlaylistError> {
        let store = self.store()?;
        if self.tracks.iter().any(|t| t.path() == track.path()) {
            log::info!("Already in the playlist: {}", track.path());
            return Ok(false);
        }
        store.append(track.title(), track.length(), track.path())?;
        self.reload();
        Ok(true)
    }

    /// Delete the track shown at `row` of the filtered list.
    pub fn delete(&mut self, row: usize) -> Result<(), PlaylistError> {
        let store = self.store()?;
        let Some(&index) = self.display.get(row) else {
            return Err(PlaylistError::NoSuchLine {
                index: row,
                len: self.display.len(),
            });
        };
        store.delete_line(self.lines[index])?;
        self.reload();
        Ok(())
    }

    pub fn track_at(&self, row: usize) -> Option<&Track> {
        self.display.get(row).map(|&i| &self.tracks[i])
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.track_at(self.selected)
    }

    /// Tracks matching the search, in display order.
    pub fn visible(&self) -> impl Iterator<Item = &Track> {
        self.display.iter().map(|&i| &self.tracks[i])
    }

    pub fn visible_len(&self) -> usize {
        self.display.len()
    }

    pub fn total_len(&self) -> usize {
        self.tracks.len()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.refilter();
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.refilter();
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        self.refilter();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.refilter();
    }

    /// Selected row of the filtered list.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Move the selection down, wrapping to the top.
    pub fn select_next(&mut self) {
        if self.display.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.display.len();
    }

    /// Move the selection up, wrapping to the bottom.
    pub fn select_prev(&mut self) {
        if self.display.is_empty() {
            return;
        }
        self.selected = match self.selected {
            0 => self.display.len() - 1,
            n => n - 1,
        };
    }
}
