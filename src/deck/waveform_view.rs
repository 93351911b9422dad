//! What a deck shows about its track: title, remaining time, playhead and
//! the waveform thumbnail.

use std::path::Path;
use std::sync::Arc;

use crate::audio::{Thumbnail, ThumbnailCache, ThumbnailPoll, ThumbnailRequest};
use crate::library::{Track, format_length};

#[derive(Default)]
pub struct WaveformView {
    title: Option<String>,
    remaining: String,
    total_seconds: f64,
    position: f64,
    thumbnail: Option<Arc<Thumbnail>>,
    pending: Option<ThumbnailRequest>,
}

impl WaveformView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `track`, whose decoded length is `total_seconds`, and fetch its
    /// thumbnail from `cache` or start computing one.
    pub fn load(&mut self, track: &Track, total_seconds: f64, cache: &ThumbnailCache) {
        self.title = Some(track.title().to_string());
        self.remaining = track.length().to_string();
        self.total_seconds = total_seconds;
        self.position = 0.0;
        self.request_thumbnail(&track.file_path(), cache);
    }

    fn request_thumbnail(&mut self, path: &Path, cache: &ThumbnailCache) {
        match cache.get(path) {
            Some(thumb) => {
                self.thumbnail = Some(thumb);
                self.pending = None;
            }
            None => {
                self.thumbnail = None;
                self.pending = Some(ThumbnailRequest::spawn(path.to_path_buf()));
            }
        }
    }

    /// Collect a finished thumbnail, if any.
    pub fn poll(&mut self, cache: &mut ThumbnailCache) {
        let Some(request) = &self.pending else {
            return;
        };
        match request.poll() {
            ThumbnailPoll::Pending => return,
            ThumbnailPoll::Ready(Ok(thumb)) => {
                let thumb = Arc::new(thumb);
                cache.insert(request.path().to_path_buf(), thumb.clone());
                self.thumbnail = Some(thumb);
            }
            ThumbnailPoll::Ready(Err(e)) => log::warn!("No waveform: {e}"),
            ThumbnailPoll::Abandoned => {
                log::warn!("Waveform worker for {} exited", request.path().display())
            }
        }
        self.pending = None;
    }

    pub fn set_position_relative(&mut self, position: f64) {
        if position.is_nan() {
            return;
        }
        self.position = position;
    }

    /// Recompute the remaining-time text for playback at `position_seconds`.
    pub fn update_remaining(&mut self, position_seconds: f64) {
        let remaining = (self.total_seconds - position_seconds).max(0.0);
        self.remaining = format_length(remaining);
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn remaining(&self) -> &str {
        &self.remaining
    }

    /// Playhead as a fraction of the track.
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn thumbnail(&self) -> Option<&Thumbnail> {
        self.thumbnail.as_deref()
    }

    pub fn is_computing(&self) -> bool {
        self.pending.is_some()
    }
}
