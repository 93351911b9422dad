//! Waveform thumbnails.
//!
//! A thumbnail is the peak absolute sample of every 1/20 s block of a file.
//! Decoding a whole track takes a while, so thumbnails are computed on a
//! short-lived thread and handed back through a channel. Finished thumbnails
//! are kept in a small cache shared by both decks.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use rodio::Source;

use super::DeckError;
use super::transport::open_decoder;

const PEAKS_PER_SECOND: u32 = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    peaks: Vec<f32>,
    seconds_per_peak: f64,
}

impl Thumbnail {
    /// Build from interleaved samples.
    pub fn from_samples(
        samples: impl IntoIterator<Item = f32>,
        channels: usize,
        sample_rate: u32,
    ) -> Self {
        let frames_per_peak = (sample_rate / PEAKS_PER_SECOND).max(1) as usize;
        let samples_per_peak = frames_per_peak * channels.max(1);

        let mut peaks = Vec::new();
        let mut current = 0.0f32;
        let mut count = 0usize;
        for s in samples {
            current = current.max(s.abs());
            count += 1;
            if count == samples_per_peak {
                peaks.push(current.min(1.0));
                current = 0.0;
                count = 0;
            }
        }
        if count > 0 {
            peaks.push(current.min(1.0));
        }

        Self {
            peaks,
            seconds_per_peak: frames_per_peak as f64 / f64::from(sample_rate.max(1)),
        }
    }

    /// Decode `path` completely. Blocking; call from a worker thread.
    pub fn compute(path: &Path) -> Result<Self, DeckError> {
        let decoder = open_decoder(path)?;
        let channels = decoder.channels() as usize;
        let sample_rate = decoder.sample_rate();
        Ok(Self::from_samples(decoder, channels, sample_rate))
    }

    pub fn length_seconds(&self) -> f64 {
        self.peaks.len() as f64 * self.seconds_per_peak
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    /// Reduce the peaks to `width` columns, each the max of its share.
    pub fn columns(&self, width: usize) -> Vec<f32> {
        let len = self.peaks.len();
        if len == 0 {
            return vec![0.0; width];
        }
        (0..width)
            .map(|col| {
                let start = col * len / width;
                let end = ((col + 1) * len / width).clamp(start + 1, len);
                self.peaks[start..end].iter().copied().fold(0.0, f32::max)
            })
            .collect()
    }
}

/// Thumbnails by file path, evicting the oldest entry when full.
#[derive(Debug)]
pub struct ThumbnailCache {
    entries: VecDeque<(PathBuf, Arc<Thumbnail>)>,
    capacity: usize,
}

impl ThumbnailCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn get(&self, path: &Path) -> Option<Arc<Thumbnail>> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, t)| t.clone())
    }

    pub fn insert(&mut self, path: PathBuf, thumbnail: Arc<Thumbnail>) {
        self.entries.retain(|(p, _)| *p != path);
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back((path, thumbnail));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

pub enum ThumbnailPoll {
    Pending,
    Ready(Result<Thumbnail, DeckError>),
    /// The worker went away without answering.
    Abandoned,
}

/// A thumbnail being computed in the background.
pub struct ThumbnailRequest {
    path: PathBuf,
    rx: Receiver<Result<Thumbnail, DeckError>>,
}

impl ThumbnailRequest {
    pub fn spawn(path: PathBuf) -> Self {
        let (tx, rx) = mpsc::channel();
        let worker_path = path.clone();
        thread::spawn(move || {
            let result = Thumbnail::compute(&worker_path);
            // The view may have moved on to another file.
            let _ = tx.send(result);
        });
        Self { path, rx }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn poll(&self) -> ThumbnailPoll {
        match self.rx.try_recv() {
            Ok(result) => ThumbnailPoll::Ready(result),
            Err(TryRecvError::Empty) => ThumbnailPoll::Pending,
            Err(TryRecvError::Disconnected) => ThumbnailPoll::Abandoned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_samples_takes_peak_per_block_across_channels() {
        // 40 Hz stereo -> 2 frames (4 samples) per peak.
        let samples = vec![0.1, -0.5, 0.2, 0.3, 0.9, 0.0, -0.1, 0.0, 0.4];
        let t = Thumbnail::from_samples(samples, 2, 40);

        assert_eq!(t.peaks, vec![0.5, 0.9, 0.4]);
        assert!((t.length_seconds() - 0.15).abs() < 1e-9);
    }

    #[test]
    fn columns_take_max_of_each_share() {
        let t = Thumbnail {
            peaks: vec![0.1, 0.4, 0.2, 0.8, 0.3, 0.5],
            seconds_per_peak: 0.05,
        };
        assert_eq!(t.columns(3), vec![0.4, 0.8, 0.5]);
        assert_eq!(t.columns(1), vec![0.8]);
        // Wider than the data repeats peaks instead of leaving gaps.
        assert_eq!(t.columns(12).len(), 12);
        assert!(t.columns(12).iter().all(|&v| v > 0.0));
    }

    #[test]
    fn columns_of_empty_thumbnail_are_flat() {
        let t = Thumbnail::from_samples(Vec::new(), 2, 44_100);
        assert!(t.is_empty());
        assert_eq!(t.columns(4), vec![0.0; 4]);
    }

    #[test]
    fn cache_evicts_oldest_and_refreshes_existing() {
        let mut cache = ThumbnailCache::new(2);
        let thumb = Arc::new(Thumbnail::from_samples(vec![0.5], 1, 20));

        cache.insert(PathBuf::from("/a"), thumb.clone());
        cache.insert(PathBuf::from("/b"), thumb.clone());
        cache.insert(PathBuf::from("/a"), thumb.clone());
        cache.insert(PathBuf::from("/c"), thumb.clone());

        assert_eq!(cache.len(), 2);
        assert!(cache.get(Path::new("/b")).is_none());
        assert!(cache.get(Path::new("/a")).is_some());
        assert!(cache.get(Path::new("/c")).is_some());
    }

    #[test]
    fn request_for_missing_file_reports_an_error() {
        let req = ThumbnailRequest::spawn(PathBuf::from("/definitely/not/here.mp3"));
        let result = loop {
            match req.poll() {
                ThumbnailPoll::Pending => std::thread::sleep(std::time::Duration::from_millis(5)),
                ThumbnailPoll::Ready(r) => break r,
                ThumbnailPoll::Abandoned => panic!("worker vanished"),
            }
        };
        assert!(matches!(result, Err(DeckError::Open { .. })));
    }
}
