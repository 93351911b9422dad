//! Audio subsystem: decoded transports, the per-deck playback engine and
//! waveform thumbnails.
//!
//! Every deck owns a `Player` wrapping a `Transport`. The production
//! transport is a rodio `Sink` attached to the shared `AudioOutput` mixer,
//! which sums both decks on the device's audio thread.

use std::path::PathBuf;

use thiserror::Error;

mod output;
mod player;
mod transport;
mod types;
mod waveform;

#[cfg(test)]
pub(crate) mod testing;

pub use output::AudioOutput;
pub use player::Player;
pub use transport::{RodioTransport, Transport};
pub use types::*;
pub use waveform::{Thumbnail, ThumbnailCache, ThumbnailPoll, ThumbnailRequest};

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Failed to open audio file '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Bad audio file '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("No audio output device: {0}")]
    Output(#[from] rodio::StreamError),
    #[error("{param} should be between {min} and {max}, got {value}")]
    OutOfRange {
        param: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl DeckError {
    pub(crate) fn out_of_range(param: &'static str, value: f64, min: f64, max: f64) -> Self {
        DeckError::OutOfRange {
            param,
            value,
            min,
            max,
        }
    }
}
