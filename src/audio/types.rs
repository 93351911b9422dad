//! Audio-related small types and constants.
//!
//! Parameter ranges accepted by the playback engine, the explicit player
//! state and the loop region snapshot shared with the UI.

use std::ops::RangeInclusive;

/// Volume is set in percent and applied as a 0..=1 gain.
pub const GAIN_PERCENT_RANGE: RangeInclusive<f64> = 0.0..=100.0;
/// Resampling ratio; 1.0 plays at normal speed.
pub const SPEED_RANGE: RangeInclusive<f64> = 0.0..=100.0;
pub const RELATIVE_POSITION_RANGE: RangeInclusive<f64> = 0.0..=1.0;
/// Longest loop window in seconds. Windows must be strictly positive.
pub const MAX_LOOP_SECONDS: f64 = 16.0;

/// Number of hot cue slots per deck.
pub const CUE_SLOTS: usize = 4;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PlayerState {
    /// Nothing has been loaded yet.
    #[default]
    Idle,
    /// A file was loaded and no transport action happened since.
    Loaded,
    Playing,
    Paused,
    /// Stopped and rewound to the start.
    Stopped,
    /// Played through to the end of the track and halted there.
    Ended,
}

impl PlayerState {
    pub fn label(self) -> &'static str {
        match self {
            PlayerState::Idle => "EMPTY",
            PlayerState::Loaded => "LOADED",
            PlayerState::Playing => "PLAYING",
            PlayerState::Paused => "PAUSED",
            PlayerState::Stopped => "STOPPED",
            PlayerState::Ended => "ENDED",
        }
    }
}

/// Active loop boundaries, in seconds. `start` may be negative when a loop
/// is armed less than `window` seconds into the track.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LoopRegion {
    pub start: f64,
    pub end: f64,
    pub window: f64,
}
