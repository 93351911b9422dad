use std::path::Path;

use super::DeckError;
use super::transport::Transport;
use super::types::{
    GAIN_PERCENT_RANGE, LoopRegion, MAX_LOOP_SECONDS, PlayerState, RELATIVE_POSITION_RANGE,
    SPEED_RANGE,
};

/// Playback engine for one deck.
///
/// Owns the transport and the loop state. Setters validate their input and
/// return `DeckError::OutOfRange` without touching the transport when the
/// value is outside the accepted range.
pub struct Player {
    transport: Box<dyn Transport>,
    state: PlayerState,
    just_loaded: bool,
    loop_active: bool,
    loop_start: f64,
    loop_end: f64,
    loop_seconds: f64,
}

impl Player {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            state: PlayerState::Idle,
            just_loaded: false,
            loop_active: false,
            loop_start: 0.0,
            loop_end: 0.0,
            loop_seconds: 0.0,
        }
    }

    /// Load `path`, rewinding to its start. A file that cannot be decoded
    /// leaves the engine exactly as it was.
    pub fn load(&mut self, path: &Path) -> Result<(), DeckError> {
        self.transport.load(path)?;
        self.state = PlayerState::Loaded;
        self.just_loaded = true;
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.transport.is_loaded()
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Set the volume from a 0..=100 percentage.
    pub fn set_gain(&mut self, percent: f64) -> Result<(), DeckError> {
        if !GAIN_PERCENT_RANGE.contains(&percent) {
            return Err(DeckError::out_of_range(
                "gain",
                percent,
                *GAIN_PERCENT_RANGE.start(),
                *GAIN_PERCENT_RANGE.end(),
            ));
        }
        self.transport.set_gain((percent / 100.0) as f32);
        Ok(())
    }

    /// Applied gain in 0..=1.
    pub fn gain(&self) -> f64 {
        f64::from(self.transport.gain())
    }

    pub fn set_speed(&mut self, ratio: f64) -> Result<(), DeckError> {
        if !SPEED_RANGE.contains(&ratio) {
            return Err(DeckError::out_of_range(
                "speed ratio",
                ratio,
                *SPEED_RANGE.start(),
                *SPEED_RANGE.end(),
            ));
        }
        self.transport.set_speed(ratio);
        Ok(())
    }

    pub fn speed(&self) -> f64 {
        self.transport.speed()
    }

    /// Absolute seek. The value goes to the transport unchecked.
    pub fn set_position(&mut self, seconds: f64) {
        self.transport.set_position(seconds);
    }

    /// Seek to `fraction` of the track length.
    pub fn set_position_relative(&mut self, fraction: f64) -> Result<(), DeckError> {
        if !RELATIVE_POSITION_RANGE.contains(&fraction) {
            return Err(DeckError::out_of_range(
                "relative position",
                fraction,
                *RELATIVE_POSITION_RANGE.start(),
                *RELATIVE_POSITION_RANGE.end(),
            ));
        }
        let seconds = self.transport.length() * fraction;
        self.set_position(seconds);
        self.just_loaded = false;
        Ok(())
    }

    /// Loop the `window` seconds that end at the current position.
    /// Any window outside `(0, 16]` switches looping off.
    pub fn set_loop(&mut self, window: f64) -> Result<(), DeckError> {
        if !(window > 0.0 && window <= MAX_LOOP_SECONDS) {
            self.loop_active = false;
            return Err(DeckError::out_of_range(
                "loop window (exclusive min)",
                window,
                0.0,
                MAX_LOOP_SECONDS,
            ));
        }
        self.loop_active = true;
        self.loop_seconds = window;
        self.loop_end = self.transport.position();
        self.loop_start = self.loop_end - window;
        log::debug!(
            "Loop armed {:.2}s..{:.2}s",
            self.loop_start,
            self.loop_end
        );
        Ok(())
    }

    pub fn loop_region(&self) -> Option<LoopRegion> {
        self.loop_active.then_some(LoopRegion {
            start: self.loop_start,
            end: self.loop_end,
            window: self.loop_seconds,
        })
    }

    pub fn start(&mut self) {
        self.transport.play();
        self.just_loaded = false;
        if self.transport.is_loaded() {
            self.state = PlayerState::Playing;
        }
    }

    pub fn pause(&mut self) {
        self.transport.pause();
        self.just_loaded = false;
        if self.transport.is_loaded() {
            self.state = PlayerState::Paused;
        }
    }

    /// Pause and rewind to the start.
    pub fn stop(&mut self) {
        self.transport.pause();
        self.transport.set_position(0.0);
        self.just_loaded = false;
        if self.transport.is_loaded() {
            self.state = PlayerState::Stopped;
        }
    }

    /// Timer callback: notice a track that played out, and wrap back to the
    /// loop start once the loop end is reached.
    pub fn poll_tick(&mut self) {
        if self.state == PlayerState::Playing && !self.transport.is_playing() {
            log::debug!("Track played out at {:.2}s", self.transport.position());
            self.state = PlayerState::Ended;
        }
        if !self.loop_active {
            return;
        }
        if self.transport.position() >= self.loop_end {
            self.transport.set_position(self.loop_start);
        }
        if self.loop_seconds == 0.0 {
            self.loop_active = false;
        }
    }

    pub fn position_seconds(&self) -> f64 {
        self.transport.position()
    }

    pub fn length_seconds(&self) -> f64 {
        self.transport.length()
    }

    /// Position as a fraction of the track, `None` when no track with a
    /// known length is loaded.
    pub fn position_relative(&self) -> Option<f64> {
        let length = self.transport.length();
        if !self.transport.is_loaded() || length <= 0.0 {
            return None;
        }
        Some(self.transport.position() / length)
    }

    /// Return whether a file was loaded since the last call, clearing the flag.
    pub fn take_just_loaded(&mut self) -> bool {
        std::mem::take(&mut self.just_loaded)
    }
}
