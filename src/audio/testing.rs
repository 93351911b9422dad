//! In-memory transport for tests. The state is shared with the test through
//! `Rc<RefCell<_>>` so the "audio" position can be moved by hand.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::DeckError;
use super::transport::Transport;

#[derive(Debug)]
pub(crate) struct FakeState {
    pub loaded: Option<PathBuf>,
    pub length: f64,
    pub position: f64,
    pub playing: bool,
    pub gain: f32,
    pub speed: f64,
    pub seeks: Vec<f64>,
    pub fail_loads: bool,
}

pub(crate) type FakeHandle = Rc<RefCell<FakeState>>;

pub(crate) struct FakeTransport {
    state: FakeHandle,
}

impl FakeTransport {
    /// A transport whose loads succeed with a `length`-second track.
    pub fn new(length: f64) -> (Self, FakeHandle) {
        let state = Rc::new(RefCell::new(FakeState {
            loaded: None,
            length,
            position: 0.0,
            playing: false,
            gain: 1.0,
            speed: 1.0,
            seeks: Vec::new(),
            fail_loads: false,
        }));
        (
            Self {
                state: state.clone(),
            },
            state,
        )
    }
}

impl Transport for FakeTransport {
    fn load(&mut self, path: &Path) -> Result<(), DeckError> {
        let mut s = self.state.borrow_mut();
        if s.fail_loads {
            return Err(DeckError::Decode {
                path: path.to_path_buf(),
                source: rodio::decoder::DecoderError::UnrecognizedFormat,
            });
        }
        s.loaded = Some(path.to_path_buf());
        s.position = 0.0;
        s.playing = false;
        Ok(())
    }

    fn is_loaded(&self) -> bool {
        self.state.borrow().loaded.is_some()
    }

    fn play(&mut self) {
        let mut s = self.state.borrow_mut();
        s.playing = s.loaded.is_some();
    }

    fn pause(&mut self) {
        self.state.borrow_mut().playing = false;
    }

    fn is_playing(&self) -> bool {
        self.state.borrow().playing
    }

    fn position(&self) -> f64 {
        self.state.borrow().position
    }

    fn set_position(&mut self, seconds: f64) {
        let mut s = self.state.borrow_mut();
        s.position = seconds;
        s.seeks.push(seconds);
    }

    fn length(&self) -> f64 {
        let s = self.state.borrow();
        if s.loaded.is_some() { s.length } else { 0.0 }
    }

    fn set_gain(&mut self, gain: f32) {
        self.state.borrow_mut().gain = gain;
    }

    fn gain(&self) -> f32 {
        self.state.borrow().gain
    }

    fn set_speed(&mut self, ratio: f64) {
        self.state.borrow_mut().speed = ratio;
    }

    fn speed(&self) -> f64 {
        self.state.borrow().speed
    }
}

/// A `Player` over a fake transport with a `length`-second track available.
pub(crate) fn fake_player(length: f64) -> (super::Player, FakeHandle) {
    let (transport, handle) = FakeTransport::new(length);
    (super::Player::new(Box::new(transport)), handle)
}
