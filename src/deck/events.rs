//! Toolkit-independent input events for one deck.

use std::ops::RangeInclusive;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    ButtonPressed(Button),
    SliderChanged(Slider, f64),
    /// A file dropped (or pasted) onto the deck.
    FileDropped(PathBuf),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Button {
    Play,
    Pause,
    Stop,
    /// Hot cue `slot` (0-based). `modifier` clears the slot.
    Cue { slot: usize, modifier: bool },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Slider {
    Position,
    Volume,
    Speed,
    LoopWindow,
}

impl Slider {
    /// The values the on-screen slider can take. The engine accepts a wider
    /// range for some of them.
    pub fn range(self) -> RangeInclusive<f64> {
        match self {
            Slider::Position => 0.0..=1.0,
            Slider::Volume => 0.0..=100.0,
            Slider::Speed => 0.0..=2.0,
            Slider::LoopWindow => 0.0..=16.0,
        }
    }

    /// Snap `value` into the slider's range. The loop window moves in whole
    /// seconds.
    pub fn snap(self, value: f64) -> f64 {
        let range = self.range();
        let v = value.clamp(*range.start(), *range.end());
        match self {
            Slider::LoopWindow => v.round(),
            _ => v,
        }
    }
}
