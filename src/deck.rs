//! One deck: a playback engine with its controller and control panel.
//!
//! Input reaches a deck as `ControlEvent`s; `Deck::dispatch` routes them to
//! the part that owns the control. `Deck::tick` runs on the poll timer and
//! pulls engine state back into the controls.

mod controller;
mod cues;
mod events;
mod panel;
mod waveform_view;

pub use controller::{DeckController, TransportButton};
pub use cues::HotCues;
pub use events::{Button, ControlEvent, Slider};
pub use panel::ControlPanel;
pub use waveform_view::WaveformView;

use crate::audio::{DeckError, Player, ThumbnailCache, Transport};
use crate::config::AudioSettings;
use crate::library::{Track, read_track};

pub struct Deck {
    player: Player,
    controller: DeckController,
    panel: ControlPanel,
}

impl Deck {
    pub fn new(transport: Box<dyn Transport>, settings: &AudioSettings) -> Self {
        let mut player = Player::new(transport);
        let panel = ControlPanel::new(settings, &mut player);
        Self {
            player,
            controller: DeckController::new(),
            panel,
        }
    }

    /// Route one input event. Only loading a file can fail.
    pub fn dispatch(
        &mut self,
        event: ControlEvent,
        cache: &ThumbnailCache,
    ) -> Result<(), DeckError> {
        match event {
            ControlEvent::ButtonPressed(button) => {
                let transport = match button {
                    Button::Play => TransportButton::Play,
                    Button::Pause => TransportButton::Pause,
                    Button::Stop => TransportButton::Stop,
                    Button::Cue { slot, modifier } => {
                        self.panel.press_cue(slot, modifier, &mut self.player);
                        return Ok(());
                    }
                };
                self.controller.press(transport, &mut self.player);
            }
            ControlEvent::SliderChanged(slider, value) => match slider {
                Slider::Position => self.controller.slider_changed(value, &mut self.player),
                Slider::Volume => self.panel.set_volume(value, &mut self.player),
                Slider::Speed => self.panel.set_speed(value, &mut self.player),
                Slider::LoopWindow => self.panel.set_loop_window(value, &mut self.player),
            },
            ControlEvent::FileDropped(path) => {
                let track = read_track(&path);
                self.load_track(&track, cache)?;
            }
        }
        Ok(())
    }

    pub fn load_track(&mut self, track: &Track, cache: &ThumbnailCache) -> Result<(), DeckError> {
        self.controller
            .load_track(track, &mut self.player, cache)?;
        // Reset the panel right away rather than on the next tick.
        self.panel.refresh(&mut self.player);
        Ok(())
    }

    /// Poll-timer work: loop wraparound, control refresh, thumbnail pickup.
    pub fn tick(&mut self, cache: &mut ThumbnailCache) {
        self.player.poll_tick();
        self.panel.refresh(&mut self.player);
        self.controller.refresh(&self.player);
        self.controller.poll_thumbnail(cache);
    }

    /// Current value of `slider` as shown on screen.
    pub fn slider_value(&self, slider: Slider) -> f64 {
        match slider {
            Slider::Position => self.controller.position_slider(),
            Slider::Volume => self.panel.volume(),
            Slider::Speed => self.panel.speed(),
            Slider::LoopWindow => self.panel.loop_window(),
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn controller(&self) -> &DeckController {
        &self.controller
    }

    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }
}

#[cfg(test)]
mod tests;
