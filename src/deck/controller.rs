use crate::audio::{DeckError, Player, ThumbnailCache};
use crate::library::Track;

use super::waveform_view::WaveformView;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransportButton {
    Play,
    Pause,
    Stop,
}

/// Transport buttons, position slider and waveform view of one deck.
#[derive(Default)]
pub struct DeckController {
    highlight: Option<TransportButton>,
    position_slider: f64,
    view: WaveformView,
}

impl DeckController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: TransportButton, player: &mut Player) {
        match button {
            TransportButton::Play => player.start(),
            TransportButton::Pause => player.pause(),
            TransportButton::Stop => player.stop(),
        }
        if player.is_loaded() {
            self.highlight = Some(button);
        }
    }

    /// Load `track` into the engine, then into the view. The view is left
    /// alone when the engine rejects the file.
    pub fn load_track(
        &mut self,
        track: &Track,
        player: &mut Player,
        cache: &ThumbnailCache,
    ) -> Result<(), DeckError> {
        player.load(&track.file_path())?;
        self.view.load(track, player.length_seconds(), cache);
        self.position_slider = 0.0;
        self.highlight = None;
        Ok(())
    }

    /// The user moved the position slider to `value`. Pushing it to the end
    /// restarts the track from the top.
    pub fn slider_changed(&mut self, value: f64, player: &mut Player) {
        self.position_slider = value;
        if value >= 1.0 {
            if let Err(e) = player.set_position_relative(0.0) {
                log::warn!("{e}");
            }
            player.start();
            return;
        }
        if let Err(e) = player.set_position_relative(value) {
            log::warn!("{e}");
        }
    }

    /// Timer refresh: move the playhead, remaining time and slider to the
    /// engine's position. Nothing is sent back to the engine.
    pub fn refresh(&mut self, player: &Player) {
        let Some(relative) = player.position_relative() else {
            return;
        };
        self.view.set_position_relative(relative);
        self.view.update_remaining(player.position_seconds());
        self.position_slider = relative;
    }

    pub fn poll_thumbnail(&mut self, cache: &mut ThumbnailCache) {
        self.view.poll(cache);
    }

    pub fn highlight(&self) -> Option<TransportButton> {
        self.highlight
    }

    pub fn position_slider(&self) -> f64 {
        self.position_slider
    }

    pub fn view(&self) -> &WaveformView {
        &self.view
    }
}
