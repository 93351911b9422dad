use crate::audio::{DeckError, Player};
use crate::config::AudioSettings;

use super::cues::HotCues;

/// Volume, speed and loop sliders plus the hot cues of one deck.
pub struct ControlPanel {
    volume: f64,
    speed: f64,
    loop_window: f64,
    cues: HotCues,
    default_volume: f64,
    default_speed: f64,
}

fn report(result: Result<(), DeckError>) {
    if let Err(e) = result {
        log::warn!("{e}");
    }
}

impl ControlPanel {
    /// Build the panel and push its starting values into `player`.
    pub fn new(settings: &AudioSettings, player: &mut Player) -> Self {
        let mut panel = Self {
            volume: settings.default_volume,
            speed: settings.default_speed,
            loop_window: 0.0,
            cues: HotCues::default(),
            default_volume: settings.default_volume,
            default_speed: settings.default_speed,
        };
        panel.set_volume(settings.default_volume, player);
        panel.set_speed(settings.default_speed, player);
        panel
    }

    pub fn set_volume(&mut self, percent: f64, player: &mut Player) {
        self.volume = percent;
        report(player.set_gain(percent));
    }

    pub fn set_speed(&mut self, ratio: f64, player: &mut Player) {
        self.speed = ratio;
        report(player.set_speed(ratio));
    }

    /// A window of 0 is how the slider switches looping off.
    pub fn set_loop_window(&mut self, seconds: f64, player: &mut Player) {
        self.loop_window = seconds;
        match player.set_loop(seconds) {
            Ok(()) => {}
            Err(_) if seconds == 0.0 => log::debug!("Loop off"),
            Err(e) => log::warn!("{e}"),
        }
    }

    pub fn press_cue(&mut self, slot: usize, modifier: bool, player: &mut Player) {
        self.cues.press(slot, modifier, player);
    }

    /// Reset cues and sliders once after each new file.
    pub fn refresh(&mut self, player: &mut Player) {
        if !player.take_just_loaded() {
            return;
        }
        self.cues.reset();
        self.set_volume(self.default_volume, player);
        self.set_speed(self.default_speed, player);
        self.set_loop_window(0.0, player);
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn loop_window(&self) -> f64 {
        self.loop_window
    }

    pub fn cues(&self) -> &HotCues {
        &self.cues
    }
}
