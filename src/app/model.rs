//! Application model: two decks, the playlist and the library browser.
//!
//! Every user action arrives as an `Action` (see `runtime::keymap`) and is
//! applied by `App::dispatch`. Errors never escape the model; they are
//! logged and shown in the status line.

use std::path::{Path, PathBuf};

use crate::audio::ThumbnailCache;
use crate::config::{ControlsSettings, Settings};
use crate::deck::{Button, ControlEvent, Deck, Slider};
use crate::library::Track;

use super::playlist::PlaylistView;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DeckId {
    A,
    B,
}

impl DeckId {
    pub fn index(self) -> usize {
        match self {
            DeckId::A => 0,
            DeckId::B => 1,
        }
    }

    pub fn other(self) -> Self {
        match self {
            DeckId::A => DeckId::B,
            DeckId::B => DeckId::A,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DeckId::A => "A",
            DeckId::B => "B",
        }
    }
}

/// Which part of the screen receives keys.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// Typing into the playlist search box.
    Search,
    /// The library browser popup is open.
    Browser,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    SwitchFocus,
    /// Press a button on the focused deck.
    Press(Button),
    /// Move a slider of the focused deck by `steps` configured steps.
    Nudge(Slider, f64),
    /// A file dropped onto the focused deck.
    Drop(PathBuf),
    SelectNext,
    SelectPrev,
    /// Enter: load the selected playlist row, or add the selected browser
    /// entry to the playlist.
    Activate,
    /// Load the selected browser entry onto the focused deck.
    LoadFromBrowser,
    DeleteSelected,
    StartSearch,
    SearchInput(char),
    SearchBackspace,
    OpenBrowser,
    /// Esc: leave the current mode.
    Cancel,
}

pub struct App {
    decks: [Deck; 2],
    focus: DeckId,
    playlist: PlaylistView,
    mode: Mode,
    browser: Vec<Track>,
    browser_selected: usize,
    browser_dir: PathBuf,
    thumbnails: ThumbnailCache,
    controls: ControlsSettings,
    status: Option<String>,
}

impl App {
    pub fn new(
        decks: [Deck; 2],
        playlist: PlaylistView,
        browser: Vec<Track>,
        browser_dir: PathBuf,
        settings: &Settings,
    ) -> Self {
        let status = (!playlist.is_enabled())
            .then(|| "Playlist disabled: no playlist file (see log)".to_string());
        Self {
            decks,
            focus: DeckId::A,
            playlist,
            mode: Mode::Normal,
            browser,
            browser_selected: 0,
            browser_dir,
            thumbnails: ThumbnailCache::new(settings.ui.thumbnail_cache_entries),
            controls: settings.controls.clone(),
            status,
        }
    }

    /// Apply `action`. Returns `true` when the application should quit.
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::SwitchFocus => self.focus = self.focus.other(),
            Action::Press(button) => self.send(ControlEvent::ButtonPressed(button)),
            Action::Nudge(slider, steps) => self.nudge(slider, steps),
            Action::Drop(path) => self.send(ControlEvent::FileDropped(path)),
            Action::SelectNext => match self.mode {
                Mode::Browser => self.browser_step(1),
                _ => self.playlist.select_next(),
            },
            Action::SelectPrev => match self.mode {
                Mode::Browser => self.browser_step(-1),
                _ => self.playlist.select_prev(),
            },
            Action::Activate => match self.mode {
                Mode::Browser => self.add_browser_selection(),
                Mode::Search => {
                    self.mode = Mode::Normal;
                    self.load_selected_row();
                }
                Mode::Normal => self.load_selected_row(),
            },
            Action::LoadFromBrowser => {
                if let Some(track) = self.browser.get(self.browser_selected).cloned() {
                    self.load_into_focused(&track);
                }
            }
            Action::DeleteSelected => self.delete_selected_row(),
            Action::StartSearch => self.mode = Mode::Search,
            Action::SearchInput(c) => self.playlist.push_char(c),
            Action::SearchBackspace => self.playlist.pop_char(),
            Action::OpenBrowser => {
                self.mode = Mode::Browser;
                if self.browser.is_empty() {
                    self.status = Some(format!(
                        "No audio files under {}",
                        self.browser_dir.display()
                    ));
                }
            }
            Action::Cancel => {
                if self.mode == Mode::Search {
                    self.playlist.clear_query();
                }
                self.mode = Mode::Normal;
            }
        }
        false
    }

    /// Poll-timer work for both decks.
    pub fn tick(&mut self) {
        for deck in &mut self.decks {
            deck.tick(&mut self.thumbnails);
        }
    }

    fn send(&mut self, event: ControlEvent) {
        let focus = self.focus;
        let deck = &mut self.decks[focus.index()];
        if let Err(e) = deck.dispatch(event, &self.thumbnails) {
            log::error!("Deck {}: {}", focus.label(), e);
            self.status = Some(e.to_string());
        }
    }

    fn nudge(&mut self, slider: Slider, steps: f64) {
        let step = match slider {
            Slider::Position => self.controls.position_step,
            Slider::Volume => self.controls.volume_step,
            Slider::Speed => self.controls.speed_step,
            Slider::LoopWindow => self.controls.loop_step,
        };
        let current = self.deck(self.focus).slider_value(slider);
        let value = slider.snap(current + step * steps);
        self.send(ControlEvent::SliderChanged(slider, value));
    }

    fn load_into_focused(&mut self, track: &Track) {
        let focus = self.focus;
        let deck = &mut self.decks[focus.index()];
        match deck.load_track(track, &self.thumbnails) {
            Ok(()) => {
                self.status = Some(format!("Deck {}: {}", focus.label(), track.title()));
            }
            Err(e) => {
                log::error!("Deck {}: {}", focus.label(), e);
                self.status = Some(e.to_string());
            }
        }
    }

    fn load_selected_row(&mut self) {
        if let Some(track) = self.playlist.selected_track().cloned() {
            self.load_into_focused(&track);
        }
    }

    fn delete_selected_row(&mut self) {
        if self.playlist.visible_len() == 0 {
            return;
        }
        let row = self.playlist.selected();
        if let Err(e) = self.playlist.delete(row) {
            log::error!("Cannot delete playlist row {row}: {e}");
            self.status = Some(e.to_string());
        }
    }

    fn add_browser_selection(&mut self) {
        let Some(track) = self.browser.get(self.browser_selected) else {
            return;
        };
        self.status = Some(match self.playlist.add(track) {
            Ok(true) => format!("Added {}", track.title()),
            Ok(false) => format!("{} is already in the playlist", track.title()),
            Err(e) => {
                log::error!("Cannot add {}: {}", track.path(), e);
                e.to_string()
            }
        });
    }

    fn browser_step(&mut self, delta: isize) {
        let len = self.browser.len();
        if len == 0 {
            return;
        }
        let next = (self.browser_selected as isize + delta).rem_euclid(len as isize);
        self.browser_selected = next as usize;
    }

    pub fn deck(&self, id: DeckId) -> &Deck {
        &self.decks[id.index()]
    }

    pub fn focus(&self) -> DeckId {
        self.focus
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn playlist(&self) -> &PlaylistView {
        &self.playlist
    }

    pub fn browser(&self) -> &[Track] {
        &self.browser
    }

    pub fn browser_selected(&self) -> usize {
        self.browser_selected
    }

    pub fn browser_dir(&self) -> &Path {
        &self.browser_dir
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}
