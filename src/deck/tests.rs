use std::path::PathBuf;

use super::*;
use crate::audio::testing::{FakeHandle, FakeTransport};
use crate::audio::PlayerState;

fn deck(length: f64) -> (Deck, FakeHandle) {
    let (transport, fake) = FakeTransport::new(length);
    (Deck::new(Box::new(transport), &AudioSettings::default()), fake)
}

fn loaded_deck(length: f64) -> (Deck, FakeHandle, ThumbnailCache) {
    let cache = ThumbnailCache::new(8);
    let (mut deck, fake) = deck(length);
    deck.load_track(&Track::new("Song", "3:20", "/music/song.mp3"), &cache)
        .unwrap();
    (deck, fake, cache)
}

fn press(deck: &mut Deck, button: Button, cache: &ThumbnailCache) {
    deck.dispatch(ControlEvent::ButtonPressed(button), cache)
        .unwrap();
}

fn slide(deck: &mut Deck, slider: Slider, value: f64, cache: &ThumbnailCache) {
    deck.dispatch(ControlEvent::SliderChanged(slider, value), cache)
        .unwrap();
}

fn cue(slot: usize, modifier: bool) -> Button {
    Button::Cue { slot, modifier }
}

#[test]
fn new_deck_applies_default_volume_and_speed() {
    let (deck, fake) = deck(200.0);
    assert!((fake.borrow().gain - 0.5).abs() < 1e-6);
    assert_eq!(fake.borrow().speed, 1.0);
    assert_eq!(deck.slider_value(Slider::Volume), 50.0);
}

#[test]
fn cue_sets_then_recalls_then_clears() {
    let (mut deck, fake, cache) = loaded_deck(200.0);

    fake.borrow_mut().position = 42.0;
    press(&mut deck, cue(0, false), &cache);
    assert_eq!(deck.panel().cues().get(0), Some(42.0));

    fake.borrow_mut().position = 99.0;
    press(&mut deck, cue(0, false), &cache);
    assert_eq!(deck.player().position_seconds(), 42.0);

    press(&mut deck, cue(0, true), &cache);
    assert_eq!(deck.panel().cues().get(0), None);

    // Unset again: the next plain press stores the new position.
    fake.borrow_mut().position = 7.0;
    press(&mut deck, cue(0, false), &cache);
    assert_eq!(deck.panel().cues().get(0), Some(7.0));
}

#[test]
fn cue_slots_are_independent() {
    let (mut deck, fake, cache) = loaded_deck(200.0);

    for (slot, at) in [(0, 10.0), (1, 20.0), (2, 30.0), (3, 40.0)] {
        fake.borrow_mut().position = at;
        press(&mut deck, cue(slot, false), &cache);
    }
    press(&mut deck, cue(1, true), &cache);

    assert_eq!(
        deck.panel().cues().slots(),
        &[Some(10.0), None, Some(30.0), Some(40.0)]
    );
}

#[test]
fn cue_slot_out_of_range_is_ignored() {
    let (mut deck, _fake, cache) = loaded_deck(200.0);
    press(&mut deck, cue(7, false), &cache);
    assert_eq!(deck.panel().cues().slots(), &[None; 4]);
}

#[test]
fn loading_resets_cues_and_panel() {
    let (mut deck, fake, cache) = loaded_deck(200.0);
    fake.borrow_mut().position = 12.0;
    press(&mut deck, cue(2, false), &cache);
    slide(&mut deck, Slider::Volume, 80.0, &cache);
    slide(&mut deck, Slider::Speed, 1.4, &cache);
    slide(&mut deck, Slider::LoopWindow, 4.0, &cache);
    assert!(deck.player().loop_region().is_some());

    deck.load_track(&Track::new("Next", "1:00", "/music/next.mp3"), &cache)
        .unwrap();

    assert_eq!(deck.panel().cues().slots(), &[None; 4]);
    assert_eq!(deck.slider_value(Slider::Volume), 50.0);
    assert_eq!(deck.slider_value(Slider::Speed), 1.0);
    assert_eq!(deck.slider_value(Slider::LoopWindow), 0.0);
    assert!((fake.borrow().gain - 0.5).abs() < 1e-6);
    assert_eq!(fake.borrow().speed, 1.0);
    assert_eq!(deck.player().loop_region(), None);
}

#[test]
fn failed_load_keeps_the_current_track() {
    let (mut deck, fake, cache) = loaded_deck(200.0);
    fake.borrow_mut().position = 12.0;
    press(&mut deck, cue(0, false), &cache);
    fake.borrow_mut().fail_loads = true;

    let result = deck.load_track(&Track::new("Bad", "0:00", "/music/bad.txt"), &cache);

    assert!(result.is_err());
    assert_eq!(deck.controller().view().title(), Some("Song"));
    assert_eq!(deck.panel().cues().get(0), Some(12.0));
}

#[test]
fn transport_buttons_highlight_only_with_a_track() {
    let cache = ThumbnailCache::new(8);
    let (mut empty, _fake) = deck(200.0);
    press(&mut empty, Button::Play, &cache);
    assert_eq!(empty.controller().highlight(), None);

    let (mut deck, fake, cache) = loaded_deck(200.0);
    press(&mut deck, Button::Play, &cache);
    assert_eq!(deck.controller().highlight(), Some(TransportButton::Play));
    assert!(fake.borrow().playing);

    press(&mut deck, Button::Stop, &cache);
    assert_eq!(deck.controller().highlight(), Some(TransportButton::Stop));
    assert_eq!(deck.player().state(), PlayerState::Stopped);
}

#[test]
fn position_slider_seeks_relative() {
    let (mut deck, fake, cache) = loaded_deck(200.0);

    slide(&mut deck, Slider::Position, 0.5, &cache);

    assert_eq!(fake.borrow().position, 100.0);
    assert!(!fake.borrow().playing);
}

#[test]
fn position_slider_at_end_restarts_and_plays() {
    let (mut deck, fake, cache) = loaded_deck(200.0);
    fake.borrow_mut().position = 150.0;

    slide(&mut deck, Slider::Position, 1.0, &cache);

    assert_eq!(fake.borrow().position, 0.0);
    assert!(fake.borrow().playing);
    assert_eq!(deck.player().state(), PlayerState::Playing);
}

#[test]
fn out_of_range_volume_keeps_engine_gain() {
    let (mut deck, fake, cache) = loaded_deck(200.0);
    slide(&mut deck, Slider::Volume, 70.0, &cache);
    slide(&mut deck, Slider::Volume, 140.0, &cache);
    assert!((fake.borrow().gain - 0.7).abs() < 1e-6);
}

#[test]
fn tick_refreshes_playhead_without_seeking() {
    let (mut deck, fake, mut cache) = loaded_deck(200.0);
    fake.borrow_mut().seeks.clear();
    fake.borrow_mut().position = 50.0;

    deck.tick(&mut cache);

    let view = deck.controller().view();
    assert_eq!(view.position(), 0.25);
    assert_eq!(view.remaining(), "2:30");
    assert_eq!(deck.slider_value(Slider::Position), 0.25);
    assert!(fake.borrow().seeks.is_empty());
}

#[test]
fn tick_on_empty_deck_leaves_controls() {
    let mut cache = ThumbnailCache::new(8);
    let (mut deck, _fake) = deck(200.0);
    deck.tick(&mut cache);
    assert_eq!(deck.controller().view().title(), None);
    assert_eq!(deck.slider_value(Slider::Position), 0.0);
}

#[test]
fn tick_wraps_an_active_loop() {
    let (mut deck, fake, mut cache) = loaded_deck(200.0);
    fake.borrow_mut().position = 30.0;
    slide(&mut deck, Slider::LoopWindow, 8.0, &cache);

    fake.borrow_mut().position = 30.2;
    deck.tick(&mut cache);

    assert_eq!(deck.player().position_seconds(), 22.0);
}

#[test]
fn dropped_file_loads_into_the_deck() {
    let cache = ThumbnailCache::new(8);
    let (mut deck, fake) = deck(200.0);

    deck.dispatch(
        ControlEvent::FileDropped(PathBuf::from("/music/dropped.mp3")),
        &cache,
    )
    .unwrap();

    assert_eq!(
        fake.borrow().loaded.as_deref(),
        Some(std::path::Path::new("/music/dropped.mp3"))
    );
    assert_eq!(deck.controller().view().title(), Some("dropped"));
}
