//! Terminal input to `Action`s. Which keys mean what depends on the mode.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{Action, Mode};
use crate::deck::{Button, Slider};
use crate::library::resolve_path;

/// Map one key press. `None` means the key does nothing in `mode`.
pub fn map_key(key: KeyEvent, mode: Mode) -> Option<Action> {
    match mode {
        Mode::Normal => map_normal(key),
        Mode::Search => map_search(key),
        Mode::Browser => map_browser(key),
    }
}

fn map_normal(key: KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Tab => Action::SwitchFocus,
        KeyCode::Char('p') => Action::Press(Button::Play),
        KeyCode::Char(' ') => Action::Press(Button::Pause),
        KeyCode::Char('s') => Action::Press(Button::Stop),
        KeyCode::Char('h') | KeyCode::Left => Action::Nudge(Slider::Position, -1.0),
        KeyCode::Char('l') | KeyCode::Right => Action::Nudge(Slider::Position, 1.0),
        KeyCode::Char('-') => Action::Nudge(Slider::Volume, -1.0),
        KeyCode::Char('=') | KeyCode::Char('+') => Action::Nudge(Slider::Volume, 1.0),
        KeyCode::Char('[') => Action::Nudge(Slider::Speed, -1.0),
        KeyCode::Char(']') => Action::Nudge(Slider::Speed, 1.0),
        KeyCode::Char(',') => Action::Nudge(Slider::LoopWindow, -1.0),
        KeyCode::Char('.') => Action::Nudge(Slider::LoopWindow, 1.0),
        KeyCode::Char('j') | KeyCode::Down => Action::SelectNext,
        KeyCode::Char('k') | KeyCode::Up => Action::SelectPrev,
        KeyCode::Enter => Action::Activate,
        KeyCode::Char('d') => Action::DeleteSelected,
        KeyCode::Char('/') => Action::StartSearch,
        KeyCode::Char('b') => Action::OpenBrowser,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Char(c) => {
            let (slot, modifier) = cue_key(c, key.modifiers)?;
            Action::Press(Button::Cue { slot, modifier })
        }
        _ => return None,
    };
    Some(action)
}

/// Hot cue keys: `1`..`4` set or recall; with Ctrl/Alt, or shifted
/// (`!@#$`), they clear.
fn cue_key(c: char, modifiers: KeyModifiers) -> Option<(usize, bool)> {
    let held = modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    match c {
        '1'..='4' => Some((c as usize - '1' as usize, held)),
        '!' => Some((0, true)),
        '@' => Some((1, true)),
        '#' => Some((2, true)),
        '$' => Some((3, true)),
        _ => None,
    }
}

fn map_search(key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let action = match key.code {
        KeyCode::Esc => Action::Cancel,
        KeyCode::Enter => Action::Activate,
        KeyCode::Backspace => Action::SearchBackspace,
        KeyCode::Tab => Action::SwitchFocus,
        KeyCode::Down => Action::SelectNext,
        KeyCode::Up => Action::SelectPrev,
        KeyCode::Char('j') if ctrl => Action::SelectNext,
        KeyCode::Char('k') if ctrl => Action::SelectPrev,
        KeyCode::Char(c) if !ctrl && !c.is_control() => Action::SearchInput(c),
        _ => return None,
    };
    Some(action)
}

fn map_browser(key: KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('q') => Action::Cancel,
        KeyCode::Char('j') | KeyCode::Down => Action::SelectNext,
        KeyCode::Char('k') | KeyCode::Up => Action::SelectPrev,
        KeyCode::Enter => Action::Activate,
        KeyCode::Char('o') => Action::LoadFromBrowser,
        KeyCode::Tab => Action::SwitchFocus,
        _ => return None,
    };
    Some(action)
}

/// A bracketed paste is treated as a file drop when it names exactly one
/// existing file. Terminals paste dragged files as a path or a `file://`
/// URI, sometimes quoted.
pub fn map_paste(text: &str) -> Option<Action> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.contains(['\n', '\r']) {
        return None;
    }
    let unquoted = trimmed
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| trimmed.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
        .unwrap_or(trimmed);

    let path = resolve_path(unquoted);
    if path.is_file() {
        Some(Action::Drop(path))
    } else {
        log::debug!("Ignoring paste, not a file: {unquoted}");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn cue(slot: usize, modifier: bool) -> Option<Action> {
        Some(Action::Press(Button::Cue { slot, modifier }))
    }

    #[test]
    fn transport_keys() {
        assert_eq!(
            map_key(key(KeyCode::Char('p')), Mode::Normal),
            Some(Action::Press(Button::Play))
        );
        assert_eq!(
            map_key(key(KeyCode::Char(' ')), Mode::Normal),
            Some(Action::Press(Button::Pause))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('s')), Mode::Normal),
            Some(Action::Press(Button::Stop))
        );
    }

    #[test]
    fn digits_press_cues_and_modifiers_clear() {
        assert_eq!(map_key(key(KeyCode::Char('1')), Mode::Normal), cue(0, false));
        assert_eq!(map_key(key(KeyCode::Char('4')), Mode::Normal), cue(3, false));
        assert_eq!(
            map_key(
                KeyEvent::new(KeyCode::Char('2'), KeyModifiers::CONTROL),
                Mode::Normal
            ),
            cue(1, true)
        );
        assert_eq!(
            map_key(
                KeyEvent::new(KeyCode::Char('3'), KeyModifiers::ALT),
                Mode::Normal
            ),
            cue(2, true)
        );
        assert_eq!(
            map_key(
                KeyEvent::new(KeyCode::Char('$'), KeyModifiers::SHIFT),
                Mode::Normal
            ),
            cue(3, true)
        );
        assert_eq!(map_key(key(KeyCode::Char('5')), Mode::Normal), None);
    }

    #[test]
    fn search_mode_types_letters_that_are_commands_elsewhere() {
        assert_eq!(
            map_key(key(KeyCode::Char('q')), Mode::Search),
            Some(Action::SearchInput('q'))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('p')), Mode::Search),
            Some(Action::SearchInput('p'))
        );
        assert_eq!(
            map_key(
                KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CONTROL),
                Mode::Search
            ),
            Some(Action::SelectNext)
        );
    }

    #[test]
    fn browser_mode_keys() {
        assert_eq!(
            map_key(key(KeyCode::Char('o')), Mode::Browser),
            Some(Action::LoadFromBrowser)
        );
        assert_eq!(
            map_key(key(KeyCode::Char('q')), Mode::Browser),
            Some(Action::Cancel)
        );
        assert_eq!(map_key(key(KeyCode::Char('p')), Mode::Browser), None);
    }

    #[test]
    fn paste_of_existing_file_is_a_drop() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("my song.mp3");
        fs::write(&file, b"").unwrap();
        let shown = file.display().to_string();

        assert_eq!(map_paste(&shown), Some(Action::Drop(file.clone())));
        assert_eq!(
            map_paste(&format!("'{shown}'\n")),
            Some(Action::Drop(file.clone()))
        );
        let uri = format!("file://{}", shown.replace(' ', "%20"));
        assert_eq!(map_paste(&uri), Some(Action::Drop(file)));
    }

    #[test]
    fn paste_of_anything_else_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(map_paste("hello"), None);
        assert_eq!(map_paste(&dir.path().display().to_string()), None);
        assert_eq!(map_paste("/a.mp3\n/b.mp3"), None);
    }
}
