use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::ui;

use super::keymap::{map_key, map_paste};

/// Main terminal event loop: input, the deck poll timer and drawing.
/// Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick = Duration::from_millis(settings.audio.tick_ms);
    let mut last_tick = Instant::now();

    loop {
        if last_tick.elapsed() >= tick {
            app.tick();
            last_tick = Instant::now();
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let action = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => map_key(key, app.mode()),
            Event::Paste(text) => map_paste(&text),
            _ => None,
        };
        if let Some(action) = action {
            log::trace!("{action:?}");
            if app.dispatch(action) {
                break;
            }
        }
    }

    Ok(())
}
