use std::env;
use std::path::{Path, PathBuf};

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, PlaylistView};
use crate::audio::AudioOutput;
use crate::config::LibrarySettings;
use crate::deck::Deck;
use crate::library::{PlaylistStore, locate_playlist_file, scan};

mod event_loop;
mod keymap;
mod logging;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_problem) = settings::load_settings();

    match logging::init(&settings.logging) {
        Ok(path) => log::info!(
            "duodeck {} starting, logging to {}",
            env!("CARGO_PKG_VERSION"),
            path.display()
        ),
        Err(e) => eprintln!("duodeck: logging disabled: {e}"),
    }
    if let Some(msg) = config_problem {
        log::warn!("{msg}, using defaults");
    }

    let cwd = env::current_dir()?;
    let music_dir = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| settings.library.music_dir.clone())
        .unwrap_or_else(|| cwd.clone());

    let playlist = open_playlist(&settings.library, &cwd);
    let browser = scan(&music_dir, &settings.library);

    // Both decks feed the same output mixer, which must outlive them.
    let output = AudioOutput::open_default()?;
    let decks = [
        Deck::new(Box::new(output.new_transport()), &settings.audio),
        Deck::new(Box::new(output.new_transport()), &settings.audio),
    ];
    let mut app = App::new(decks, playlist, browser, music_dir, &settings);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &run_result {
        log::error!("Event loop failed: {e}");
    }
    log::info!("duodeck exiting");
    run_result
}

/// Open the playlist file, or a disabled view when there is nowhere to keep it.
fn open_playlist(settings: &LibrarySettings, cwd: &Path) -> PlaylistView {
    let location = locate_playlist_file(
        settings.playlist_path.as_deref(),
        cwd,
        &settings.playlist_file_name,
        settings.resources_search_depth,
    );
    let Some(path) = location else {
        log::warn!(
            "No Resources folder within {} levels of {}; playlist disabled",
            settings.resources_search_depth,
            cwd.display()
        );
        return PlaylistView::new(None);
    };

    match PlaylistStore::create(path) {
        Ok(store) => PlaylistView::new(Some(store)),
        Err(e) => {
            log::error!("{e}; playlist disabled");
            PlaylistView::new(None)
        }
    }
}
