//! UI rendering for the terminal user interface.
//!
//! Layout, top to bottom: header, the deck row (deck A, its mixer panel,
//! deck B's mixer panel, deck B), the playlist, and the controls footer.
//! The library browser is drawn as a popup over the playlist.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, DeckId, Mode};
use crate::audio::{CUE_SLOTS, Thumbnail};
use crate::config::UiSettings;
use crate::deck::{Deck, Slider, TransportButton};
use crate::library::{Track, format_length};

const CONTROLS: &[(&str, &str)] = &[
    ("tab", "deck"),
    ("p/space/s", "play/pause/stop"),
    ("h/l", "seek"),
    ("-/=", "volume"),
    ("[/]", "speed"),
    (",/.", "loop"),
    ("1-4", "cue (ctrl/shift clears)"),
    ("j/k", "select"),
    ("enter", "load"),
    ("d", "delete"),
    ("/", "search"),
    ("b", "library"),
    ("q", "quit"),
];

const BARS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// The slice of a `total`-row list to draw in `height` rows so that
/// `selected` stays near the middle. Returns `(start, end, selected_in_window)`.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize, usize) {
    if total <= height || height == 0 {
        return (0, total, selected);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height, selected - start)
}

/// Render `columns` (peaks in 0..=1) as `rows` lines of bar characters,
/// bottom-aligned, with the `playhead` column highlighted.
fn waveform_lines(columns: &[f32], rows: u16, playhead: Option<usize>) -> Vec<Line<'static>> {
    let rows = rows as usize;
    let eighths_total = rows * 8;
    (0..rows)
        .map(|row| {
            let from_bottom = rows - 1 - row;
            let spans: Vec<Span> = columns
                .iter()
                .enumerate()
                .map(|(col, amp)| {
                    let filled = (amp.clamp(0.0, 1.0) * eighths_total as f32).round() as usize;
                    let level = filled.saturating_sub(from_bottom * 8).min(8);
                    if Some(col) == playhead {
                        let ch = if level == 0 { '│' } else { BARS[level] };
                        Span::styled(ch.to_string(), Style::default().fg(Color::Yellow))
                    } else {
                        Span::styled(BARS[level].to_string(), Style::default().fg(Color::Cyan))
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Render the entire UI into `frame`.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(12),
            Constraint::Min(5),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" duodeck ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let deck_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(15),
            Constraint::Percentage(15),
            Constraint::Percentage(35),
        ])
        .split(chunks[1]);
    draw_deck(frame, app, DeckId::A, deck_row[0]);
    draw_panel(frame, app, DeckId::A, deck_row[1]);
    draw_panel(frame, app, DeckId::B, deck_row[2]);
    draw_deck(frame, app, DeckId::B, deck_row[3]);

    draw_playlist(frame, app, chunks[2]);
    if app.mode() == Mode::Browser {
        draw_browser(frame, app, chunks[2]);
    }

    let mut footer_lines = vec![Line::from(controls_text())];
    if let Some(status) = app.status() {
        footer_lines.insert(0, Line::from(status.to_string()).bold());
    }
    let footer = Paragraph::new(footer_lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}

fn deck_block(app: &App, id: DeckId, title: String) -> Block<'static> {
    let block = Block::default().borders(Borders::ALL).title(title);
    if app.focus() == id {
        block.border_style(Style::default().fg(Color::Yellow))
    } else {
        block
    }
}

fn draw_deck(frame: &mut Frame, app: &App, id: DeckId, area: Rect) {
    let deck = app.deck(id);
    let block = deck_block(app, id, format!(" deck {} ", id.label()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let view = deck.controller().view();
    let title_line = match view.title() {
        Some(title) => Line::from(vec![
            Span::from(title.to_string()).bold(),
            Span::from(format!("  -{}", view.remaining())),
        ]),
        None => Line::from("drop a file or press enter on a playlist row").dim(),
    };
    frame.render_widget(Paragraph::new(title_line), rows[0]);

    draw_waveform(frame, deck, rows[1]);

    let player = deck.player();
    let transport = |button: TransportButton, label: &'static str| {
        if deck.controller().highlight() == Some(button) {
            Span::from(label).reversed()
        } else {
            Span::from(label)
        }
    };
    let info = Line::from(vec![
        transport(TransportButton::Play, " PLAY "),
        Span::from(" "),
        transport(TransportButton::Pause, " PAUSE "),
        Span::from(" "),
        transport(TransportButton::Stop, " STOP "),
        Span::from(format!(
            "  {}  {} / {}",
            player.state().label(),
            format_length(player.position_seconds()),
            format_length(player.length_seconds())
        )),
    ]);
    frame.render_widget(Paragraph::new(info), rows[2]);

    let width = rows[3].width as usize;
    let pos = deck.slider_value(Slider::Position).clamp(0.0, 1.0);
    let filled = ((width as f64) * pos).round() as usize;
    let bar = format!(
        "{}{}",
        "━".repeat(filled.min(width)),
        "─".repeat(width.saturating_sub(filled))
    );
    frame.render_widget(Paragraph::new(bar).fg(Color::DarkGray), rows[3]);
}

fn draw_waveform(frame: &mut Frame, deck: &Deck, area: Rect) {
    let view = deck.controller().view();
    let width = area.width as usize;
    if width == 0 || area.height == 0 {
        return;
    }

    let Some(thumb) = view.thumbnail() else {
        let msg = if view.is_computing() {
            "reading waveform..."
        } else if view.title().is_some() {
            "no waveform"
        } else {
            ""
        };
        frame.render_widget(
            Paragraph::new(msg).alignment(Alignment::Center).dim(),
            area,
        );
        return;
    };

    let playhead = playhead_column(thumb, view.position(), width);
    let lines = waveform_lines(&thumb.columns(width), area.height, playhead);
    frame.render_widget(Paragraph::new(lines), area);

    if let Some(region) = deck.player().loop_region() {
        let total = deck.player().length_seconds();
        if total > 0.0 {
            let col = |secs: f64| ((secs.max(0.0) / total) * width as f64) as usize;
            let (from, to) = (col(region.start), col(region.end).min(width));
            let marker = Rect {
                x: area.x + from as u16,
                y: area.y,
                width: to.saturating_sub(from).max(1) as u16,
                height: 1,
            }
            .intersection(area);
            frame.render_widget(
                Paragraph::new("▔".repeat(marker.width as usize)).fg(Color::Green),
                marker,
            );
        }
    }
}

fn playhead_column(thumb: &Thumbnail, position: f64, width: usize) -> Option<usize> {
    if thumb.is_empty() || width == 0 {
        return None;
    }
    let col = (position.clamp(0.0, 1.0) * width as f64) as usize;
    Some(col.min(width - 1))
}

fn draw_panel(frame: &mut Frame, app: &App, id: DeckId, area: Rect) {
    let deck = app.deck(id);
    let panel = deck.panel();
    let block = deck_block(app, id, format!(" mix {} ", id.label()));

    let loop_text = match deck.player().loop_region() {
        Some(region) => format!(
            "{:.0} s  {}-{}",
            region.window,
            format_length(region.start),
            format_length(region.end)
        ),
        None => format!("{:.0} s  off", panel.loop_window()),
    };

    let mut lines = vec![
        Line::from(format!("VOLUME  {:.0}%", panel.volume())),
        Line::from(format!("SPEED   {:.1}x", panel.speed())),
        Line::from(format!("LOOP    {loop_text}")),
        Line::from(""),
        Line::from("HOT CUES").bold(),
    ];
    for slot in 0..CUE_SLOTS {
        let text = match panel.cues().get(slot) {
            Some(at) => Span::from(format!(" {} {} ", slot + 1, format_length(at)))
                .fg(Color::Black)
                .bg(Color::Green),
            None => Span::from(format!(" {} --:-- ", slot + 1)),
        };
        lines.push(Line::from(text));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn track_item(track: &Track) -> ListItem<'_> {
    ListItem::new(Line::from(vec![
        Span::from(track.title()),
        Span::from(format!("  {}", track.length())).dim(),
    ]))
}

fn draw_playlist(frame: &mut Frame, app: &App, area: Rect) {
    let playlist = app.playlist();

    let mut title = format!(
        " playlist {}/{} ",
        playlist.visible_len(),
        playlist.total_len()
    );
    if app.mode() == Mode::Search || !playlist.query().is_empty() {
        title.push_str(&format!("search: {}_ ", playlist.query()));
    }
    let block = Block::default().borders(Borders::ALL).title(title);

    if !playlist.is_enabled() {
        let msg = Paragraph::new("No playlist file. Create a Resources folder or set library.playlist_path.")
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(msg, area);
        return;
    }

    // Only build items for the visible window.
    let total = playlist.visible_len();
    let height = area.height.saturating_sub(2) as usize;
    let (start, end, selected) = visible_window(total, height, playlist.selected());
    let items: Vec<ListItem> = playlist
        .visible()
        .skip(start)
        .take(end - start)
        .map(track_item)
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_browser(frame: &mut Frame, app: &App, area: Rect) {
    let popup = centered_rect_sized(area.width.saturating_sub(8), area.height, area);
    frame.render_widget(Clear, popup);

    let tracks = app.browser();
    let height = popup.height.saturating_sub(2) as usize;
    let (start, end, selected) = visible_window(tracks.len(), height, app.browser_selected());
    let items: Vec<ListItem> = tracks[start..end].iter().map(track_item).collect();

    let title = format!(
        " library: {} (enter adds, o loads, esc closes) ",
        app.browser_dir().display()
    );
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if !tracks.is_empty() {
        state.select(Some(selected));
    }
    frame.render_stateful_widget(list, popup, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_window_keeps_selection_centred() {
        assert_eq!(visible_window(5, 10, 3), (0, 5, 3));
        assert_eq!(visible_window(100, 10, 50), (45, 55, 5));
        assert_eq!(visible_window(100, 10, 98), (90, 100, 8));
        assert_eq!(visible_window(100, 10, 2), (0, 10, 2));
    }

    #[test]
    fn waveform_bars_fill_from_the_bottom() {
        let lines = waveform_lines(&[1.0, 0.5, 0.0], 2, None);
        let text: Vec<String> = lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(text, vec!["█  ".to_string(), "██ ".to_string()]);
    }

    #[test]
    fn playhead_shows_on_empty_columns() {
        let lines = waveform_lines(&[0.0, 0.0], 1, Some(1));
        assert_eq!(lines[0].spans[1].content, "│");
    }
}
