//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`: the
//! playlists pane, the track pane and the now-playing bar fed by the
//! published session snapshot.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, Pane};
use crate::config::{ControlsSettings, TimeField, UiSettings};
use crate::player::SessionSnapshot;

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    [
        "[j/k] up/down".to_string(),
        "[tab] switch pane".to_string(),
        "[enter] open/play".to_string(),
        "[space/p] play/pause".to_string(),
        "[h/l] prev/next".to_string(),
        "[s] play single".to_string(),
        format!("[H/L] scrub -/+{}s", scrub_seconds),
        "[x] stop".to_string(),
        "[gg/G] top/bottom".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Build the now-playing time text (elapsed/total/remaining) per `UiSettings`.
fn now_playing_time_text(
    elapsed: Duration,
    total: Option<Duration>,
    ui: &UiSettings,
) -> Option<String> {
    if ui.now_playing_time_fields.is_empty() {
        return None;
    }

    let mut parts: Vec<String> = Vec::new();
    for f in &ui.now_playing_time_fields {
        match f {
            TimeField::Elapsed => parts.push(format_mmss(elapsed)),
            TimeField::Total => {
                if let Some(t) = total {
                    parts.push(format_mmss(t));
                }
            }
            TimeField::Remaining => {
                if let Some(t) = total {
                    let rem = t.saturating_sub(elapsed);
                    parts.push(format!("-{}", format_mmss(rem)));
                }
            }
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(&ui.now_playing_time_separator))
    }
}

fn progress_ratio(snap: &SessionSnapshot) -> f64 {
    match snap.duration {
        Some(d) if !d.is_zero() => {
            (snap.position.as_secs_f64() / d.as_secs_f64()).clamp(0.0, 1.0)
        }
        _ => 0.0,
    }
}

/// Render the entire UI into the provided `frame` using `app` state, the
/// session snapshot and settings.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    snap: &SessionSnapshot,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let mut header_text = ui_settings.header_text.clone();
    if let Some(label) = &app.source_label {
        header_text.push_str(&format!(" [{}]", label));
    }
    let header = Paragraph::new(header_text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" manasik ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Main area: playlists on the left, tracks of the selected playlist on
    // the right.
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);

    {
        let playing_playlist = snap.track.as_ref().map(|t| t.playlist_id.as_str());
        let items: Vec<ListItem> = app
            .playlists
            .iter()
            .map(|p| {
                let marker = if Some(p.id.as_str()) == playing_playlist {
                    "* "
                } else {
                    "  "
                };
                ListItem::new(format!("{}{} ({})", marker, p.title, p.tracks.len()))
            })
            .collect();
        let focused = app.pane == Pane::Playlists;
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(if focused { " playlists * " } else { " playlists " }),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol(if focused { "> " } else { "  " });
        let mut state = ratatui::widgets::ListState::default();
        if app.has_playlists() {
            state.select(Some(app.playlist_cursor));
        }
        frame.render_stateful_widget(list, panes[0], &mut state);
    }

    {
        let playing_id = snap.track.as_ref().map(|t| t.id.as_str());
        let tracks = app.selected_playlist().map(|p| p.tracks.as_slice()).unwrap_or(&[]);
        let items: Vec<ListItem> = tracks
            .iter()
            .map(|t| {
                let marker = if Some(t.id.as_str()) == playing_id { "* " } else { "  " };
                let text = match t.duration {
                    Some(d) => format!("{}{} [{}]", marker, t.title, format_mmss(d)),
                    None => format!("{}{}", marker, t.title),
                };
                ListItem::new(text)
            })
            .collect();
        let focused = app.pane == Pane::Tracks;
        let mut title = match app.selected_playlist() {
            Some(p) => match &p.description {
                Some(d) => format!(" {}: {} ", p.title, d),
                None => format!(" {} ", p.title),
            },
            None => " tracks ".to_string(),
        };
        if focused {
            title.push_str("* ");
        }
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol(if focused { "> " } else { "  " });
        let mut state = ratatui::widgets::ListState::default();
        if !tracks.is_empty() {
            state.select(Some(app.track_cursor));
        }
        frame.render_stateful_widget(list, panes[1], &mut state);
    }

    // Now-playing bar: progress gauge plus the mini-player line.
    {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" now playing ")
            .padding(Padding {
                left: 1,
                right: 1,
                top: 0,
                bottom: 0,
            });
        let inner = block.inner(chunks[2]);
        frame.render_widget(block, chunks[2]);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        match &snap.track {
            Some(track) => {
                let gauge = Gauge::default()
                    .ratio(progress_ratio(snap))
                    .label("")
                    .use_unicode(true);
                frame.render_widget(gauge, rows[0]);

                let mut parts: Vec<String> = vec![track.title.clone()];
                let mut origin = track.playlist_title.clone();
                if snap.playlist_len > 1 {
                    if let Some(i) = snap.index {
                        origin.push_str(&format!(" {}/{}", i + 1, snap.playlist_len));
                    }
                }
                parts.push(origin);
                frame.render_widget(Paragraph::new(parts.join(" • ")), rows[1]);

                let state = if snap.loading {
                    "Loading..."
                } else if snap.playing {
                    "Playing"
                } else {
                    "Paused"
                };
                let mut status = state.to_string();
                if let Some(time) = now_playing_time_text(snap.position, snap.duration, ui_settings)
                {
                    status.push_str(&format!(" • {}", time));
                }
                let mut hints: Vec<&str> = Vec::new();
                if snap.has_previous() {
                    hints.push("[h] prev");
                }
                if snap.has_next() {
                    hints.push("[l] next");
                }
                if !hints.is_empty() {
                    status.push_str(&format!(" • {}", hints.join(" ")));
                }
                frame.render_widget(Paragraph::new(status), rows[2]);
            }
            None => {
                frame.render_widget(
                    Paragraph::new("Nothing playing. Pick a track and press Enter."),
                    rows[1],
                );
            }
        }
    }

    let footer_text = controls_text(controls_settings.scrub_seconds);
    let footer = Paragraph::new(footer_text)
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
