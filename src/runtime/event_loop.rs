use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Pane};
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle, MprisPlayback};
use crate::player::{Player, PlayerCmd, SessionSnapshot};
use crate::runtime::mpris_sync::{status_of, update_mpris};
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Last-known track id as emitted to MPRIS.
    last_mpris_track: Option<String>,
    /// Last-known playback state as emitted to MPRIS.
    last_mpris_playback: MprisPlayback,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self {
            pending_gg: false,
            last_mpris_track: None,
            last_mpris_playback: MprisPlayback::Stopped,
        }
    }
}

/// Main terminal event loop: handles input, UI drawing, sync with the player
/// thread and MPRIS. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &Player,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<()> {
    loop {
        let snap = current_snapshot(app);

        // Keep MPRIS in sync even when playback changes come from XF86/media
        // keys or auto-advance.
        let track_key = snap.track.as_ref().map(|t| t.id.clone());
        let status = status_of(&snap);
        if track_key != state.last_mpris_track || status != state.last_mpris_playback {
            update_mpris(mpris, &snap);
            state.last_mpris_track = track_key;
            state.last_mpris_playback = status;
        }

        terminal.draw(|f| ui::draw(f, app, &snap, &settings.ui, &settings.controls))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app, player, &snap) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, player, control_tx, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// One clone of the published session snapshot per frame.
fn current_snapshot(app: &App) -> SessionSnapshot {
    app.session_handle
        .as_ref()
        .and_then(|h| h.lock().ok().map(|s| s.clone()))
        .unwrap_or_default()
}

/// Play the selected playlist starting at the cursor track.
fn play_selection(app: &App, player: &Player) {
    let Some(playlist) = app.selected_playlist() else {
        return;
    };
    if playlist.tracks.is_empty() {
        return;
    }
    let start = app.track_cursor.min(playlist.tracks.len() - 1);
    let _ = player.send(PlayerCmd::PlayPlaylist {
        tracks: playlist.tracks.clone(),
        start,
    });
}

fn handle_control_cmd(
    cmd: ControlCmd,
    app: &App,
    player: &Player,
    snap: &SessionSnapshot,
) -> bool {
    match cmd {
        ControlCmd::Quit => {
            player.quit();
            return true;
        }
        ControlCmd::Play => {
            if snap.track.is_some() {
                let _ = player.send(PlayerCmd::Resume);
            } else {
                play_selection(app, player);
            }
        }
        ControlCmd::Pause => {
            let _ = player.send(PlayerCmd::Pause);
        }
        ControlCmd::PlayPause => {
            if snap.track.is_some() {
                let _ = player.send(PlayerCmd::TogglePause);
            } else {
                play_selection(app, player);
            }
        }
        ControlCmd::Stop => {
            let _ = player.send(PlayerCmd::Stop);
        }
        ControlCmd::Next => {
            let _ = player.send(PlayerCmd::Next);
        }
        ControlCmd::Prev => {
            let _ = player.send(PlayerCmd::Prev);
        }
        ControlCmd::SeekTo(pos) => {
            let _ = player.send(PlayerCmd::SeekTo(pos));
        }
    }

    false
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    player: &Player,
    control_tx: &mpsc::Sender<ControlCmd>,
    state: &mut EventLoopState,
) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            player.quit();
            return true;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            state.pending_gg = false;
            app.toggle_pane();
        }
        KeyCode::Esc => {
            state.pending_gg = false;
            app.focus_playlists();
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            app.select_last();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.select_next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.select_previous();
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            match app.pane {
                Pane::Playlists => app.focus_tracks(),
                Pane::Tracks => play_selection(app, player),
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('s') => {
            // Play the cursor track on its own, outside its playlist.
            state.pending_gg = false;
            if let Some(track) = app.selected_track() {
                let _ = player.send(PlayerCmd::Play(track.clone()));
            }
        }
        KeyCode::Char('l') | KeyCode::Right => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Next);
        }
        KeyCode::Char('h') | KeyCode::Left => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Prev);
        }
        KeyCode::Char('L') => {
            state.pending_gg = false;
            let secs = settings.controls.scrub_seconds.min(i64::MAX as u64) as i64;
            let _ = player.send(PlayerCmd::SeekBy(secs));
        }
        KeyCode::Char('H') => {
            state.pending_gg = false;
            let secs = settings.controls.scrub_seconds.min(i64::MAX as u64) as i64;
            let _ = player.send(PlayerCmd::SeekBy(-secs));
        }
        KeyCode::Char('x') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Stop);
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            state.pending_gg = false;
        }
        _ => {}
    }

    false
}
