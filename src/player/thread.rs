use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{error, info};

use crate::config::PlaybackSettings;

use super::session::Session;
use super::sink::RodioBackend;
use super::types::{PlayerCmd, SessionHandle};

pub(super) fn spawn_player_thread(
    rx: Receiver<PlayerCmd>,
    session_handle: SessionHandle,
    playback: PlaybackSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        // The output stream lives on this thread; it is not sendable.
        let backend = match RodioBackend::open_default() {
            Ok(b) => b,
            Err(e) => {
                error!(error = %e, "audio output unavailable, transport disabled");
                // Keep draining so senders never error; leave on Quit.
                while let Ok(cmd) = rx.recv() {
                    if matches!(cmd, PlayerCmd::Quit) {
                        break;
                    }
                }
                return;
            }
        };

        let mut session = Session::new(
            backend,
            Duration::from_secs(playback.previous_grace_secs),
        );
        // The timeout doubles as the poll tick for signals and timing.
        let poll = Duration::from_millis(playback.poll_interval_ms.max(50));

        loop {
            match rx.recv_timeout(poll) {
                Ok(cmd) => {
                    let quit = matches!(cmd, PlayerCmd::Quit);
                    match cmd {
                        PlayerCmd::Play(track) => session.play(track),
                        PlayerCmd::PlayPlaylist { tracks, start } => {
                            session.play_playlist(tracks, start)
                        }
                        PlayerCmd::Pause => session.pause(),
                        PlayerCmd::Resume => session.resume(),
                        PlayerCmd::TogglePause => session.toggle_pause(),
                        PlayerCmd::Stop => session.stop(),
                        PlayerCmd::Next => session.next(),
                        PlayerCmd::Prev => session.previous(),
                        PlayerCmd::SeekTo(pos) => session.seek_to(pos),
                        PlayerCmd::SeekBy(secs) => session.seek_by(secs),
                        PlayerCmd::Quit => session.stop(),
                    }
                    // Drain any signal the command produced right away so the
                    // published snapshot doesn't lag a poll beat behind.
                    session.tick();
                    publish(&session, &session_handle);
                    if quit {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    session.tick();
                    publish(&session, &session_handle);
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        info!("player thread exited");
    })
}

fn publish(session: &Session<RodioBackend>, handle: &SessionHandle) {
    if let Ok(mut snap) = handle.lock() {
        *snap = session.snapshot();
    }
}
