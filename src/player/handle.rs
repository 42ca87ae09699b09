use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::config::PlaybackSettings;

use super::thread::spawn_player_thread;
use super::types::{PlayerCmd, SessionHandle, SessionSnapshot};

/// Handle to the player thread: a command sender plus the shared session
/// snapshot the thread publishes.
pub struct Player {
    tx: Sender<PlayerCmd>,
    session: SessionHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl Player {
    pub fn spawn(playback: PlaybackSettings) -> Self {
        let (tx, rx) = mpsc::channel::<PlayerCmd>();
        let session: SessionHandle = Arc::new(Mutex::new(SessionSnapshot::default()));

        let join = spawn_player_thread(rx, session.clone(), playback);

        Self {
            tx,
            session,
            join: Mutex::new(Some(join)),
        }
    }

    pub fn session_handle(&self) -> SessionHandle {
        self.session.clone()
    }

    pub fn send(&self, cmd: PlayerCmd) -> Result<(), mpsc::SendError<PlayerCmd>> {
        self.tx.send(cmd)
    }

    /// Stop playback, shut the player thread down and wait for it.
    pub fn quit(&self) {
        let _ = self.send(PlayerCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}
