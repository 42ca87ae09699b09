//! Player-facing small types and handles.
//!
//! This module defines the transport command enum, the published session
//! snapshot and the shared handle types used across the player subsystem.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::catalog::Track;

#[derive(Debug)]
pub enum PlayerCmd {
    /// Start a single-track session.
    Play(Track),
    /// Start a playlist session at the given track position.
    PlayPlaylist { tracks: Vec<Track>, start: usize },
    /// Pause the current track.
    Pause,
    /// Resume the current track.
    Resume,
    /// Toggle pause/resume.
    TogglePause,
    /// Tear the session down to idle.
    Stop,
    /// Skip to the next playlist track.
    Next,
    /// Restart the current track or go to the previous one.
    Prev,
    /// Seek to an absolute position in the current track.
    SeekTo(Duration),
    /// Seek by the specified number of seconds (positive or negative).
    SeekBy(i64),
    /// Quit the player thread.
    Quit,
}

/// Published view of the playback session, refreshed on every poll beat.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    /// The current track, if one is bound.
    pub track: Option<Track>,
    /// Whether audio is actively rolling.
    pub playing: bool,
    /// Whether the bound track is still loading or buffering.
    pub loading: bool,
    /// Position within the current track.
    pub position: Duration,
    /// Total length of the current track, once known.
    pub duration: Option<Duration>,
    /// Number of tracks in the bound playlist.
    pub playlist_len: usize,
    /// Position of the current track within the playlist.
    pub index: Option<usize>,
}

impl SessionSnapshot {
    /// True when a playlist successor exists.
    pub fn has_next(&self) -> bool {
        matches!(self.index, Some(i) if i + 1 < self.playlist_len)
    }

    /// True when a playlist predecessor exists.
    pub fn has_previous(&self) -> bool {
        matches!(self.index, Some(i) if i > 0)
    }
}

pub type SessionHandle = Arc<Mutex<SessionSnapshot>>;
