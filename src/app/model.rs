//! Application model types: `App` and `Pane`.
//!
//! The `App` struct holds the loaded playlists, which pane has focus, the
//! list cursors and the session handle used to observe playback.

use crate::catalog::{Playlist, Track};
use crate::player::SessionHandle;

/// Which list currently has keyboard focus.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Pane {
    Playlists,
    Tracks,
}

/// The main application model.
pub struct App {
    pub playlists: Vec<Playlist>,
    pub pane: Pane,
    pub playlist_cursor: usize,
    pub track_cursor: usize,
    pub session_handle: Option<SessionHandle>,
    /// Where the catalog came from, shown in the header.
    pub source_label: Option<String>,
}

impl App {
    /// Create a new `App` over the loaded `playlists`.
    pub fn new(playlists: Vec<Playlist>) -> Self {
        Self {
            playlists,
            pane: Pane::Playlists,
            playlist_cursor: 0,
            track_cursor: 0,
            session_handle: None,
            source_label: None,
        }
    }

    /// Attach the shared session handle used to observe playback.
    pub fn set_session_handle(&mut self, h: SessionHandle) {
        self.session_handle = Some(h);
    }

    /// Record where the catalog was loaded from.
    pub fn set_source_label(&mut self, label: String) {
        self.source_label = Some(label);
    }

    /// Return true if the catalog contains any playlists.
    pub fn has_playlists(&self) -> bool {
        !self.playlists.is_empty()
    }

    /// The playlist under the cursor, if any.
    pub fn selected_playlist(&self) -> Option<&Playlist> {
        self.playlists.get(self.playlist_cursor)
    }

    /// The track under the cursor within the selected playlist, if any.
    pub fn selected_track(&self) -> Option<&Track> {
        self.selected_playlist()
            .and_then(|p| p.tracks.get(self.track_cursor))
    }

    /// Move the cursor down in the focused pane, wrapping at the end.
    pub fn select_next(&mut self) {
        match self.pane {
            Pane::Playlists => {
                let len = self.playlists.len();
                if len > 0 {
                    self.playlist_cursor = (self.playlist_cursor + 1) % len;
                    self.track_cursor = 0;
                }
            }
            Pane::Tracks => {
                let len = self.selected_playlist().map_or(0, |p| p.tracks.len());
                if len > 0 {
                    self.track_cursor = (self.track_cursor + 1) % len;
                }
            }
        }
    }

    /// Move the cursor up in the focused pane, wrapping at the start.
    pub fn select_previous(&mut self) {
        match self.pane {
            Pane::Playlists => {
                let len = self.playlists.len();
                if len > 0 {
                    self.playlist_cursor = self.playlist_cursor.checked_sub(1).unwrap_or(len - 1);
                    self.track_cursor = 0;
                }
            }
            Pane::Tracks => {
                let len = self.selected_playlist().map_or(0, |p| p.tracks.len());
                if len > 0 {
                    self.track_cursor = self.track_cursor.checked_sub(1).unwrap_or(len - 1);
                }
            }
        }
    }

    /// Jump to the first entry of the focused pane.
    pub fn select_first(&mut self) {
        match self.pane {
            Pane::Playlists => {
                self.playlist_cursor = 0;
                self.track_cursor = 0;
            }
            Pane::Tracks => self.track_cursor = 0,
        }
    }

    /// Jump to the last entry of the focused pane.
    pub fn select_last(&mut self) {
        match self.pane {
            Pane::Playlists => {
                if !self.playlists.is_empty() {
                    self.playlist_cursor = self.playlists.len() - 1;
                    self.track_cursor = 0;
                }
            }
            Pane::Tracks => {
                let len = self.selected_playlist().map_or(0, |p| p.tracks.len());
                if len > 0 {
                    self.track_cursor = len - 1;
                }
            }
        }
    }

    /// Focus the track list of the selected playlist, when it has tracks.
    pub fn focus_tracks(&mut self) {
        if self
            .selected_playlist()
            .is_some_and(|p| !p.tracks.is_empty())
        {
            self.pane = Pane::Tracks;
            self.track_cursor = 0;
        }
    }

    /// Focus the playlist list.
    pub fn focus_playlists(&mut self) {
        self.pane = Pane::Playlists;
    }

    /// Switch focus between the two panes.
    pub fn toggle_pane(&mut self) {
        match self.pane {
            Pane::Playlists => self.focus_tracks(),
            Pane::Tracks => self.focus_playlists(),
        }
    }
}
