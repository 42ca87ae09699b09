//! The playback session state machine.
//!
//! One tagged transport state, one mutation path. Every way a track can be
//! bound (`play`, a playlist start, next/previous, auto-advance) funnels
//! through [`Session::load_at`], so the session invariants hold after every
//! operation:
//!
//! - no current track ⇔ empty playlist ⇔ no index ⇔ no attached element
//!   (a failed load is the one exception on the element: the track stays
//!   bound so callers can see what was attempted);
//! - at most one element is attached, and a new load drops the old element
//!   before attaching the new one, so a stale ready/ended signal from a
//!   superseded track has nowhere to land.
//!
//! Transport failures never propagate to callers: they are logged and the
//! flags settle to "not playing, not loading".

use std::time::Duration;

use tracing::warn;

use crate::catalog::Track;

use super::media::{MediaBackend, MediaElement, MediaSignal};
use super::types::SessionSnapshot;

/// Where the session sits in its lifecycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Transport {
    /// No track bound, no element attached.
    Idle,
    /// Track bound, element not yet ready (or buffering).
    Loading,
    Playing,
    Paused,
}

pub struct Session<B: MediaBackend> {
    backend: B,
    element: Option<B::Element>,
    transport: Transport,
    playlist: Vec<Track>,
    index: Option<usize>,
    position: Duration,
    duration: Option<Duration>,
    /// Elapsed time beyond which `previous` restarts instead of navigating.
    grace: Duration,
}

impl<B: MediaBackend> Session<B> {
    pub fn new(backend: B, previous_grace: Duration) -> Self {
        Self {
            backend,
            element: None,
            transport: Transport::Idle,
            playlist: Vec::new(),
            index: None,
            position: Duration::ZERO,
            duration: None,
            grace: previous_grace,
        }
    }

    /// Start a single-track session.
    pub fn play(&mut self, track: Track) {
        self.play_playlist(vec![track], 0);
    }

    /// Start a playlist session at `start`. An empty playlist is a no-op;
    /// an out-of-range start clamps to the last track.
    pub fn play_playlist(&mut self, tracks: Vec<Track>, start: usize) {
        if tracks.is_empty() {
            return;
        }
        let start = start.min(tracks.len() - 1);
        self.playlist = tracks;
        self.load_at(start);
    }

    /// Pause the current track. Idempotent; a no-op with no track bound.
    pub fn pause(&mut self) {
        match self.transport {
            Transport::Playing | Transport::Loading => {
                if let Some(el) = self.element.as_mut() {
                    el.pause();
                    self.position = el.position();
                }
                self.position = self.clamped(self.position);
                self.transport = Transport::Paused;
            }
            Transport::Paused | Transport::Idle => {}
        }
    }

    /// Resume a paused track. A start rejection is logged and leaves the
    /// session paused; a no-op with no track bound.
    pub fn resume(&mut self) {
        if self.transport != Transport::Paused {
            return;
        }

        match self.element.as_mut() {
            Some(el) => {
                if let Err(e) = el.request_play() {
                    warn!(error = %e, "resume rejected");
                } else {
                    self.transport = Transport::Playing;
                }
            }
            None => {
                // Residue of a failed load: give the source one more chance.
                self.reopen_at(self.position, true);
            }
        }
    }

    /// Toggle between pause and resume; a no-op while idle.
    pub fn toggle_pause(&mut self) {
        match self.transport {
            Transport::Playing | Transport::Loading => self.pause(),
            Transport::Paused => self.resume(),
            Transport::Idle => {}
        }
    }

    /// Tear the session down to idle. Always safe, idempotent.
    pub fn stop(&mut self) {
        self.detach();
        self.playlist.clear();
        self.index = None;
        self.transport = Transport::Idle;
        self.position = Duration::ZERO;
        self.duration = None;
    }

    /// Skip to the next playlist track; a no-op at the last one.
    pub fn next(&mut self) {
        let Some(i) = self.index else { return };
        if i + 1 < self.playlist.len() {
            self.load_at(i + 1);
        }
    }

    /// Restart the current track, or go to the previous one.
    ///
    /// Grace window first: deep into a track, "previous" means "from the
    /// top". Only within the first seconds does it navigate, and the first
    /// track restarts rather than underflowing.
    pub fn previous(&mut self) {
        let Some(i) = self.index else { return };
        if self.position > self.grace {
            self.seek_to(Duration::ZERO);
        } else if i > 0 {
            self.load_at(i - 1);
        } else {
            self.seek_to(Duration::ZERO);
        }
    }

    /// Seek to an absolute position; a no-op with no element attached.
    /// Targets clamp to the known duration.
    pub fn seek_to(&mut self, pos: Duration) {
        if self.element.is_none() {
            return;
        }
        let pos = self.clamped(pos);
        let keep_rolling = matches!(self.transport, Transport::Playing | Transport::Loading);
        self.reopen_at(pos, keep_rolling);
    }

    /// Seek by whole seconds, positive or negative, saturating at zero.
    pub fn seek_by(&mut self, secs: i64) {
        if self.element.is_none() {
            return;
        }
        let cur = self.position.as_secs() as i64;
        let target = (cur + secs).max(0) as u64;
        self.seek_to(Duration::from_secs(target));
    }

    /// One poll beat: drain element signals, run auto-advance, refresh
    /// position and duration.
    pub fn tick(&mut self) {
        while let Some(sig) = self.element.as_mut().and_then(MediaElement::take_signal) {
            match sig {
                MediaSignal::MetadataLoaded { duration } => {
                    self.duration = duration.or_else(|| self.bound_duration());
                }
                MediaSignal::Ready => {
                    if self.transport == Transport::Loading {
                        self.transport = Transport::Playing;
                    }
                }
                MediaSignal::Stalled => {
                    if self.transport == Transport::Playing {
                        self.transport = Transport::Loading;
                    }
                }
                MediaSignal::Ended => self.advance_or_settle(),
                MediaSignal::Failed(reason) => {
                    warn!(reason = %reason, "media element failed");
                    if self.transport != Transport::Idle {
                        self.transport = Transport::Paused;
                    }
                }
            }
        }
        self.refresh_timing();
    }

    /// The track the session is bound to, if any.
    pub fn current_track(&self) -> Option<&Track> {
        self.index.and_then(|i| self.playlist.get(i))
    }

    /// Published read model for presentation surfaces.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            track: self.current_track().cloned(),
            playing: self.transport == Transport::Playing,
            loading: self.transport == Transport::Loading,
            position: self.position,
            duration: self.duration,
            playlist_len: self.playlist.len(),
            index: self.index,
        }
    }

    /// Bind the playlist track at `index` and request playback. The single
    /// entry point for every track change.
    fn load_at(&mut self, index: usize) {
        self.detach();
        self.index = Some(index);
        self.position = Duration::ZERO;
        self.duration = self.bound_duration();

        let track = &self.playlist[index];
        let source = track.source.clone();
        let id = track.id.clone();

        match self.backend.open_at(&source, Duration::ZERO) {
            Ok(mut element) => match element.request_play() {
                Ok(()) => {
                    self.duration = element.duration().or(self.duration);
                    self.element = Some(element);
                    self.transport = Transport::Loading;
                }
                Err(e) => {
                    warn!(track = %id, error = %e, "playback start rejected");
                    self.element = Some(element);
                    self.transport = Transport::Paused;
                }
            },
            Err(e) => {
                // The attempted track stays bound; only the flags settle.
                warn!(track = %id, error = %e, "failed to load track source");
                self.transport = Transport::Paused;
            }
        }
    }

    /// Rebuild the element for the current track at `pos`, optionally
    /// requesting playback. Used for seeking and for retrying a failed load.
    fn reopen_at(&mut self, pos: Duration, rolling: bool) {
        let Some(track) = self.current_track() else {
            return;
        };
        let source = track.source.clone();
        let id = track.id.clone();

        self.detach();
        match self.backend.open_at(&source, pos) {
            Ok(mut element) => {
                if rolling {
                    if let Err(e) = element.request_play() {
                        warn!(track = %id, error = %e, "playback start rejected");
                        self.transport = Transport::Paused;
                    } else if self.transport == Transport::Paused {
                        self.transport = Transport::Loading;
                    }
                }
                self.duration = element.duration().or(self.duration);
                self.element = Some(element);
                self.position = pos;
            }
            Err(e) => {
                warn!(track = %id, error = %e, "failed to reopen track source");
                self.transport = Transport::Paused;
                self.position = pos;
            }
        }
    }

    /// Natural end of media: load the successor when one exists, otherwise
    /// settle on the last track without returning to idle.
    fn advance_or_settle(&mut self) {
        let Some(i) = self.index else { return };
        if i + 1 < self.playlist.len() {
            self.load_at(i + 1);
        } else {
            if let Some(el) = self.element.as_mut() {
                el.pause();
            }
            if let Some(d) = self.duration {
                self.position = d;
            }
            self.transport = Transport::Paused;
        }
    }

    fn detach(&mut self) {
        if let Some(mut el) = self.element.take() {
            el.pause();
        }
    }

    fn refresh_timing(&mut self) {
        let Some(el) = self.element.as_ref() else {
            return;
        };
        if matches!(self.transport, Transport::Playing | Transport::Loading) {
            self.position = self.clamped(el.position());
        }
        if self.duration.is_none() {
            self.duration = el.duration();
        }
    }

    /// Length the catalog knew for the bound track, as a decoder fallback.
    fn bound_duration(&self) -> Option<Duration> {
        self.current_track().and_then(|t| t.duration)
    }

    fn clamped(&self, pos: Duration) -> Duration {
        match self.duration {
            Some(d) => pos.min(d),
            None => pos,
        }
    }
}
