//! The media element seam.
//!
//! The session never touches a concrete audio API: it drives a
//! [`MediaElement`] obtained from a [`MediaBackend`] and reacts to the
//! lifecycle signals the element reports. The shipped backend decodes local
//! files with rodio; tests script an in-memory one.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("failed to open {path}: {cause}")]
    Open {
        path: String,
        #[source]
        cause: std::io::Error,
    },
    #[error("failed to decode {path}: {cause}")]
    Decode { path: String, cause: String },
    #[error("playback start rejected: {0}")]
    Start(String),
}

/// Lifecycle signals emitted by an attached media element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSignal {
    /// Media metadata arrived; the length may still be unknown.
    MetadataLoaded { duration: Option<Duration> },
    /// The element can play through; a requested start has taken effect.
    Ready,
    /// The element is buffering and cannot progress right now.
    Stalled,
    /// Natural end of media.
    Ended,
    /// The element gave up on the current source.
    Failed(String),
}

/// One attached playable element, bound to a single source.
pub trait MediaElement {
    /// Ask the element to start (or resume) playback. Completion is reported
    /// through [`MediaSignal::Ready`]; a synchronous rejection is an error.
    fn request_play(&mut self) -> Result<(), MediaError>;

    /// Pause the element, freezing its position.
    fn pause(&mut self);

    /// Current position within the source.
    fn position(&self) -> Duration;

    /// Total source length, once the element knows it.
    fn duration(&self) -> Option<Duration>;

    /// Drain the next pending lifecycle signal, if any.
    fn take_signal(&mut self) -> Option<MediaSignal>;
}

/// Constructor for media elements.
pub trait MediaBackend {
    type Element: MediaElement;

    /// Bind a fresh element to `source`, positioned at `start`. Seeking is
    /// rebuild-at-position: the session opens a new element at the target.
    fn open_at(&self, source: &str, start: Duration) -> Result<Self::Element, MediaError>;
}
