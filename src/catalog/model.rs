use std::time::Duration;

/// A single playable recitation.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: String,
    pub title: String,
    /// Playable source locator (a filesystem path).
    pub source: String,
    /// The playlist this track belongs to.
    pub playlist_id: String,
    pub playlist_title: String,
    /// Length as known to the catalog, when tags carried one.
    pub duration: Option<Duration>,
}

/// An ordered group of tracks navigated as one unit.
#[derive(Debug, Clone)]
pub struct Playlist {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub tracks: Vec<Track>,
}
