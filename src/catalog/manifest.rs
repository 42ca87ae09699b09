//! TOML playlist manifests.
//!
//! A manifest declares playlists and their ordered tracks in place of a
//! directory scan, e.g.:
//!
//! ```toml
//! [[playlist]]
//! id = "manasik-haji"
//! title = "Doa Manasik Haji"
//! description = "Recitations for the Hajj rites"
//!
//! [[playlist.track]]
//! id = "h1"
//! title = "Niat Ihram"
//! source = "audio/niat-ihram.mp3"
//! ```
//!
//! Playlists marked `active = false` stay in the file but are hidden from
//! the player. Relative sources resolve against the manifest's directory.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::model::{Playlist, Track};

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {path}: {cause}")]
    Read {
        path: String,
        #[source]
        cause: std::io::Error,
    },
    #[error("failed to parse manifest {path}: {cause}")]
    Parse { path: String, cause: String },
}

#[derive(Debug, Deserialize)]
struct ManifestFile {
    #[serde(default, rename = "playlist")]
    playlists: Vec<ManifestPlaylist>,
}

#[derive(Debug, Deserialize)]
struct ManifestPlaylist {
    id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default = "default_active")]
    active: bool,
    #[serde(default, rename = "track")]
    tracks: Vec<ManifestTrack>,
}

#[derive(Debug, Deserialize)]
struct ManifestTrack {
    id: String,
    title: String,
    source: String,
}

fn default_active() -> bool {
    true
}

/// Load the active playlists declared in the manifest at `path`.
pub fn load_manifest(path: &Path) -> Result<Vec<Playlist>, ManifestError> {
    let text = fs::read_to_string(path).map_err(|e| ManifestError::Read {
        path: path.display().to_string(),
        cause: e,
    })?;
    let file: ManifestFile = toml::from_str(&text).map_err(|e| ManifestError::Parse {
        path: path.display().to_string(),
        cause: e.to_string(),
    })?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let playlists = file
        .playlists
        .into_iter()
        .filter(|p| p.active)
        .map(|p| {
            let tracks = p
                .tracks
                .iter()
                .map(|t| Track {
                    id: t.id.clone(),
                    title: t.title.clone(),
                    source: resolve_source(base, &t.source),
                    playlist_id: p.id.clone(),
                    playlist_title: p.title.clone(),
                    duration: None,
                })
                .collect();

            Playlist {
                id: p.id,
                title: p.title,
                description: p.description,
                tracks,
            }
        })
        .collect();

    Ok(playlists)
}

fn resolve_source(base: &Path, source: &str) -> String {
    let path = Path::new(source);
    if path.is_absolute() {
        source.to_string()
    } else {
        base.join(path).display().to_string()
    }
}
