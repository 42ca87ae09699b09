//! Directory scanning.
//!
//! Each subdirectory holding audio files becomes a playlist named after it;
//! loose files in the scan root form a "Library" playlist. Track titles and
//! durations come from tags when readable, file stems otherwise.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use lofty::prelude::{AudioFile, ItemKey, TaggedFileExt};
use walkdir::WalkDir;

use crate::config::CatalogSettings;

use super::model::{Playlist, Track};

const ROOT_PLAYLIST_ID: &str = "library";
const ROOT_PLAYLIST_TITLE: &str = "Library";

fn is_audio_file(path: &Path, settings: &CatalogSettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Title and length for one file, read from tags with stem fallback.
fn read_track_meta(path: &Path) -> (String, Option<Duration>) {
    let mut title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let mut duration: Option<Duration> = None;

    if let Ok(tagged) = lofty::read_from_path(path) {
        duration = Some(tagged.properties().duration());

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            if let Some(v) = tag.get_string(ItemKey::TrackTitle) {
                if !v.trim().is_empty() {
                    title = v.trim().to_string();
                }
            }
        }
    }

    (title, duration)
}

/// Identify the playlist a file belongs to: its directory relative to the
/// scan root, or the root playlist for loose files.
fn playlist_key(root: &Path, path: &Path) -> (String, String) {
    let rel_dir = path
        .parent()
        .and_then(|p| p.strip_prefix(root).ok())
        .filter(|p| !p.as_os_str().is_empty());

    match rel_dir {
        Some(dir) => {
            let id = dir
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            let title = dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| id.clone());
            (id, title)
        }
        None => (ROOT_PLAYLIST_ID.to_string(), ROOT_PLAYLIST_TITLE.to_string()),
    }
}

/// Scan `dir` into playlists according to the catalog settings.
pub fn scan(dir: &Path, settings: &CatalogSettings) -> Vec<Playlist> {
    // Keyed by playlist id; BTreeMap keeps grouping deterministic.
    let mut groups: BTreeMap<String, (String, Vec<Track>)> = BTreeMap::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && is_audio_file(path, settings)
        {
            let (playlist_id, playlist_title) = playlist_key(dir, path);
            let (title, duration) = read_track_meta(path);
            let id = path
                .strip_prefix(dir)
                .unwrap_or(path)
                .display()
                .to_string();

            let (_, tracks) = groups
                .entry(playlist_id.clone())
                .or_insert_with(|| (playlist_title.clone(), Vec::new()));
            tracks.push(Track {
                id,
                title,
                source: path.display().to_string(),
                playlist_id,
                playlist_title,
                duration,
            });
        }
    }

    let mut playlists: Vec<Playlist> = groups
        .into_iter()
        .map(|(id, (title, mut tracks))| {
            tracks.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
            Playlist {
                id,
                title,
                description: None,
                tracks,
            }
        })
        .collect();

    playlists.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
    playlists
}
