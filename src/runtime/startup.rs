use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::catalog::{self, Playlist};
use crate::config::Settings;

use super::looks_like_manifest;

/// Load the playlist catalog.
///
/// Precedence: a manifest named on the command line, then a directory named
/// on the command line, then a configured manifest, then a scan of the
/// current directory.
pub fn load_catalog(arg: Option<&str>, settings: &Settings) -> Result<(Vec<Playlist>, String)> {
    if let Some(arg) = arg {
        let path = Path::new(arg);
        if looks_like_manifest(path) {
            let playlists = catalog::load_manifest(path)
                .with_context(|| format!("loading playlist manifest {arg}"))?;
            return Ok(finish(playlists, arg.to_string()));
        }
        let playlists = catalog::scan(path, &settings.catalog);
        return Ok(finish(playlists, arg.to_string()));
    }

    if let Some(manifest) = &settings.catalog.manifest_path {
        let path = PathBuf::from(manifest);
        let playlists = catalog::load_manifest(&path)
            .with_context(|| format!("loading playlist manifest {manifest}"))?;
        return Ok(finish(playlists, manifest.clone()));
    }

    let cwd = env::current_dir().context("resolving current directory")?;
    let playlists = catalog::scan(&cwd, &settings.catalog);
    let label = cwd.display().to_string();
    Ok(finish(playlists, label))
}

fn finish(playlists: Vec<Playlist>, label: String) -> (Vec<Playlist>, String) {
    let tracks: usize = playlists.iter().map(|p| p.tracks.len()).sum();
    if playlists.is_empty() {
        warn!(source = %label, "catalog is empty");
    } else {
        info!(source = %label, playlists = playlists.len(), tracks, "catalog loaded");
    }
    (playlists, label)
}
