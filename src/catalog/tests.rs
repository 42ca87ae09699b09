use std::fs;
use std::path::Path;

use tempfile::tempdir;

use super::*;
use crate::config::CatalogSettings;

#[test]
fn manifest_filters_inactive_and_stamps_owning_playlist() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("manifest.toml");
    fs::write(
        &path,
        r#"
[[playlist]]
id = "manasik-haji"
title = "Doa Manasik Haji"
description = "Recitations for the Hajj rites"

[[playlist.track]]
id = "h1"
title = "Niat Ihram"
source = "audio/niat-ihram.mp3"

[[playlist.track]]
id = "h2"
title = "Doa Talbiyah"
source = "/srv/audio/talbiyah.mp3"

[[playlist]]
id = "draft"
title = "Unpublished"
active = false

[[playlist.track]]
id = "d1"
title = "Draft"
source = "draft.mp3"
"#,
    )
    .unwrap();

    let playlists = load_manifest(&path).unwrap();
    assert_eq!(playlists.len(), 1);

    let haji = &playlists[0];
    assert_eq!(haji.id, "manasik-haji");
    assert_eq!(haji.description.as_deref(), Some("Recitations for the Hajj rites"));
    assert_eq!(haji.tracks.len(), 2);

    let first = &haji.tracks[0];
    assert_eq!(first.id, "h1");
    assert_eq!(first.playlist_id, "manasik-haji");
    assert_eq!(first.playlist_title, "Doa Manasik Haji");
    assert_eq!(
        Path::new(&first.source),
        dir.path().join("audio/niat-ihram.mp3")
    );

    // Absolute sources pass through untouched.
    assert_eq!(haji.tracks[1].source, "/srv/audio/talbiyah.mp3");
}

#[test]
fn manifest_preserves_declared_track_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("manifest.toml");
    fs::write(
        &path,
        r#"
[[playlist]]
id = "p"
title = "P"

[[playlist.track]]
id = "z"
title = "Zeta"
source = "z.mp3"

[[playlist.track]]
id = "a"
title = "Alpha"
source = "a.mp3"
"#,
    )
    .unwrap();

    let playlists = load_manifest(&path).unwrap();
    let ids: Vec<&str> = playlists[0].tracks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["z", "a"]);
}

#[test]
fn manifest_errors_are_typed() {
    let dir = tempdir().unwrap();

    let missing = dir.path().join("nope.toml");
    assert!(matches!(
        load_manifest(&missing),
        Err(ManifestError::Read { .. })
    ));

    let bad = dir.path().join("bad.toml");
    fs::write(&bad, "[[playlist]\nbroken").unwrap();
    assert!(matches!(
        load_manifest(&bad),
        Err(ManifestError::Parse { .. })
    ));
}

#[test]
fn scan_groups_subdirectories_into_playlists() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("Doa Harian");
    fs::create_dir_all(&sub).unwrap();

    fs::write(dir.path().join("loose.mp3"), b"not a real mp3").unwrap();
    fs::write(sub.join("b.MP3"), b"not a real mp3").unwrap();
    fs::write(sub.join("A.ogg"), b"not a real ogg").unwrap();
    fs::write(sub.join("notes.txt"), b"ignore me").unwrap();

    let playlists = scan(dir.path(), &CatalogSettings::default());
    assert_eq!(playlists.len(), 2);

    // Sorted by title: "Doa Harian" before "Library".
    assert_eq!(playlists[0].title, "Doa Harian");
    assert_eq!(playlists[0].id, "Doa Harian");
    assert_eq!(playlists[1].title, "Library");

    // Unreadable tags fall back to file stems, sorted case-insensitively.
    let titles: Vec<&str> = playlists[0].tracks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "b"]);

    let track = &playlists[0].tracks[0];
    assert_eq!(track.playlist_id, "Doa Harian");
    assert_eq!(track.playlist_title, "Doa Harian");
    assert!(Path::new(&track.source).is_absolute());
}

#[test]
fn scan_respects_include_hidden_false() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
    fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();

    let settings = CatalogSettings {
        include_hidden: false,
        ..CatalogSettings::default()
    };
    let playlists = scan(dir.path(), &settings);

    assert_eq!(playlists.len(), 1);
    assert_eq!(playlists[0].tracks.len(), 1);
    assert_eq!(playlists[0].tracks[0].title, "visible");
}

#[test]
fn scan_respects_recursive_false() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("child.mp3"), b"not real").unwrap();

    let settings = CatalogSettings {
        recursive: false,
        ..CatalogSettings::default()
    };
    let playlists = scan(dir.path(), &settings);

    assert_eq!(playlists.len(), 1);
    assert_eq!(playlists[0].title, "Library");
    assert_eq!(playlists[0].tracks[0].title, "root");
}

#[test]
fn scan_respects_max_depth() {
    let dir = tempdir().unwrap();
    let d1 = dir.path().join("d1");
    let d2 = d1.join("d2");
    fs::create_dir_all(&d2).unwrap();
    fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
    fs::write(d1.join("one.mp3"), b"not real").unwrap();
    fs::write(d2.join("two.mp3"), b"not real").unwrap();

    // WalkDir depth counts root as 0, children as 1, grandchildren as 2...
    // With max_depth=2 we should see root + d1/*, but not d1/d2/*.
    let settings = CatalogSettings {
        max_depth: Some(2),
        ..CatalogSettings::default()
    };
    let playlists = scan(dir.path(), &settings);

    let titles: Vec<String> = playlists
        .iter()
        .flat_map(|p| p.tracks.iter().map(|t| t.title.clone()))
        .collect();
    assert!(titles.contains(&"root".to_string()));
    assert!(titles.contains(&"one".to_string()));
    assert!(!titles.contains(&"two".to_string()));
}

#[test]
fn scan_nested_directories_get_path_ids() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("haji").join("wukuf");
    fs::create_dir_all(&nested).unwrap();
    fs::write(nested.join("doa.mp3"), b"not real").unwrap();

    let playlists = scan(dir.path(), &CatalogSettings::default());
    assert_eq!(playlists.len(), 1);
    assert_eq!(playlists[0].id, "haji/wukuf");
    assert_eq!(playlists[0].title, "wukuf");
}
