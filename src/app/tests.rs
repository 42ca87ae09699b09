use super::*;
use crate::catalog::{Playlist, Track};

fn t(id: &str, playlist: &str) -> Track {
    Track {
        id: id.to_string(),
        title: format!("Track {id}"),
        source: format!("/audio/{id}.mp3"),
        playlist_id: playlist.to_string(),
        playlist_title: playlist.to_string(),
        duration: None,
    }
}

fn pl(id: &str, track_ids: &[&str]) -> Playlist {
    Playlist {
        id: id.to_string(),
        title: id.to_string(),
        description: None,
        tracks: track_ids.iter().map(|tid| t(tid, id)).collect(),
    }
}

#[test]
fn navigation_wraps_in_playlist_pane() {
    let mut app = App::new(vec![pl("a", &["a1"]), pl("b", &["b1"]), pl("c", &["c1"])]);

    assert_eq!(app.playlist_cursor, 0);
    app.select_previous();
    assert_eq!(app.playlist_cursor, 2);
    app.select_next();
    assert_eq!(app.playlist_cursor, 0);
    app.select_next();
    assert_eq!(app.playlist_cursor, 1);
}

#[test]
fn changing_playlist_resets_track_cursor() {
    let mut app = App::new(vec![pl("a", &["a1", "a2", "a3"]), pl("b", &["b1"])]);

    app.focus_tracks();
    app.select_next();
    assert_eq!(app.track_cursor, 1);

    app.focus_playlists();
    app.select_next();
    assert_eq!(app.playlist_cursor, 1);
    assert_eq!(app.track_cursor, 0);
}

#[test]
fn selected_helpers_follow_cursors() {
    let mut app = App::new(vec![pl("a", &["a1", "a2"]), pl("b", &["b1"])]);

    assert_eq!(app.selected_playlist().map(|p| p.id.as_str()), Some("a"));
    assert_eq!(app.selected_track().map(|t| t.id.as_str()), Some("a1"));

    app.focus_tracks();
    app.select_next();
    assert_eq!(app.selected_track().map(|t| t.id.as_str()), Some("a2"));

    app.select_last();
    assert_eq!(app.track_cursor, 1);
    app.select_first();
    assert_eq!(app.track_cursor, 0);
}

#[test]
fn focus_tracks_requires_a_nonempty_playlist() {
    let mut app = App::new(vec![pl("empty", &[])]);

    app.focus_tracks();
    assert_eq!(app.pane, Pane::Playlists);

    app.toggle_pane();
    assert_eq!(app.pane, Pane::Playlists);
}

#[test]
fn empty_catalog_is_safe_to_navigate() {
    let mut app = App::new(Vec::new());

    assert!(!app.has_playlists());
    app.select_next();
    app.select_previous();
    app.select_first();
    app.select_last();
    app.toggle_pane();
    assert!(app.selected_playlist().is_none());
    assert!(app.selected_track().is_none());
}

#[test]
fn toggle_pane_round_trips() {
    let mut app = App::new(vec![pl("a", &["a1"])]);

    assert_eq!(app.pane, Pane::Playlists);
    app.toggle_pane();
    assert_eq!(app.pane, Pane::Tracks);
    app.toggle_pane();
    assert_eq!(app.pane, Pane::Playlists);
}
