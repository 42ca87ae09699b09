use crate::mpris::{MprisHandle, MprisPlayback};
use crate::player::SessionSnapshot;

/// Map the session snapshot onto the MPRIS playback status.
pub fn status_of(snap: &SessionSnapshot) -> MprisPlayback {
    if snap.track.is_none() {
        MprisPlayback::Stopped
    } else if snap.playing {
        MprisPlayback::Playing
    } else {
        MprisPlayback::Paused
    }
}

pub fn update_mpris(mpris: &MprisHandle, snap: &SessionSnapshot) {
    mpris.set_track_metadata(snap.index, snap.track.as_ref(), snap.duration);
    mpris.set_playback(status_of(snap));
}
