//! Playback subsystem: the session state machine, the media element seam
//! and the player thread that drives them.
//!
//! Presentation surfaces talk to the player through [`Player`]: commands go
//! down an mpsc channel, the session read model comes back through a shared
//! [`SessionHandle`] snapshot.

mod handle;
mod media;
mod session;
mod sink;
mod thread;
mod types;

pub use handle::Player;
pub use media::{MediaBackend, MediaElement, MediaError, MediaSignal};
pub use session::Session;
pub use types::{PlayerCmd, SessionHandle, SessionSnapshot};
