//! Playback engine
//!
//! - Player: the playback state machine and every user-facing command
//! - Error: typed failures and their categories

pub mod error;
pub mod player;

pub use error::{ErrorKind, PlayerError};
pub use player::{Flagged, NowPlaying, PlaylistView, Started, VideoPlayer};
