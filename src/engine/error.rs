//! Typed failures returned by the catalogue and the playback engine

use serde::Serialize;
use thiserror::Error;

/// Broad failure category, carried by shell replies in JSON output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    AlreadyFlagged,
    NotFlagged,
    AlreadyMember,
    NotMember,
    InvalidState,
    EmptyCatalogue,
}

/// Expected, recoverable outcome of a rejected command.
///
/// The messages are the reason part only; callers add the command-specific
/// prefix ("Cannot play video: ...").
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
    #[error("Video does not exist")]
    VideoNotFound,

    #[error("Playlist does not exist")]
    PlaylistNotFound,

    #[error("A playlist with the same name already exists")]
    PlaylistExists,

    #[error("Video is currently flagged (reason: {0})")]
    Flagged(String),

    #[error("Video is already flagged")]
    AlreadyFlagged,

    #[error("Video is not flagged")]
    NotFlagged,

    #[error("Video already added")]
    AlreadyMember,

    #[error("Video is not in playlist")]
    NotMember,

    #[error("No video is currently playing")]
    NothingPlaying,

    #[error("Video is not paused")]
    NotPaused,

    #[error("Video already paused: {0}")]
    AlreadyPaused(String),

    #[error("No videos available")]
    NoVideosAvailable,
}

impl PlayerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlayerError::VideoNotFound | PlayerError::PlaylistNotFound => ErrorKind::NotFound,
            PlayerError::PlaylistExists => ErrorKind::AlreadyExists,
            PlayerError::Flagged(_) | PlayerError::AlreadyFlagged => ErrorKind::AlreadyFlagged,
            PlayerError::NotFlagged => ErrorKind::NotFlagged,
            PlayerError::AlreadyMember => ErrorKind::AlreadyMember,
            PlayerError::NotMember => ErrorKind::NotMember,
            PlayerError::NothingPlaying
            | PlayerError::NotPaused
            | PlayerError::AlreadyPaused(_) => ErrorKind::InvalidState,
            PlayerError::NoVideosAvailable => ErrorKind::EmptyCatalogue,
        }
    }

    /// Whether the message is complete on its own and must not be prefixed
    pub fn is_standalone(&self) -> bool {
        matches!(
            self,
            PlayerError::AlreadyPaused(_) | PlayerError::NoVideosAvailable
        )
    }
}
