//! Data structures and types for vidshelf
//!
//! Contains the shared models used across the application:
//! - **Video**: immutable catalogue records
//! - **Playlist**: named, ordered, duplicate-free lists of video ids
//! - **Playback**: the idle / playing / paused state of the player
//! - **VideoEntry**: a video paired with its flag state, i.e. one display line

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason recorded when a video is flagged without an explicit one
pub const DEFAULT_FLAG_REASON: &str = "Not supplied";

/// Normalise a playlist name into its lookup key.
///
/// Playlist identity is case-insensitive: every insertion and lookup in the
/// catalogue goes through this function.
pub fn playlist_key(name: &str) -> String {
    name.to_uppercase()
}

// =============================================================================
// Video
// =============================================================================

/// A video record loaded from the catalogue source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    /// Tags in source order (compared case-insensitively)
    pub tags: Vec<String>,
}

impl Video {
    pub fn new(title: impl Into<String>, id: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tags,
        }
    }

    /// Check whether the video carries `tag`, ignoring case
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.to_uppercase();
        self.tags.iter().any(|t| t.to_uppercase() == wanted)
    }
}

impl fmt::Display for Video {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) [{}]", self.title, self.id, self.tags.join(" "))
    }
}

// =============================================================================
// Video Entry (display line)
// =============================================================================

/// A video together with its moderation state at the time of rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoEntry {
    #[serde(flatten)]
    pub video: Video,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
}

impl VideoEntry {
    pub fn new(video: Video, flag: Option<String>) -> Self {
        Self { video, flag }
    }

    pub fn is_flagged(&self) -> bool {
        self.flag.is_some()
    }
}

impl fmt::Display for VideoEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.video)?;
        if let Some(ref reason) = self.flag {
            write!(f, " - FLAGGED (reason: {})", reason)?;
        }
        Ok(())
    }
}

// =============================================================================
// Playlist
// =============================================================================

/// A user playlist. `name` keeps the casing it was created with.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Playlist {
    pub name: String,
    video_ids: Vec<String>,
}

impl Playlist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            video_ids: Vec::new(),
        }
    }

    /// Member ids in insertion order
    pub fn video_ids(&self) -> &[String] {
        &self.video_ids
    }

    pub fn contains(&self, video_id: &str) -> bool {
        self.video_ids.iter().any(|id| id == video_id)
    }

    /// Append a video. Returns false (and leaves the list untouched) if it is
    /// already a member.
    pub fn add(&mut self, video_id: &str) -> bool {
        if self.contains(video_id) {
            return false;
        }
        self.video_ids.push(video_id.to_string());
        true
    }

    /// Remove a video, preserving the order of the rest. Returns false if it
    /// was not a member.
    pub fn remove(&mut self, video_id: &str) -> bool {
        match self.video_ids.iter().position(|id| id == video_id) {
            Some(pos) => {
                self.video_ids.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.video_ids.clear();
    }
}

// =============================================================================
// Playback State
// =============================================================================

/// Current playback state. Holds the active video by id only.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "video_id", rename_all = "lowercase")]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing(String),
    Paused(String),
}

impl PlaybackState {
    /// Id of the active video, if any
    pub fn video_id(&self) -> Option<&str> {
        match self {
            PlaybackState::Idle => None,
            PlaybackState::Playing(id) | PlaybackState::Paused(id) => Some(id),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, PlaybackState::Idle)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, PlaybackState::Paused(_))
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackState::Idle => write!(f, "Idle"),
            PlaybackState::Playing(id) => write!(f, "Playing({})", id),
            PlaybackState::Paused(id) => write!(f, "Paused({})", id),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
