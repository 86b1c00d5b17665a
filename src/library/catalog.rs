//! Catalogue store: videos, playlists and content flags.
//!
//! Videos are fixed once the library is built. Playlists are keyed by their
//! normalised name (see [`playlist_key`]) and flags by video id.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::engine::PlayerError;
use crate::models::{playlist_key, Playlist, Video, VideoEntry};

/// In-memory catalogue of videos, playlists and flags
#[derive(Debug, Clone, Default)]
pub struct VideoLibrary {
    videos: HashMap<String, Video>,
    playlists: HashMap<String, Playlist>,
    flags: HashMap<String, String>,
}

impl VideoLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a library from loaded videos. On duplicate ids the first record wins.
    pub fn from_videos(videos: impl IntoIterator<Item = Video>) -> Self {
        let mut map = HashMap::new();
        for video in videos {
            map.entry(video.id.clone()).or_insert(video);
        }
        Self {
            videos: map,
            ..Self::default()
        }
    }

    // -------------------------------------------------------------------------
    // Videos
    // -------------------------------------------------------------------------

    /// All videos, in no particular order
    pub fn all_videos(&self) -> Vec<&Video> {
        self.videos.values().collect()
    }

    /// Exact, case-sensitive id lookup
    pub fn get_video(&self, id: &str) -> Option<&Video> {
        self.videos.get(id)
    }

    /// Pair a video with its current flag state
    pub fn entry(&self, video: &Video) -> VideoEntry {
        VideoEntry::new(video.clone(), self.flag_reason(&video.id).map(str::to_string))
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    // -------------------------------------------------------------------------
    // Playlists
    // -------------------------------------------------------------------------

    pub fn all_playlists(&self) -> Vec<&Playlist> {
        self.playlists.values().collect()
    }

    /// Case-insensitive playlist lookup
    pub fn get_playlist(&self, name: &str) -> Option<&Playlist> {
        self.playlists.get(&playlist_key(name))
    }

    pub fn get_playlist_mut(&mut self, name: &str) -> Option<&mut Playlist> {
        self.playlists.get_mut(&playlist_key(name))
    }

    /// Create an empty playlist, failing if one with the same name (ignoring
    /// case) already exists
    pub fn create_playlist(&mut self, name: &str) -> Result<&Playlist, PlayerError> {
        let key = playlist_key(name);
        if self.playlists.contains_key(&key) {
            return Err(PlayerError::PlaylistExists);
        }
        debug!(playlist = name, "Creating playlist");
        Ok(self.playlists.entry(key).or_insert_with(|| Playlist::new(name)))
    }

    /// Remove a playlist by name, returning it if it existed
    pub fn delete_playlist(&mut self, name: &str) -> Option<Playlist> {
        self.playlists.remove(&playlist_key(name))
    }

    // -------------------------------------------------------------------------
    // Flags
    // -------------------------------------------------------------------------

    /// Flag a video. Re-flagging is rejected, never overwritten.
    pub fn add_flag(&mut self, id: &str, reason: &str) -> Result<(), PlayerError> {
        if self.flags.contains_key(id) {
            return Err(PlayerError::AlreadyFlagged);
        }
        self.flags.insert(id.to_string(), reason.to_string());
        Ok(())
    }

    pub fn remove_flag(&mut self, id: &str) -> Result<(), PlayerError> {
        self.flags
            .remove(id)
            .map(|_| ())
            .ok_or(PlayerError::NotFlagged)
    }

    pub fn flag_reason(&self, id: &str) -> Option<&str> {
        self.flags.get(id).map(String::as_str)
    }

    pub fn is_flagged(&self, id: &str) -> bool {
        self.flags.contains_key(id)
    }

    pub fn flagged_video_ids(&self) -> HashSet<&str> {
        self.flags.keys().map(String::as_str).collect()
    }

    /// Videos that may be played, searched and added to playlists
    pub fn unflagged_videos(&self) -> Vec<&Video> {
        self.videos
            .values()
            .filter(|v| !self.is_flagged(&v.id))
            .collect()
    }
}
