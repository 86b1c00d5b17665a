//! vidshelf - in-memory video catalogue and player
//!
//! Loads a fixed catalogue of videos from a flat text source and lets you
//! browse, play, pause, search, flag and organise them into playlists.
//! Playing is a logical state transition; nothing is decoded.
//!
//! # Modules
//!
//! - `models` - Videos, playlists, playback state and display lines
//! - `library` - Catalogue store and text loader
//! - `search` - Title/tag search and listing order
//! - `engine` - Playback state machine and typed command results
//! - `shell` - Text command parsing and rendering
//! - `cli` / `commands` / `config` - Binary front end

pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod library;
pub mod models;
pub mod search;
pub mod shell;

// Re-export commonly used types
pub use models::{playlist_key, PlaybackState, Playlist, Video, VideoEntry};

pub use engine::{ErrorKind, PlayerError, VideoPlayer};
pub use library::VideoLibrary;
pub use search::SearchResults;
pub use shell::{Reply, Shell};
