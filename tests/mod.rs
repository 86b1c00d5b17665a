//! Integration tests for vidshelf
//!
//! Tests are organized by component:
//! - engine_test: playback state machine, playlists, flags, search
//! - shell_test: text command transcripts (the user-facing strings)
//! - loader_test: catalogue loading from disk
//! - cli_test: argument parsing and exit codes

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
