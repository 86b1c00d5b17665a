//! Video catalogue
//!
//! - Catalog: the in-memory store of videos, playlists and flags
//! - Loader: `Title|id|tags` text source parsing

pub mod catalog;
pub mod loader;

pub use catalog::VideoLibrary;
pub use loader::{library_from_str, load_library};
