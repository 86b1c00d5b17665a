//! Catalogue text loader
//!
//! Each line of the source is `Title|id|tag1, tag2, ...`. Fields are trimmed,
//! tags are comma separated. Loading never fails: unreadable sources and
//! malformed lines are logged and skipped, leaving a valid (possibly empty)
//! library.

use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;
use tracing::{info, warn};

use super::catalog::VideoLibrary;
use crate::models::Video;

/// Parse a single catalogue line. Returns None for blank or malformed lines.
pub fn parse_line(line: &str) -> Option<Video> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return None;
    }

    let mut fields = line.splitn(3, '|');
    let title = fields.next()?.trim();
    let id = fields.next()?.trim();
    if title.is_empty() || id.is_empty() {
        return None;
    }

    let tags = fields
        .next()
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Some(Video::new(title, id, tags))
}

/// Parse a whole catalogue source
pub fn parse_catalogue(source: &str) -> Vec<Video> {
    source
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let parsed = parse_line(line);
            if parsed.is_none() && !line.trim().is_empty() {
                warn!(line = idx + 1, "Skipping malformed catalogue line");
            }
            parsed
        })
        .collect()
}

/// Build a library from catalogue text
pub fn library_from_str(source: &str) -> VideoLibrary {
    VideoLibrary::from_videos(parse_catalogue(source))
}

/// Load the catalogue at `path`, falling back to an empty library
pub async fn load_library(path: &Path) -> VideoLibrary {
    match fs::read_to_string(path).await {
        Ok(source) => {
            let library = library_from_str(&source);
            info!(
                path = %path.display(),
                videos = library.len(),
                "Loaded video catalogue"
            );
            library
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "Catalogue not found, starting empty");
            VideoLibrary::new()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read catalogue, starting empty");
            VideoLibrary::new()
        }
    }
}
