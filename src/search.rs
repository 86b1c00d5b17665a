//! Catalogue search and listing order
//!
//! Searches only ever consider unflagged videos. Results are ordered by title
//! and numbered from 1 for the follow-up selection.

use std::fmt;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::library::VideoLibrary;
use crate::models::{Video, VideoEntry};

/// How the search term is matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Case-insensitive pattern match against the title
    Title,
    /// Exact case-insensitive match against any tag
    Tag,
}

/// Ranked search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub term: String,
    pub mode: SearchMode,
    pub entries: Vec<VideoEntry>,
}

impl SearchResults {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a follow-up answer to a result.
    ///
    /// The answer is a 1-based number. Anything else (blank, non-numeric,
    /// zero, out of range) means "no" and yields None.
    pub fn select(&self, answer: &str) -> Option<&VideoEntry> {
        let index: usize = answer.trim().parse().ok()?;
        index.checked_sub(1).and_then(|i| self.entries.get(i))
    }
}

impl fmt::Display for SearchResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return write!(f, "No search results for {}", self.term);
        }
        write!(f, "Here are the results for {}:", self.term)?;
        for (i, entry) in self.entries.iter().enumerate() {
            write!(f, "\n\t{}) {}", i + 1, entry)?;
        }
        Ok(())
    }
}

/// Sort videos by title; ids break ties so output is deterministic
pub fn sort_by_title(videos: &mut [&Video]) {
    videos.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
}

/// Build the title matcher. Terms that are not valid patterns match literally.
fn title_matcher(term: &str) -> Option<Regex> {
    RegexBuilder::new(term)
        .case_insensitive(true)
        .build()
        .or_else(|_| {
            RegexBuilder::new(&regex::escape(term))
                .case_insensitive(true)
                .build()
        })
        .ok()
}

fn collect(
    library: &VideoLibrary,
    term: &str,
    mode: SearchMode,
    keep: impl Fn(&Video) -> bool,
) -> SearchResults {
    let mut matches: Vec<&Video> = library
        .unflagged_videos()
        .into_iter()
        .filter(|v| keep(v))
        .collect();
    sort_by_title(&mut matches);

    SearchResults {
        term: term.to_string(),
        mode,
        entries: matches.into_iter().map(|v| library.entry(v)).collect(),
    }
}

/// Search unflagged videos whose title matches `term`, ignoring case
pub fn search_by_title(library: &VideoLibrary, term: &str) -> SearchResults {
    let pattern = title_matcher(term);
    let upper = term.to_uppercase();
    collect(library, term, SearchMode::Title, |v| match pattern {
        Some(ref re) => re.is_match(&v.title),
        None => v.title.to_uppercase().contains(&upper),
    })
}

/// Search unflagged videos carrying `tag`, ignoring case
pub fn search_by_tag(library: &VideoLibrary, tag: &str) -> SearchResults {
    collect(library, tag, SearchMode::Tag, |v| v.has_tag(tag))
}

/// Every video, flagged ones included, sorted by title
pub fn list_all(library: &VideoLibrary) -> Vec<VideoEntry> {
    let mut videos = library.all_videos();
    sort_by_title(&mut videos);
    videos.into_iter().map(|v| library.entry(v)).collect()
}
