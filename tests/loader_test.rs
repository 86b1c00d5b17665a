//! Catalogue Loader Tests
//!
//! Loads catalogues from real files in a temp dir.

use std::io::Write;

use tempfile::{tempdir, NamedTempFile};
use vidshelf::commands::build_player;
use vidshelf::library::load_library;

fn catalogue_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_load_sample_catalogue() {
    let library = load_library(std::path::Path::new("data/videos.txt")).await;
    assert_eq!(library.len(), 5);

    let google = library.get_video("life_at_google_video_id").unwrap();
    assert_eq!(google.title, "Life at Google");
    assert_eq!(google.tags, vec!["#google", "#career"]);
    assert!(library.get_video("nothing_video_id").unwrap().tags.is_empty());
}

#[tokio::test]
async fn test_malformed_lines_are_skipped() {
    let file = catalogue_file(
        "Good Video|good_id|#fine\n\
         no separators here\n\
         |missing_title|#x\n\
         \n\
         Also Good | also_good_id\n",
    );
    let library = load_library(file.path()).await;
    assert_eq!(library.len(), 2);
    assert!(library.get_video("also_good_id").unwrap().tags.is_empty());
}

#[tokio::test]
async fn test_duplicate_ids_keep_first() {
    let file = catalogue_file("First|dup|#a\nSecond|dup|#b\n");
    let library = load_library(file.path()).await;
    assert_eq!(library.len(), 1);
    assert_eq!(library.get_video("dup").unwrap().title, "First");
}

#[tokio::test]
async fn test_windows_line_endings() {
    let file = catalogue_file("Crlf Video|crlf_id|#one , #two\r\n");
    let library = load_library(file.path()).await;
    assert_eq!(
        library.get_video("crlf_id").unwrap().tags,
        vec!["#one", "#two"]
    );
}

#[test]
fn test_missing_file_gives_empty_player() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.txt");
    let mut player = tokio_test::block_on(build_player(&path, Some(7)));
    assert_eq!(player.number_of_videos(), 0);
    assert!(player.play_random().is_err());
}

#[test]
fn test_directory_instead_of_file_gives_empty_library() {
    let dir = tempdir().unwrap();
    let library = tokio_test::block_on(load_library(dir.path()));
    assert!(library.is_empty());
}
