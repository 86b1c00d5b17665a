//! Command shell - parses text commands and renders engine results
//!
//! One input line is one command (`PLAY amazing_cats_video_id`). The shell
//! calls the matching [`VideoPlayer`] operation and turns the typed result
//! into the user-facing lines of a [`Reply`].
//!
//! A search that finds something leaves a pending follow-up. The host may
//! print [`FOLLOW_UP_PROMPT`], read one answer and pass it to
//! [`Shell::answer`], or skip the step entirely; the next command discards it.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::engine::{ErrorKind, PlayerError, Started, VideoPlayer};
use crate::models::VideoEntry;
use crate::search::SearchResults;

/// Printed before reading a search follow-up answer
pub const FOLLOW_UP_PROMPT: [&str; 2] = [
    "Would you like to play any of the above? If yes, specify the number of the video.",
    "If your answer is not a valid number, we will assume it's a no.",
];

const INVALID_COMMAND: &str =
    "Please enter a valid command, type HELP for a list of available commands.";

const GOODBYE: &str = "Video player has now terminated its execution. Thank you and goodbye!";

const HELP_TEXT: &str = "Available commands:
    NUMBER_OF_VIDEOS - Shows how many videos are in the library.
    SHOW_ALL_VIDEOS - Lists all videos from the library.
    PLAY <video_id> - Plays specified video.
    PLAY_RANDOM - Plays a random video from the library.
    STOP - Stop the current video.
    PAUSE - Pause the current video.
    CONTINUE - Resume the current paused video.
    SHOW_PLAYING - Displays the title, video_id, video tags and paused status of the video that is currently playing (or paused).
    CREATE_PLAYLIST <playlist_name> - Creates a new (empty) playlist with the provided name.
    ADD_TO_PLAYLIST <playlist_name> <video_id> - Adds the requested video to the playlist.
    REMOVE_FROM_PLAYLIST <playlist_name> <video_id> - Removes the specified video from the specified playlist
    CLEAR_PLAYLIST <playlist_name> - Removes all videos from the playlist.
    DELETE_PLAYLIST <playlist_name> - Deletes the playlist.
    SHOW_PLAYLIST <playlist_name> - List all the videos in this playlist.
    SHOW_ALL_PLAYLISTS - Display all the available playlists.
    SEARCH_VIDEOS <search_term> - Display all the videos whose titles contain the search_term.
    SEARCH_VIDEOS_WITH_TAG <tag_name> - Display all videos whose tags contains the provided tag.
    FLAG_VIDEO <video_id> <flag_reason> - Mark a video as flagged.
    ALLOW_VIDEO <video_id> - Removes a flag from a video.
    HELP - Displays help.
    EXIT - Terminates the program execution.
Playlist names containing spaces can be wrapped in double quotes.";

// =============================================================================
// Parsing
// =============================================================================

/// Reasons a command line could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    UnknownVerb(String),
    #[error("wrong number of arguments for {0}")]
    Arity(String),
    #[error("blank playlist name for {0}")]
    BlankName(String),
}

/// The playlist-name argument of a playlist verb, if present
fn playlist_arg<'a>(verb: &str, args: &'a [String]) -> Option<&'a str> {
    match verb {
        "CREATE_PLAYLIST" | "ADD_TO_PLAYLIST" | "REMOVE_FROM_PLAYLIST" | "CLEAR_PLAYLIST"
        | "DELETE_PLAYLIST" | "SHOW_PLAYLIST" => args.first().map(String::as_str),
        _ => None,
    }
}

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    NumberOfVideos,
    ShowAllVideos,
    Play(String),
    PlayRandom,
    Stop,
    Pause,
    Continue,
    ShowPlaying,
    CreatePlaylist(String),
    AddToPlaylist { playlist: String, video: String },
    RemoveFromPlaylist { playlist: String, video: String },
    ClearPlaylist(String),
    DeletePlaylist(String),
    ShowPlaylist(String),
    ShowAllPlaylists,
    Search(String),
    SearchWithTag(String),
    Flag { video: String, reason: Option<String> },
    Allow(String),
    Help,
    Exit,
}

/// Read one argument off the front of `input`, returning it with the unread
/// remainder. Double quotes group words into one argument.
fn next_token(input: &str) -> Option<(String, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }

    let mut token = String::new();
    let mut quoted = false;
    for (i, c) in input.char_indices() {
        match c {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => return Some((token, &input[i..])),
            c => token.push(c),
        }
    }
    Some((token, ""))
}

/// Split a line on whitespace; double quotes group words into one argument
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = line;
    while let Some((token, tail)) = next_token(rest) {
        tokens.push(token);
        rest = tail;
    }
    tokens
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let (verb, rest) = next_token(line).ok_or(ParseError::Empty)?;
        let verb = verb.to_uppercase();

        // The flag reason is kept exactly as typed, apart from the outer spaces
        if verb == "FLAG_VIDEO" {
            let (video, reason) = next_token(rest).ok_or(ParseError::Arity(verb))?;
            let reason = reason.trim();
            return Ok(ShellCommand::Flag {
                video,
                reason: (!reason.is_empty()).then(|| reason.to_string()),
            });
        }

        let args = tokenize(rest);
        if let Some(playlist) = playlist_arg(&verb, &args) {
            if playlist.trim().is_empty() {
                return Err(ParseError::BlankName(verb));
            }
        }

        let arity = |n: usize| {
            if args.len() == n {
                Ok(())
            } else {
                Err(ParseError::Arity(verb.clone()))
            }
        };

        let command = match verb.as_str() {
            "NUMBER_OF_VIDEOS" => arity(0).map(|_| ShellCommand::NumberOfVideos)?,
            "SHOW_ALL_VIDEOS" => arity(0).map(|_| ShellCommand::ShowAllVideos)?,
            "PLAY" => arity(1).map(|_| ShellCommand::Play(args[0].clone()))?,
            "PLAY_RANDOM" => arity(0).map(|_| ShellCommand::PlayRandom)?,
            "STOP" => arity(0).map(|_| ShellCommand::Stop)?,
            "PAUSE" => arity(0).map(|_| ShellCommand::Pause)?,
            "CONTINUE" => arity(0).map(|_| ShellCommand::Continue)?,
            "SHOW_PLAYING" => arity(0).map(|_| ShellCommand::ShowPlaying)?,
            "CREATE_PLAYLIST" => arity(1).map(|_| ShellCommand::CreatePlaylist(args[0].clone()))?,
            "ADD_TO_PLAYLIST" => arity(2).map(|_| ShellCommand::AddToPlaylist {
                playlist: args[0].clone(),
                video: args[1].clone(),
            })?,
            "REMOVE_FROM_PLAYLIST" => arity(2).map(|_| ShellCommand::RemoveFromPlaylist {
                playlist: args[0].clone(),
                video: args[1].clone(),
            })?,
            "CLEAR_PLAYLIST" => arity(1).map(|_| ShellCommand::ClearPlaylist(args[0].clone()))?,
            "DELETE_PLAYLIST" => arity(1).map(|_| ShellCommand::DeletePlaylist(args[0].clone()))?,
            "SHOW_PLAYLIST" => arity(1).map(|_| ShellCommand::ShowPlaylist(args[0].clone()))?,
            "SHOW_ALL_PLAYLISTS" => arity(0).map(|_| ShellCommand::ShowAllPlaylists)?,
            "SEARCH_VIDEOS" => arity(1).map(|_| ShellCommand::Search(args[0].clone()))?,
            "SEARCH_VIDEOS_WITH_TAG" => {
                arity(1).map(|_| ShellCommand::SearchWithTag(args[0].clone()))?
            }
            "ALLOW_VIDEO" => arity(1).map(|_| ShellCommand::Allow(args[0].clone()))?,
            "HELP" => ShellCommand::Help,
            "EXIT" => ShellCommand::Exit,
            _ => return Err(ParseError::UnknownVerb(verb.clone())),
        };
        Ok(command)
    }
}

// =============================================================================
// Replies
// =============================================================================

/// Rendered result of one command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub command: String,
    pub ok: bool,
    pub lines: Vec<String>,
    /// Category of an engine failure; absent on success and on lines that
    /// did not parse
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    /// Set by EXIT
    #[serde(skip)]
    pub exit: bool,
}

impl Reply {
    fn ok(command: &str, lines: Vec<String>) -> Self {
        Self {
            command: command.to_string(),
            ok: true,
            lines,
            kind: None,
            exit: false,
        }
    }

    fn failed(command: &str, err: &PlayerError, line: String) -> Self {
        Self {
            command: command.to_string(),
            ok: false,
            lines: vec![line],
            kind: Some(err.kind()),
            exit: false,
        }
    }

    fn invalid(line: &str) -> Self {
        Self {
            command: line.to_string(),
            ok: false,
            lines: vec![INVALID_COMMAND.to_string()],
            kind: None,
            exit: false,
        }
    }

    /// All lines joined for printing
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Prefix a failure with the command context, unless the message stands alone
fn failure(context: &str, err: &PlayerError) -> String {
    if err.is_standalone() {
        err.to_string()
    } else {
        format!("{}: {}", context, err)
    }
}

/// The full catalogue listing: a header, then one indented line per video
pub fn listing_lines(entries: &[VideoEntry]) -> Vec<String> {
    let mut lines = vec!["Here's a list of all available videos:".to_string()];
    lines.extend(entries.iter().map(|e| format!("\t{}", e)));
    lines
}

fn started_lines(started: &Started) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(ref stopped) = started.stopped {
        lines.push(format!("Stopping video: {}", stopped.title));
    }
    lines.push(format!("Playing video: {}", started.playing.title));
    lines
}

// =============================================================================
// Shell
// =============================================================================

/// Text front end over a [`VideoPlayer`]
#[derive(Debug)]
pub struct Shell {
    player: VideoPlayer,
    pending: Option<SearchResults>,
}

impl Shell {
    pub fn new(player: VideoPlayer) -> Self {
        Self {
            player,
            pending: None,
        }
    }

    pub fn player(&self) -> &VideoPlayer {
        &self.player
    }

    /// Whether the last command was a search with results
    pub fn awaiting_answer(&self) -> bool {
        self.pending.is_some()
    }

    /// Answer a pending search follow-up. Returns a reply only when the answer
    /// selected a result; anything else is a silent "no".
    pub fn answer(&mut self, input: &str) -> Option<Reply> {
        let results = self.pending.take()?;
        let outcome = self.player.play_from_results(&results, input)?;
        Some(match outcome {
            Ok(started) => Reply::ok("PLAY", started_lines(&started)),
            Err(e) => Reply::failed("PLAY", &e, failure("Cannot play video", &e)),
        })
    }

    /// Execute one command line
    pub fn execute(&mut self, line: &str) -> Reply {
        self.pending = None;
        match ShellCommand::parse(line) {
            Ok(command) => self.dispatch(command),
            Err(e) => {
                debug!(error = %e, "Rejected command line");
                Reply::invalid(line.trim())
            }
        }
    }

    fn search_reply(&mut self, verb: &str, results: SearchResults) -> Reply {
        let reply = Reply::ok(verb, results.to_string().lines().map(String::from).collect());
        if !results.is_empty() {
            self.pending = Some(results);
        }
        reply
    }

    /// Run a parsed command against the player
    pub fn dispatch(&mut self, command: ShellCommand) -> Reply {
        let p = &mut self.player;
        match command {
            ShellCommand::NumberOfVideos => Reply::ok(
                "NUMBER_OF_VIDEOS",
                vec![format!("{} videos in the library", p.number_of_videos())],
            ),

            ShellCommand::ShowAllVideos => {
                Reply::ok("SHOW_ALL_VIDEOS", listing_lines(&p.list_all()))
            }

            ShellCommand::Play(id) => match p.play(&id) {
                Ok(started) => Reply::ok("PLAY", started_lines(&started)),
                Err(e) => Reply::failed("PLAY", &e, failure("Cannot play video", &e)),
            },

            ShellCommand::PlayRandom => match p.play_random() {
                Ok(started) => Reply::ok("PLAY_RANDOM", started_lines(&started)),
                Err(e) => Reply::failed("PLAY_RANDOM", &e, failure("Cannot play video", &e)),
            },

            ShellCommand::Stop => match p.stop() {
                Ok(video) => Reply::ok("STOP", vec![format!("Stopping video: {}", video.title)]),
                Err(e) => Reply::failed("STOP", &e, failure("Cannot stop video", &e)),
            },

            ShellCommand::Pause => match p.pause() {
                Ok(video) => Reply::ok("PAUSE", vec![format!("Pausing video: {}", video.title)]),
                Err(e) => Reply::failed("PAUSE", &e, failure("Cannot pause video", &e)),
            },

            ShellCommand::Continue => match p.resume() {
                Ok(video) => Reply::ok(
                    "CONTINUE",
                    vec![format!("Continuing video: {}", video.title)],
                ),
                Err(e) => Reply::failed("CONTINUE", &e, failure("Cannot continue video", &e)),
            },

            ShellCommand::ShowPlaying => match p.show_playing() {
                Ok(now) => {
                    let suffix = if now.paused { " - PAUSED" } else { "" };
                    Reply::ok(
                        "SHOW_PLAYING",
                        vec![format!("Currently playing: {}{}", now.entry, suffix)],
                    )
                }
                Err(e) => Reply::failed("SHOW_PLAYING", &e, e.to_string()),
            },

            ShellCommand::CreatePlaylist(name) => match p.create_playlist(&name) {
                Ok(created) => Reply::ok(
                    "CREATE_PLAYLIST",
                    vec![format!("Successfully created new playlist: {}", created)],
                ),
                Err(e) => Reply::failed(
                    "CREATE_PLAYLIST",
                    &e,
                    failure("Cannot create playlist", &e),
                ),
            },

            ShellCommand::AddToPlaylist { playlist, video } => {
                match p.add_to_playlist(&playlist, &video) {
                    Ok(added) => Reply::ok(
                        "ADD_TO_PLAYLIST",
                        vec![format!("Added video to {}: {}", playlist, added.title)],
                    ),
                    Err(e) => Reply::failed(
                        "ADD_TO_PLAYLIST",
                        &e,
                        failure(&format!("Cannot add video to {}", playlist), &e),
                    ),
                }
            }

            ShellCommand::RemoveFromPlaylist { playlist, video } => {
                match p.remove_from_playlist(&playlist, &video) {
                    Ok(removed) => Reply::ok(
                        "REMOVE_FROM_PLAYLIST",
                        vec![format!("Removed video from {}: {}", playlist, removed.title)],
                    ),
                    Err(e) => Reply::failed(
                        "REMOVE_FROM_PLAYLIST",
                        &e,
                        failure(&format!("Cannot remove video from {}", playlist), &e),
                    ),
                }
            }

            ShellCommand::ClearPlaylist(name) => match p.clear_playlist(&name) {
                Ok(()) => Reply::ok(
                    "CLEAR_PLAYLIST",
                    vec![format!("Successfully removed all videos from {}", name)],
                ),
                Err(e) => Reply::failed(
                    "CLEAR_PLAYLIST",
                    &e,
                    failure(&format!("Cannot clear playlist {}", name), &e),
                ),
            },

            ShellCommand::DeletePlaylist(name) => match p.delete_playlist(&name) {
                Ok(()) => Reply::ok("DELETE_PLAYLIST", vec![format!("Deleted playlist: {}", name)]),
                Err(e) => Reply::failed(
                    "DELETE_PLAYLIST",
                    &e,
                    failure(&format!("Cannot delete playlist {}", name), &e),
                ),
            },

            ShellCommand::ShowPlaylist(name) => match p.show_playlist(&name) {
                Ok(view) => {
                    let mut lines = vec![format!("Showing playlist: {}", name)];
                    if view.entries.is_empty() {
                        lines.push("\tNo videos here yet".to_string());
                    } else {
                        lines.extend(view.entries.iter().map(|e| format!("\t{}", e)));
                    }
                    Reply::ok("SHOW_PLAYLIST", lines)
                }
                Err(e) => Reply::failed(
                    "SHOW_PLAYLIST",
                    &e,
                    failure(&format!("Cannot show playlist {}", name), &e),
                ),
            },

            ShellCommand::ShowAllPlaylists => {
                let names = p.show_all_playlists();
                if names.is_empty() {
                    Reply::ok("SHOW_ALL_PLAYLISTS", vec!["No playlists exist yet".to_string()])
                } else {
                    let mut lines = vec!["Showing all playlists:".to_string()];
                    lines.extend(names.iter().map(|n| format!("\t{}", n)));
                    Reply::ok("SHOW_ALL_PLAYLISTS", lines)
                }
            }

            ShellCommand::Search(term) => {
                let results = p.search(&term);
                self.search_reply("SEARCH_VIDEOS", results)
            }

            ShellCommand::SearchWithTag(tag) => {
                let results = p.search_by_tag(&tag);
                self.search_reply("SEARCH_VIDEOS_WITH_TAG", results)
            }

            ShellCommand::Flag { video, reason } => match p.flag_video(&video, reason.as_deref()) {
                Ok(flagged) => {
                    let mut lines = Vec::new();
                    if let Some(ref stopped) = flagged.stopped {
                        lines.push(format!("Stopping video: {}", stopped.title));
                    }
                    lines.push(format!(
                        "Successfully flagged video: {} (reason: {})",
                        flagged.video.title, flagged.reason
                    ));
                    Reply::ok("FLAG_VIDEO", lines)
                }
                Err(e) => Reply::failed("FLAG_VIDEO", &e, failure("Cannot flag video", &e)),
            },

            ShellCommand::Allow(video) => match p.allow_video(&video) {
                Ok(allowed) => Reply::ok(
                    "ALLOW_VIDEO",
                    vec![format!(
                        "Successfully removed flag from video: {}",
                        allowed.title
                    )],
                ),
                Err(e) => Reply::failed(
                    "ALLOW_VIDEO",
                    &e,
                    failure("Cannot remove flag from video", &e),
                ),
            },

            ShellCommand::Help => Reply::ok("HELP", HELP_TEXT.lines().map(String::from).collect()),

            ShellCommand::Exit => {
                let mut reply = Reply::ok("EXIT", vec![GOODBYE.to_string()]);
                reply.exit = true;
                reply
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::library_from_str;

    fn shell() -> Shell {
        let library = library_from_str(
            "Amazing Cats|cat1|cat, animal\nFunny Dogs|dog1|dog, animal\n",
        );
        Shell::new(VideoPlayer::with_seed(library, 1))
    }

    #[test]
    fn test_tokenize_quotes() {
        assert_eq!(tokenize("  PLAY   cat1 "), vec!["PLAY", "cat1"]);
        assert_eq!(
            tokenize(r#"ADD_TO_PLAYLIST "My List" cat1"#),
            vec!["ADD_TO_PLAYLIST", "My List", "cat1"]
        );
        assert_eq!(tokenize(r#"CREATE_PLAYLIST """#), vec!["CREATE_PLAYLIST", ""]);
    }

    #[test]
    fn test_parse_verbs_case_insensitive() {
        assert_eq!(
            ShellCommand::parse("play cat1"),
            Ok(ShellCommand::Play("cat1".to_string()))
        );
        assert_eq!(ShellCommand::parse("Show_Playing"), Ok(ShellCommand::ShowPlaying));
    }

    #[test]
    fn test_parse_flag_reason_is_rest_of_line() {
        assert_eq!(
            ShellCommand::parse("FLAG_VIDEO cat1 too many cats"),
            Ok(ShellCommand::Flag {
                video: "cat1".to_string(),
                reason: Some("too many cats".to_string()),
            })
        );
        assert_eq!(
            ShellCommand::parse("FLAG_VIDEO cat1"),
            Ok(ShellCommand::Flag {
                video: "cat1".to_string(),
                reason: None,
            })
        );
    }

    #[test]
    fn test_parse_flag_reason_keeps_spacing_and_quotes() {
        assert_eq!(
            ShellCommand::parse("FLAG_VIDEO cat1 too    many   cats  "),
            Ok(ShellCommand::Flag {
                video: "cat1".to_string(),
                reason: Some("too    many   cats".to_string()),
            })
        );
        assert_eq!(
            ShellCommand::parse(r#"flag_video cat1 says "meow   loudly"#),
            Ok(ShellCommand::Flag {
                video: "cat1".to_string(),
                reason: Some(r#"says "meow   loudly"#.to_string()),
            })
        );
        assert_eq!(
            ShellCommand::parse("FLAG_VIDEO"),
            Err(ParseError::Arity("FLAG_VIDEO".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_blank_playlist_names() {
        assert_eq!(
            ShellCommand::parse(r#"CREATE_PLAYLIST """#),
            Err(ParseError::BlankName("CREATE_PLAYLIST".to_string()))
        );
        assert_eq!(
            ShellCommand::parse(r#"ADD_TO_PLAYLIST "   " cat1"#),
            Err(ParseError::BlankName("ADD_TO_PLAYLIST".to_string()))
        );
    }

    #[test]
    fn test_blank_playlist_name_is_invalid_command() {
        let mut sh = shell();
        let reply = sh.execute(r#"CREATE_PLAYLIST """#);
        assert!(!reply.ok);
        assert_eq!(reply.text(), INVALID_COMMAND);
        assert_eq!(sh.execute("SHOW_ALL_PLAYLISTS").text(), "No playlists exist yet");
    }

    #[test]
    fn test_failed_reply_carries_kind() {
        let mut sh = shell();
        sh.execute("CREATE_PLAYLIST mix");
        assert_eq!(sh.execute("ADD_TO_PLAYLIST mix cat1").kind, None);

        let dup = sh.execute("ADD_TO_PLAYLIST mix cat1");
        assert_eq!(dup.kind, Some(ErrorKind::AlreadyMember));
        let json = serde_json::to_value(&dup).unwrap();
        assert_eq!(json["kind"], "already_member");
        assert_eq!(json["ok"], false);

        assert_eq!(sh.execute("SHOW_PLAYING").kind, Some(ErrorKind::InvalidState));

        let invalid = sh.execute("DANCE");
        assert_eq!(invalid.kind, None);
        assert!(serde_json::to_value(&invalid).unwrap().get("kind").is_none());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(ShellCommand::parse("   "), Err(ParseError::Empty));
        assert_eq!(
            ShellCommand::parse("DANCE"),
            Err(ParseError::UnknownVerb("DANCE".to_string()))
        );
        assert_eq!(
            ShellCommand::parse("PLAY"),
            Err(ParseError::Arity("PLAY".to_string()))
        );
        assert_eq!(
            ShellCommand::parse("STOP now"),
            Err(ParseError::Arity("STOP".to_string()))
        );
    }

    #[test]
    fn test_invalid_command_reply() {
        let mut sh = shell();
        let reply = sh.execute("DANCE");
        assert!(!reply.ok);
        assert_eq!(reply.text(), INVALID_COMMAND);
    }

    #[test]
    fn test_play_and_stop_lines() {
        let mut sh = shell();
        assert_eq!(sh.execute("PLAY cat1").text(), "Playing video: Amazing Cats");
        assert_eq!(
            sh.execute("PLAY dog1").text(),
            "Stopping video: Amazing Cats\nPlaying video: Funny Dogs"
        );
        assert_eq!(sh.execute("STOP").text(), "Stopping video: Funny Dogs");
        assert_eq!(
            sh.execute("STOP").text(),
            "Cannot stop video: No video is currently playing"
        );
    }

    #[test]
    fn test_pause_lines() {
        let mut sh = shell();
        assert_eq!(
            sh.execute("PAUSE").text(),
            "Cannot pause video: No video is currently playing"
        );
        sh.execute("PLAY dog1");
        assert_eq!(sh.execute("PAUSE").text(), "Pausing video: Funny Dogs");
        assert_eq!(sh.execute("PAUSE").text(), "Video already paused: Funny Dogs");
        assert_eq!(
            sh.execute("SHOW_PLAYING").text(),
            "Currently playing: Funny Dogs (dog1) [dog animal] - PAUSED"
        );
        assert_eq!(sh.execute("CONTINUE").text(), "Continuing video: Funny Dogs");
        assert_eq!(
            sh.execute("CONTINUE").text(),
            "Cannot continue video: Video is not paused"
        );
    }

    #[test]
    fn test_search_sets_pending_answer() {
        let mut sh = shell();
        let reply = sh.execute("SEARCH_VIDEOS cats");
        assert_eq!(
            reply.text(),
            "Here are the results for cats:\n\t1) Amazing Cats (cat1) [cat animal]"
        );
        assert!(sh.awaiting_answer());

        let played = sh.answer("1").unwrap();
        assert_eq!(played.text(), "Playing video: Amazing Cats");
        assert!(!sh.awaiting_answer());
    }

    #[test]
    fn test_search_answer_no() {
        let mut sh = shell();
        sh.execute("SEARCH_VIDEOS_WITH_TAG animal");
        assert!(sh.answer("nope").is_none());
        assert!(!sh.awaiting_answer());
        assert!(sh.player().state().is_idle());
    }

    #[test]
    fn test_next_command_discards_pending() {
        let mut sh = shell();
        sh.execute("SEARCH_VIDEOS cats");
        sh.execute("NUMBER_OF_VIDEOS");
        assert!(!sh.awaiting_answer());
        assert!(sh.answer("1").is_none());
    }

    #[test]
    fn test_empty_search_has_no_follow_up() {
        let mut sh = shell();
        assert_eq!(
            sh.execute("SEARCH_VIDEOS zebra").text(),
            "No search results for zebra"
        );
        assert!(!sh.awaiting_answer());
    }

    #[test]
    fn test_playlist_lines() {
        let mut sh = shell();
        assert_eq!(
            sh.execute(r#"CREATE_PLAYLIST "My List""#).text(),
            "Successfully created new playlist: My List"
        );
        assert_eq!(
            sh.execute(r#"CREATE_PLAYLIST "MY LIST""#).text(),
            "Cannot create playlist: A playlist with the same name already exists"
        );
        assert_eq!(
            sh.execute(r#"SHOW_PLAYLIST "my list""#).text(),
            "Showing playlist: my list\n\tNo videos here yet"
        );
        assert_eq!(
            sh.execute(r#"ADD_TO_PLAYLIST "my list" cat1"#).text(),
            "Added video to my list: Amazing Cats"
        );
        assert_eq!(
            sh.execute(r#"ADD_TO_PLAYLIST "my list" cat1"#).text(),
            "Cannot add video to my list: Video already added"
        );
        assert_eq!(
            sh.execute("REMOVE_FROM_PLAYLIST other cat1").text(),
            "Cannot remove video from other: Playlist does not exist"
        );
        assert_eq!(
            sh.execute("SHOW_ALL_PLAYLISTS").text(),
            "Showing all playlists:\n\tMy List"
        );
        assert_eq!(
            sh.execute(r#"DELETE_PLAYLIST "My List""#).text(),
            "Deleted playlist: My List"
        );
        assert_eq!(sh.execute("SHOW_ALL_PLAYLISTS").text(), "No playlists exist yet");
    }

    #[test]
    fn test_flag_lines() {
        let mut sh = shell();
        sh.execute("PLAY cat1");
        assert_eq!(
            sh.execute("FLAG_VIDEO cat1 spoiler").text(),
            "Stopping video: Amazing Cats\nSuccessfully flagged video: Amazing Cats (reason: spoiler)"
        );
        assert_eq!(
            sh.execute("PLAY cat1").text(),
            "Cannot play video: Video is currently flagged (reason: spoiler)"
        );
        assert_eq!(
            sh.execute("FLAG_VIDEO cat1").text(),
            "Cannot flag video: Video is already flagged"
        );
        assert_eq!(
            sh.execute("ALLOW_VIDEO cat1").text(),
            "Successfully removed flag from video: Amazing Cats"
        );
        assert_eq!(
            sh.execute("ALLOW_VIDEO cat1").text(),
            "Cannot remove flag from video: Video is not flagged"
        );
    }

    #[test]
    fn test_exit_reply() {
        let mut sh = shell();
        let reply = sh.execute("exit");
        assert!(reply.exit);
        assert!(reply.ok);
    }
}
