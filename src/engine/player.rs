//! Video Player - playback state machine and command operations
//!
//! The player owns the catalogue and the playback state. The active video is
//! tracked by id and re-resolved through the catalogue on every access.
//!
//! Every operation returns a typed payload or a [`PlayerError`]; none of them
//! panic or print. Rendering is left to the caller.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use tracing::debug;

use super::error::PlayerError;
use crate::library::VideoLibrary;
use crate::models::{PlaybackState, Video, VideoEntry, DEFAULT_FLAG_REASON};
use crate::search::{self, SearchResults};

// =============================================================================
// Payloads
// =============================================================================

/// Result of starting playback
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Started {
    /// Video that was implicitly stopped first
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopped: Option<Video>,
    pub playing: Video,
}

/// Snapshot of what is currently playing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NowPlaying {
    pub entry: VideoEntry,
    pub paused: bool,
}

/// Result of flagging a video
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flagged {
    pub video: Video,
    pub reason: String,
    /// Set when the flagged video was playing and had to be stopped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopped: Option<Video>,
}

/// Contents of a playlist, in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistView {
    pub name: String,
    pub entries: Vec<VideoEntry>,
}

// =============================================================================
// Player
// =============================================================================

/// Playback engine over a single catalogue
#[derive(Debug)]
pub struct VideoPlayer {
    library: VideoLibrary,
    state: PlaybackState,
    rng: StdRng,
}

impl VideoPlayer {
    /// Create a player with an entropy-seeded random source
    pub fn new(library: VideoLibrary) -> Self {
        Self {
            library,
            state: PlaybackState::Idle,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a player whose random selection is reproducible
    pub fn with_seed(library: VideoLibrary, seed: u64) -> Self {
        Self {
            library,
            state: PlaybackState::Idle,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn library(&self) -> &VideoLibrary {
        &self.library
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Resolve the active video through the catalogue
    fn current_video(&self) -> Option<&Video> {
        self.state
            .video_id()
            .and_then(|id| self.library.get_video(id))
    }

    fn video(&self, id: &str) -> Result<&Video, PlayerError> {
        self.library.get_video(id).ok_or(PlayerError::VideoNotFound)
    }

    fn ensure_not_flagged(&self, id: &str) -> Result<(), PlayerError> {
        match self.library.flag_reason(id) {
            Some(reason) => Err(PlayerError::Flagged(reason.to_string())),
            None => Ok(()),
        }
    }

    /// Move to Idle, returning the video that was active
    fn halt(&mut self) -> Option<Video> {
        let stopped = self.current_video().cloned();
        self.state = PlaybackState::Idle;
        stopped
    }

    // -------------------------------------------------------------------------
    // Catalogue
    // -------------------------------------------------------------------------

    pub fn number_of_videos(&self) -> usize {
        self.library.len()
    }

    /// All videos sorted by title, flagged ones annotated
    pub fn list_all(&self) -> Vec<VideoEntry> {
        search::list_all(&self.library)
    }

    // -------------------------------------------------------------------------
    // Playback
    // -------------------------------------------------------------------------

    /// Start playing `id`, stopping whatever was active first
    pub fn play(&mut self, id: &str) -> Result<Started, PlayerError> {
        let playing = self.video(id)?.clone();
        self.ensure_not_flagged(id)?;

        let stopped = self.halt();
        debug!(video = %playing.id, "Playing");
        self.state = PlaybackState::Playing(playing.id.clone());
        Ok(Started { stopped, playing })
    }

    pub fn stop(&mut self) -> Result<Video, PlayerError> {
        let stopped = self.halt().ok_or(PlayerError::NothingPlaying)?;
        debug!(video = %stopped.id, "Stopped");
        Ok(stopped)
    }

    /// Play a uniformly chosen unflagged video
    pub fn play_random(&mut self) -> Result<Started, PlayerError> {
        let mut candidates: Vec<String> = self
            .library
            .unflagged_videos()
            .into_iter()
            .map(|v| v.id.clone())
            .collect();
        // HashMap order is unstable; sort so a fixed seed picks the same video
        candidates.sort();

        let id = candidates
            .choose(&mut self.rng)
            .cloned()
            .ok_or(PlayerError::NoVideosAvailable)?;
        self.play(&id)
    }

    pub fn pause(&mut self) -> Result<Video, PlayerError> {
        let video = self.current_video().cloned().ok_or(PlayerError::NothingPlaying)?;
        match self.state {
            PlaybackState::Paused(_) => Err(PlayerError::AlreadyPaused(video.title)),
            _ => {
                self.state = PlaybackState::Paused(video.id.clone());
                debug!(video = %video.id, "Paused");
                Ok(video)
            }
        }
    }

    pub fn resume(&mut self) -> Result<Video, PlayerError> {
        let video = self.current_video().cloned().ok_or(PlayerError::NothingPlaying)?;
        match self.state {
            PlaybackState::Paused(_) => {
                self.state = PlaybackState::Playing(video.id.clone());
                debug!(video = %video.id, "Resumed");
                Ok(video)
            }
            _ => Err(PlayerError::NotPaused),
        }
    }

    pub fn show_playing(&self) -> Result<NowPlaying, PlayerError> {
        let video = self.current_video().ok_or(PlayerError::NothingPlaying)?;
        Ok(NowPlaying {
            entry: self.library.entry(video),
            paused: self.state.is_paused(),
        })
    }

    // -------------------------------------------------------------------------
    // Playlists
    // -------------------------------------------------------------------------

    /// Create a playlist, returning its display name
    pub fn create_playlist(&mut self, name: &str) -> Result<String, PlayerError> {
        self.library.create_playlist(name).map(|p| p.name.clone())
    }

    pub fn add_to_playlist(&mut self, name: &str, id: &str) -> Result<Video, PlayerError> {
        if self.library.get_playlist(name).is_none() {
            return Err(PlayerError::PlaylistNotFound);
        }
        let video = self.video(id)?.clone();
        self.ensure_not_flagged(id)?;

        let playlist = self
            .library
            .get_playlist_mut(name)
            .ok_or(PlayerError::PlaylistNotFound)?;
        if !playlist.add(&video.id) {
            return Err(PlayerError::AlreadyMember);
        }
        Ok(video)
    }

    pub fn remove_from_playlist(&mut self, name: &str, id: &str) -> Result<Video, PlayerError> {
        if self.library.get_playlist(name).is_none() {
            return Err(PlayerError::PlaylistNotFound);
        }
        let video = self.video(id)?.clone();

        let playlist = self
            .library
            .get_playlist_mut(name)
            .ok_or(PlayerError::PlaylistNotFound)?;
        if !playlist.remove(&video.id) {
            return Err(PlayerError::NotMember);
        }
        Ok(video)
    }

    pub fn clear_playlist(&mut self, name: &str) -> Result<(), PlayerError> {
        let playlist = self
            .library
            .get_playlist_mut(name)
            .ok_or(PlayerError::PlaylistNotFound)?;
        playlist.clear();
        Ok(())
    }

    pub fn delete_playlist(&mut self, name: &str) -> Result<(), PlayerError> {
        self.library
            .delete_playlist(name)
            .map(|_| ())
            .ok_or(PlayerError::PlaylistNotFound)
    }

    /// Playlist contents in insertion order
    pub fn show_playlist(&self, name: &str) -> Result<PlaylistView, PlayerError> {
        let playlist = self
            .library
            .get_playlist(name)
            .ok_or(PlayerError::PlaylistNotFound)?;
        let entries = playlist
            .video_ids()
            .iter()
            .filter_map(|id| self.library.get_video(id))
            .map(|v| self.library.entry(v))
            .collect();
        Ok(PlaylistView {
            name: playlist.name.clone(),
            entries,
        })
    }

    /// Playlist display names, sorted
    pub fn show_all_playlists(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .library
            .all_playlists()
            .into_iter()
            .map(|p| p.name.clone())
            .collect();
        names.sort();
        names
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    pub fn search(&self, term: &str) -> SearchResults {
        search::search_by_title(&self.library, term)
    }

    pub fn search_by_tag(&self, tag: &str) -> SearchResults {
        search::search_by_tag(&self.library, tag)
    }

    /// Play the result picked by a follow-up answer.
    ///
    /// An answer that does not select a result is a "no": returns None and
    /// leaves the state untouched.
    pub fn play_from_results(
        &mut self,
        results: &SearchResults,
        answer: &str,
    ) -> Option<Result<Started, PlayerError>> {
        let id = results.select(answer)?.video.id.clone();
        Some(self.play(&id))
    }

    // -------------------------------------------------------------------------
    // Moderation
    // -------------------------------------------------------------------------

    /// Flag a video. If it is the active video, playback stops first.
    pub fn flag_video(&mut self, id: &str, reason: Option<&str>) -> Result<Flagged, PlayerError> {
        let video = self.video(id)?.clone();
        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_FLAG_REASON)
            .to_string();

        self.library.add_flag(&video.id, &reason)?;
        debug!(video = %video.id, %reason, "Flagged");

        let stopped = if self.state.video_id() == Some(video.id.as_str()) {
            self.halt()
        } else {
            None
        };
        Ok(Flagged {
            video,
            reason,
            stopped,
        })
    }

    /// Clear a flag. Playback is not resumed.
    pub fn allow_video(&mut self, id: &str) -> Result<Video, PlayerError> {
        let video = self.video(id)?.clone();
        self.library.remove_flag(&video.id)?;
        debug!(video = %video.id, "Flag removed");
        Ok(video)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::library_from_str;

    fn player() -> VideoPlayer {
        let library = library_from_str(
            "Amazing Cats|cat1|cat, animal\nFunny Dogs|dog1|dog, animal\n",
        );
        VideoPlayer::with_seed(library, 7)
    }

    #[test]
    fn test_play_switches_video() {
        let mut p = player();
        let first = p.play("cat1").unwrap();
        assert!(first.stopped.is_none());

        let second = p.play("dog1").unwrap();
        assert_eq!(second.stopped.unwrap().id, "cat1");
        assert_eq!(p.state(), &PlaybackState::Playing("dog1".to_string()));
    }

    #[test]
    fn test_play_same_video_restarts() {
        let mut p = player();
        p.play("cat1").unwrap();
        p.pause().unwrap();
        let again = p.play("cat1").unwrap();
        assert_eq!(again.stopped.unwrap().id, "cat1");
        assert_eq!(p.state(), &PlaybackState::Playing("cat1".to_string()));
    }

    #[test]
    fn test_play_unknown_keeps_state() {
        let mut p = player();
        p.play("cat1").unwrap();
        assert_eq!(p.play("nope"), Err(PlayerError::VideoNotFound));
        assert_eq!(p.state(), &PlaybackState::Playing("cat1".to_string()));
    }

    #[test]
    fn test_stop() {
        let mut p = player();
        assert_eq!(p.stop(), Err(PlayerError::NothingPlaying));
        p.play("dog1").unwrap();
        assert_eq!(p.stop().unwrap().title, "Funny Dogs");
        assert!(p.state().is_idle());
    }

    #[test]
    fn test_pause_resume_cycle() {
        let mut p = player();
        assert_eq!(p.pause(), Err(PlayerError::NothingPlaying));
        assert_eq!(p.resume(), Err(PlayerError::NothingPlaying));

        p.play("dog1").unwrap();
        assert_eq!(p.resume(), Err(PlayerError::NotPaused));
        p.pause().unwrap();
        assert_eq!(
            p.pause(),
            Err(PlayerError::AlreadyPaused("Funny Dogs".to_string()))
        );
        assert!(p.show_playing().unwrap().paused);
        p.resume().unwrap();
        assert!(!p.show_playing().unwrap().paused);
    }

    #[test]
    fn test_play_random_only_unflagged() {
        let mut p = player();
        p.flag_video("cat1", None).unwrap();
        for _ in 0..10 {
            assert_eq!(p.play_random().unwrap().playing.id, "dog1");
        }
        p.flag_video("dog1", None).unwrap();
        assert_eq!(p.play_random(), Err(PlayerError::NoVideosAvailable));
        assert!(p.state().is_idle());
    }

    #[test]
    fn test_play_random_seeded_is_reproducible() {
        let mut a = player();
        let mut b = player();
        for _ in 0..5 {
            assert_eq!(
                a.play_random().unwrap().playing.id,
                b.play_random().unwrap().playing.id
            );
        }
    }

    #[test]
    fn test_flag_active_video_stops_playback() {
        let mut p = player();
        p.play("cat1").unwrap();
        let flagged = p.flag_video("cat1", Some("spoiler")).unwrap();
        assert_eq!(flagged.stopped.unwrap().id, "cat1");
        assert_eq!(flagged.reason, "spoiler");
        assert!(p.state().is_idle());
    }

    #[test]
    fn test_flag_other_video_keeps_playing() {
        let mut p = player();
        p.play("dog1").unwrap();
        assert!(p.flag_video("cat1", None).unwrap().stopped.is_none());
        assert_eq!(p.state(), &PlaybackState::Playing("dog1".to_string()));
    }

    #[test]
    fn test_flag_default_reason_and_errors() {
        let mut p = player();
        assert_eq!(p.flag_video("cat1", None).unwrap().reason, "Not supplied");
        assert_eq!(p.flag_video("cat1", Some("x")), Err(PlayerError::AlreadyFlagged));
        assert_eq!(p.flag_video("nope", None), Err(PlayerError::VideoNotFound));
    }

    #[test]
    fn test_allow_video() {
        let mut p = player();
        assert_eq!(p.allow_video("nope"), Err(PlayerError::VideoNotFound));
        assert_eq!(p.allow_video("cat1"), Err(PlayerError::NotFlagged));
        p.play("cat1").unwrap();
        p.flag_video("cat1", None).unwrap();
        p.allow_video("cat1").unwrap();
        assert!(p.state().is_idle());
        assert!(p.play("cat1").is_ok());
    }

    #[test]
    fn test_playlist_failure_order() {
        let mut p = player();
        assert_eq!(
            p.add_to_playlist("mix", "nope"),
            Err(PlayerError::PlaylistNotFound)
        );
        p.create_playlist("Mix").unwrap();
        assert_eq!(p.add_to_playlist("mix", "nope"), Err(PlayerError::VideoNotFound));
        p.flag_video("cat1", Some("gross")).unwrap();
        assert_eq!(
            p.add_to_playlist("MIX", "cat1"),
            Err(PlayerError::Flagged("gross".to_string()))
        );
        p.add_to_playlist("mix", "dog1").unwrap();
        assert_eq!(p.add_to_playlist("mix", "dog1"), Err(PlayerError::AlreadyMember));
        assert_eq!(p.remove_from_playlist("mix", "cat1"), Err(PlayerError::NotMember));
    }

    #[test]
    fn test_show_playlist_keeps_insertion_order() {
        let mut p = player();
        p.create_playlist("Mix").unwrap();
        p.add_to_playlist("mix", "dog1").unwrap();
        p.add_to_playlist("mix", "cat1").unwrap();
        let view = p.show_playlist("MIX").unwrap();
        assert_eq!(view.name, "Mix");
        let ids: Vec<&str> = view.entries.iter().map(|e| e.video.id.as_str()).collect();
        assert_eq!(ids, vec!["dog1", "cat1"]);
    }

    #[test]
    fn test_show_all_playlists_sorted() {
        let mut p = player();
        for name in ["zeta", "Alpha", "beta"] {
            p.create_playlist(name).unwrap();
        }
        assert_eq!(p.show_all_playlists(), vec!["Alpha", "beta", "zeta"]);
    }

    #[test]
    fn test_clear_and_delete_playlist() {
        let mut p = player();
        assert_eq!(p.clear_playlist("mix"), Err(PlayerError::PlaylistNotFound));
        assert_eq!(p.delete_playlist("mix"), Err(PlayerError::PlaylistNotFound));
        p.create_playlist("mix").unwrap();
        p.add_to_playlist("mix", "cat1").unwrap();
        p.clear_playlist("MIX").unwrap();
        assert!(p.show_playlist("mix").unwrap().entries.is_empty());
        p.delete_playlist("Mix").unwrap();
        assert!(p.show_all_playlists().is_empty());
    }

    #[test]
    fn test_play_from_results() {
        let mut p = player();
        let results = p.search_by_tag("animal");
        assert!(p.play_from_results(&results, "abc").is_none());
        assert!(p.play_from_results(&results, "3").is_none());
        assert!(p.state().is_idle());

        let started = p.play_from_results(&results, "2").unwrap().unwrap();
        assert_eq!(started.playing.id, "dog1");
    }
}
