//! Playback session: the single owner of "what is playing and what comes next"

/// A playable catalog entry (song or radio stream) as seen by the player.
///
/// Immutable once loaded into a queue; the catalog cache is the source of
/// truth for display data such as view counts.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist_id: String,
    pub artist: String,
    pub album_id: Option<String>,
    pub album: Option<String>,
    /// Zero for radio streams (no fixed length).
    pub duration_secs: u32,
    pub media_url: String,
    pub artwork_url: String,
    pub views: u64,
}

/// Transport state of the session.
///
/// `Empty` is both the initial state and the state reached by exhausting the
/// queue; there is no terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportState {
    Empty,
    LoadedPaused,
    LoadedPlaying,
}

/// Snapshot of the session for rendering.
#[derive(Clone, Debug, Default)]
pub struct PlaybackInfo {
    pub current_track: Option<Track>,
    pub queue_len: usize,
    pub queue_position: Option<usize>,
    pub is_playing: bool,
    pub position_secs: f64,
}

/// The playback session.
///
/// Holds the current track, the ordered queue it was chosen from, and
/// transport state. All operations are synchronous and infallible; edge
/// cases degrade to a safe state instead of erroring. The queue is replaced
/// wholesale by `play` and never merged with a previous queue.
#[derive(Debug, Default)]
pub struct PlaybackSession {
    queue: Vec<Track>,
    current: Option<usize>,
    is_playing: bool,
    position_secs: f64,
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start playing `track` in the context of `queue`.
    ///
    /// Replaces the queue wholesale and resets the position. If the queue
    /// does not contain the track (callers occasionally resolve a stale or
    /// partial list), the session degrades to a single-track queue rather
    /// than pointing at a track outside its own context.
    pub fn play(&mut self, track: Track, queue: Vec<Track>) {
        match queue.iter().position(|t| t.id == track.id) {
            Some(index) => {
                self.queue = queue;
                self.current = Some(index);
            }
            None => {
                tracing::debug!(
                    track_id = %track.id,
                    queue_len = queue.len(),
                    "queue does not contain requested track, using single-track queue"
                );
                self.queue = vec![track];
                self.current = Some(0);
            }
        }
        self.is_playing = true;
        self.position_secs = 0.0;
    }

    /// Pause playback; no-op with no current track.
    pub fn pause(&mut self) {
        if self.current.is_some() {
            self.is_playing = false;
        }
    }

    /// Resume playback; no-op with no current track.
    pub fn resume(&mut self) {
        if self.current.is_some() {
            self.is_playing = true;
        }
    }

    /// Toggle between playing and paused; no-op when empty.
    pub fn toggle(&mut self) {
        if self.current.is_some() {
            self.is_playing = !self.is_playing;
        }
    }

    /// Advance to the next track in insertion order.
    ///
    /// At the end of the queue the session transitions to `Empty` - no
    /// wraparound.
    pub fn next(&mut self) {
        let Some(index) = self.current else {
            return;
        };
        if index + 1 < self.queue.len() {
            self.current = Some(index + 1);
            self.position_secs = 0.0;
        } else {
            self.clear();
        }
    }

    /// Step back to the previous track; stays on the first track at index 0.
    pub fn previous(&mut self) {
        let Some(index) = self.current else {
            return;
        };
        if index > 0 {
            self.current = Some(index - 1);
            self.position_secs = 0.0;
        }
    }

    /// Set the position, clamped to `[0, duration]` of the current track.
    pub fn seek(&mut self, position_secs: f64) {
        let Some(track) = self.current_track() else {
            return;
        };
        let duration = track.duration_secs as f64;
        self.position_secs = if duration > 0.0 {
            position_secs.clamp(0.0, duration)
        } else {
            position_secs.max(0.0)
        };
    }

    /// Advance the playback clock by `elapsed_secs` of wall time.
    ///
    /// When the position reaches the end of the current track the session
    /// auto-advances with `next` semantics. Zero-duration tracks (radio
    /// streams) accumulate position but never auto-advance.
    pub fn tick(&mut self, elapsed_secs: f64) {
        if !self.is_playing {
            return;
        }
        let Some(track) = self.current_track() else {
            return;
        };
        let duration = track.duration_secs as f64;
        self.position_secs += elapsed_secs;
        if duration > 0.0 && self.position_secs >= duration {
            self.next();
        }
    }

    /// Drop the queue and return to `Empty`; used on sign-out.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.current = None;
        self.is_playing = false;
        self.position_secs = 0.0;
    }

    pub fn state(&self) -> TransportState {
        match (self.current, self.is_playing) {
            (None, _) => TransportState::Empty,
            (Some(_), true) => TransportState::LoadedPlaying,
            (Some(_), false) => TransportState::LoadedPaused,
        }
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.queue.get(i))
    }

    pub fn queue(&self) -> &[Track] {
        &self.queue
    }

    pub fn queue_position(&self) -> Option<usize> {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    pub fn snapshot(&self) -> PlaybackInfo {
        PlaybackInfo {
            current_track: self.current_track().cloned(),
            queue_len: self.queue.len(),
            queue_position: self.current,
            is_playing: self.is_playing,
            position_secs: self.position_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a lightweight test track.
    fn track(id: &str) -> Track {
        Track {
            id: id.to_string(),
            title: format!("track {id}"),
            artist_id: "ar1".to_string(),
            artist: "artist".to_string(),
            album_id: Some("al1".to_string()),
            album: Some("album".to_string()),
            duration_secs: 180,
            media_url: format!("http://media.local/{id}.mp3"),
            artwork_url: String::new(),
            views: 0,
        }
    }

    fn queue(ids: &[&str]) -> Vec<Track> {
        ids.iter().map(|id| track(id)).collect()
    }

    /// Playing a track from a queue containing it adopts the whole queue.
    #[test]
    fn play_adopts_queue_and_starts_playing() {
        let mut s = PlaybackSession::new();
        s.play(track("b"), queue(&["a", "b", "c"]));

        assert_eq!(s.state(), TransportState::LoadedPlaying);
        assert_eq!(s.current_track().map(|t| t.id.as_str()), Some("b"));
        assert_eq!(s.queue().len(), 3);
        assert_eq!(s.queue_position(), Some(1));
        assert_eq!(s.position_secs(), 0.0);
    }

    /// A queue not containing the track degrades to a single-track queue.
    #[test]
    fn play_falls_back_to_single_track_queue() {
        let mut s = PlaybackSession::new();
        s.play(track("x"), queue(&["a", "b"]));

        assert_eq!(s.queue().len(), 1);
        assert_eq!(s.current_track().map(|t| t.id.as_str()), Some("x"));
        assert_eq!(s.state(), TransportState::LoadedPlaying);
    }

    /// Pause is idempotent: pausing twice equals pausing once.
    #[test]
    fn pause_twice_is_same_as_once() {
        let mut s = PlaybackSession::new();
        s.play(track("a"), queue(&["a"]));
        s.pause();
        let once = s.snapshot();
        s.pause();
        let twice = s.snapshot();

        assert_eq!(once.is_playing, twice.is_playing);
        assert_eq!(once.queue_position, twice.queue_position);
        assert_eq!(s.state(), TransportState::LoadedPaused);
    }

    /// Transport controls are no-ops on an empty session.
    #[test]
    fn transport_noops_when_empty() {
        let mut s = PlaybackSession::new();
        s.pause();
        s.resume();
        s.toggle();
        s.next();
        s.previous();
        s.seek(42.0);
        assert_eq!(s.state(), TransportState::Empty);
        assert!(s.current_track().is_none());
    }

    /// Next past the last track transitions to Empty, no wraparound.
    #[test]
    fn next_at_end_goes_empty() {
        let mut s = PlaybackSession::new();
        s.play(track("b"), queue(&["a", "b", "c"]));
        s.next();
        assert_eq!(s.current_track().map(|t| t.id.as_str()), Some("c"));
        s.next();
        assert_eq!(s.state(), TransportState::Empty);
        assert!(s.queue().is_empty());
    }

    /// Previous on the first track leaves the state unchanged.
    #[test]
    fn previous_at_start_stays_put() {
        let mut s = PlaybackSession::new();
        s.play(track("a"), queue(&["a", "b"]));
        s.seek(10.0);
        s.previous();

        assert_eq!(s.current_track().map(|t| t.id.as_str()), Some("a"));
        assert_eq!(s.position_secs(), 10.0);
    }

    /// next then previous restores the original track.
    #[test]
    fn next_previous_round_trip() {
        let mut s = PlaybackSession::new();
        s.play(track("a"), queue(&["a", "b"]));
        s.next();
        s.previous();
        assert_eq!(s.current_track().map(|t| t.id.as_str()), Some("a"));
    }

    /// A new play replaces the queue wholesale.
    #[test]
    fn play_replaces_queue_wholesale() {
        let mut s = PlaybackSession::new();
        s.play(track("a"), queue(&["a", "b"]));
        s.play(track("z"), queue(&["x", "y", "z"]));

        let ids: Vec<&str> = s.queue().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y", "z"]);
        assert_eq!(s.queue_position(), Some(2));
        assert_eq!(s.state(), TransportState::LoadedPlaying);
    }

    /// Seek clamps into the track duration.
    #[test]
    fn seek_clamps_to_duration() {
        let mut s = PlaybackSession::new();
        s.play(track("a"), queue(&["a"]));
        s.seek(9999.0);
        assert_eq!(s.position_secs(), 180.0);
        s.seek(-5.0);
        assert_eq!(s.position_secs(), 0.0);
    }

    /// Clear empties the session from any state.
    #[test]
    fn clear_from_loaded_goes_empty() {
        let mut s = PlaybackSession::new();
        s.play(track("b"), queue(&["a", "b", "c"]));
        s.pause();
        s.clear();

        assert_eq!(s.state(), TransportState::Empty);
        assert!(s.queue().is_empty());
        assert_eq!(s.position_secs(), 0.0);
    }

    /// The clock advances position and auto-advances at track end.
    #[test]
    fn tick_advances_and_rolls_over() {
        let mut s = PlaybackSession::new();
        s.play(track("a"), queue(&["a", "b"]));
        s.tick(100.0);
        assert_eq!(s.position_secs(), 100.0);
        s.tick(100.0); // past 180s, roll into the next track
        assert_eq!(s.current_track().map(|t| t.id.as_str()), Some("b"));
        assert_eq!(s.position_secs(), 0.0);
        s.tick(200.0); // past the end of the queue
        assert_eq!(s.state(), TransportState::Empty);
    }

    /// Paused sessions do not accumulate position.
    #[test]
    fn tick_ignored_while_paused() {
        let mut s = PlaybackSession::new();
        s.play(track("a"), queue(&["a"]));
        s.pause();
        s.tick(30.0);
        assert_eq!(s.position_secs(), 0.0);
    }

    /// Zero-duration (radio) tracks never auto-advance.
    #[test]
    fn tick_never_advances_radio_streams() {
        let mut radio = track("r");
        radio.duration_secs = 0;
        let mut s = PlaybackSession::new();
        s.play(radio.clone(), vec![radio]);
        s.tick(3600.0);
        assert_eq!(s.current_track().map(|t| t.id.as_str()), Some("r"));
        assert_eq!(s.state(), TransportState::LoadedPlaying);
    }
}
