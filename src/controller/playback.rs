//! Playback control methods and the playback clock

use crate::model::{PlayContext, Track};

use super::AppController;

/// Relative seek step for the seek keys.
pub const SEEK_STEP_SECS: f64 = 5.0;

impl AppController {
    /// Start a track in its resolved context and count the listen.
    ///
    /// The model call is one atomic replace of the playback state; the
    /// view-count bump happens in the background afterwards and only for
    /// catalog songs (radio streams have no counter). Auto-advance inside
    /// the session never counts a view.
    pub async fn play_track(&self, track: Track, context: PlayContext) {
        let song_id = {
            let mut model = self.model.lock().await;
            let is_song = model.catalog.song(&track.id).is_some();
            let id = track.id.clone();
            model.play_in_context(track, &context);
            is_song.then_some(id)
        };

        if let Some(song_id) = song_id {
            let controller = self.clone();
            tokio::spawn(async move {
                controller.bump_view_count(&song_id).await;
            });
        }
    }

    /// Best-effort view-count increment; failures are logged, never surfaced.
    async fn bump_view_count(&self, song_id: &str) {
        match self.api.increment_views(song_id).await {
            Ok(views) => {
                let mut model = self.model.lock().await;
                model.catalog.apply_view_count(song_id, views);
            }
            Err(e) => {
                tracing::warn!(song_id, error = %e, "view count increment failed");
            }
        }
    }

    pub async fn toggle_playback(&self) {
        let mut model = self.model.lock().await;
        model.toggle_playback();
    }

    pub async fn next_track(&self) {
        let mut model = self.model.lock().await;
        model.next_track();
    }

    pub async fn previous_track(&self) {
        let mut model = self.model.lock().await;
        model.previous_track();
    }

    pub async fn seek_forward(&self) {
        let mut model = self.model.lock().await;
        model.seek_by(SEEK_STEP_SECS);
    }

    pub async fn seek_backward(&self) {
        let mut model = self.model.lock().await;
        model.seek_by(-SEEK_STEP_SECS);
    }

    /// Advance the playback clock; called from the event loop between polls.
    pub async fn tick(&self, elapsed_secs: f64) {
        let mut model = self.model.lock().await;
        model.tick_playback(elapsed_secs);
        model.auto_clear_old_errors();
    }
}
