//! Favorite toggling for the signed-in user

use super::AppController;

impl AppController {
    /// Toggle the selected song as a favorite, then refetch the favorites
    /// collection so the cache (and an open Favorites view) reflect the
    /// server's truth rather than an optimistic guess.
    pub async fn toggle_favorite(&self) {
        let Some(user_id) = ({
            let auth = self.auth.lock().await;
            auth.current_user().map(|u| u.user_id)
        }) else {
            let mut model = self.model.lock().await;
            model.set_error("Sign in to manage favorites.".to_string());
            return;
        };

        let (song_id, existing) = {
            let model = self.model.lock().await;
            let Some(song_id) = model.selected_song_for_favorite() else {
                return;
            };
            let existing = model
                .catalog
                .favorite_entry(user_id, &song_id)
                .map(|f| f.id.clone());
            (song_id, existing)
        };

        let result = match &existing {
            Some(favorite_id) => self.api.remove_favorite(favorite_id).await,
            None => self.api.add_favorite(user_id, &song_id).await,
        };

        match result {
            Ok(()) => {
                tracing::info!(
                    user_id,
                    song_id = %song_id,
                    removed = existing.is_some(),
                    "favorite toggled"
                );
                let mut model = self.model.lock().await;
                model.catalog.refresh_favorites(&self.api).await;
                model.refresh_favorites_view(user_id);
            }
            Err(e) => {
                tracing::error!(song_id = %song_id, error = %e, "favorite toggle failed");
                let mut model = self.model.lock().await;
                model.set_error(Self::format_error(&e));
            }
        }
    }
}
