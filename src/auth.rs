//! Auth session: one canonical identity for the running client.
//!
//! The backend keeps a synced user record next to the credential; this
//! module owns the single mutable copy of that identity. `sync` is a
//! read-through refresh of the profile, never a second writable store.

use anyhow::Result;

use crate::model::ApiClient;

/// The signed-in user's backend record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub profile_image: Option<String>,
}

/// Owns the current identity and the credential used to obtain it.
pub struct AuthSession {
    api: ApiClient,
    current: Option<AuthUser>,
}

impl AuthSession {
    pub fn new(api: ApiClient) -> Self {
        Self { api, current: None }
    }

    /// Exchange credentials for a token and the synced user record, then
    /// push a record sync so the backend copy matches the provider's.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<AuthUser> {
        let (token, user) = self.api.login(email, password).await?;
        self.api.set_token(Some(token)).await;
        tracing::info!(user_id = user.user_id, username = %user.username, "signed in");

        // The sync result supersedes the login payload; on failure the
        // login record stands.
        let user = match self.api.sync_profile().await {
            Ok(synced) => synced,
            Err(e) => {
                tracing::warn!(error = %e, "post-login record sync failed");
                user
            }
        };
        self.current = Some(user.clone());
        Ok(user)
    }

    /// Create an account, then behave exactly like a sign-in.
    pub async fn sign_up(&mut self, username: &str, email: &str, password: &str) -> Result<AuthUser> {
        let (token, user) = self.api.signup(username, email, password).await?;
        self.api.set_token(Some(token)).await;
        tracing::info!(user_id = user.user_id, username = %user.username, "account created");
        self.current = Some(user.clone());
        Ok(user)
    }

    /// Read-through refresh of the profile; a failure keeps the current
    /// record (the identity itself is not invalidated by a missed sync).
    pub async fn sync(&mut self) -> Result<()> {
        if self.current.is_none() {
            return Ok(());
        }
        match self.api.get_profile().await {
            Ok(mut user) => {
                // The profile endpoint omits the numeric id; keep the one
                // from sign-in.
                if user.user_id == 0 {
                    if let Some(current) = &self.current {
                        user.user_id = current.user_id;
                    }
                }
                tracing::debug!(user_id = user.user_id, "profile refreshed");
                self.current = Some(user);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "profile refresh failed, keeping cached record");
                Err(e)
            }
        }
    }

    /// Drop the identity and the token. The caller clears the playback
    /// session alongside this.
    pub async fn sign_out(&mut self) {
        if let Some(user) = &self.current {
            tracing::info!(user_id = user.user_id, "signed out");
        }
        self.current = None;
        self.api.set_token(None).await;
    }

    pub fn current_user(&self) -> Option<&AuthUser> {
        self.current.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }
}
