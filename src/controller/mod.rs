//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input
//! and coordinates between the model, the auth session and the backend API.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `playback`: Playback control and the playback clock
//! - `navigation`: Library/playlist/search navigation
//! - `favorites`: Favorite toggling for the signed-in user

mod favorites;
mod input;
mod navigation;
mod playback;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::auth::AuthSession;
use crate::model::{ApiClient, AppModel};

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    pub(crate) auth: Arc<Mutex<AuthSession>>,
    pub(crate) api: ApiClient,
}

impl AppController {
    pub fn new(
        model: Arc<Mutex<AppModel>>,
        auth: Arc<Mutex<AuthSession>>,
        api: ApiClient,
    ) -> Self {
        Self { model, auth, api }
    }

    pub(crate) fn format_error(error: &anyhow::Error) -> String {
        let error_str = error.to_string();

        if error_str.contains("401") {
            "Session expired. Sign in again.".to_string()
        } else if error_str.contains("404") {
            "Not found on the server.".to_string()
        } else if error_str.contains("400") {
            "The server rejected the request.".to_string()
        } else if error_str.contains("500") {
            "The server hit an internal error. Try again later.".to_string()
        } else {
            format!("Error: {}", error_str)
        }
    }
}
