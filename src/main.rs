mod auth;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::Mutex;

use auth::AuthSession;
use controller::AppController;
use model::{ApiClient, AppModel, Catalog};
use view::AppView;

const DEFAULT_API_URL: &str = "http://localhost:3000/api";

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== Resona starting ===");

    let base_url =
        std::env::var("RESONA_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    tracing::info!(base_url = %base_url, "using catalog backend");
    let api = ApiClient::new(base_url);

    // Sign in when credentials are configured; anything else is guest mode
    // (browse and play, no favorites). RESONA_USERNAME additionally set
    // means first-run account creation.
    let mut auth_session = AuthSession::new(api.clone());
    let credentials = (
        std::env::var("RESONA_EMAIL"),
        std::env::var("RESONA_PASSWORD"),
    );
    if let (Ok(email), Ok(password)) = credentials {
        let result = match std::env::var("RESONA_USERNAME") {
            Ok(username) => auth_session.sign_up(&username, &email, &password).await,
            Err(_) => auth_session.sign_in(&email, &password).await,
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "sign-in failed, continuing as guest");
        }
    } else {
        tracing::info!("no credentials configured, continuing as guest");
    }

    // First catalog load; each collection independently falls back to empty.
    let catalog = Catalog::load(&api, auth_session.is_signed_in()).await;

    let model = Arc::new(Mutex::new(AppModel::new(catalog)));
    let auth = Arc::new(Mutex::new(auth_session));
    let controller = AppController::new(model.clone(), auth.clone(), api);

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, auth, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Resona shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    auth: Arc<Mutex<AuthSession>>,
    controller: AppController,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    let mut last_profile_sync = Instant::now();
    const PROFILE_SYNC_INTERVAL: Duration = Duration::from_secs(300);

    loop {
        // Advance the playback clock by the wall time since the last pass.
        let elapsed = last_tick.elapsed().as_secs_f64();
        last_tick = Instant::now();
        controller.tick(elapsed).await;

        // Periodic read-through refresh of the synced profile.
        if last_profile_sync.elapsed() >= PROFILE_SYNC_INTERVAL {
            last_profile_sync = Instant::now();
            let auth_for_sync = auth.clone();
            tokio::spawn(async move {
                let mut session = auth_for_sync.lock().await;
                let _ = session.sync().await;
            });
        }

        let profile_label = {
            let session = auth.lock().await;
            session
                .current_user()
                .map(|u| u.username.clone())
                .unwrap_or_else(|| "guest".to_string())
        };

        let should_quit = {
            let model_guard = model.lock().await;
            let playback = model_guard.playback_info();

            terminal.draw(|f| {
                AppView::render(
                    f,
                    &playback,
                    &model_guard.ui_state,
                    &model_guard.content_state,
                    &model_guard.catalog,
                    &profile_label,
                );
            })?;

            model_guard.should_quit()
        };

        // Short poll keeps the progress gauge smooth.
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                let _ = controller.handle_key_event(key).await;
            }
        }

        if should_quit {
            break;
        }
    }

    Ok(())
}
