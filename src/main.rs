//! Cat Runner entry point
//!
//! Headless native build: loads settings, opens the JSON progress files and
//! lets the autopilot play from the configured start level. Screens and the
//! HUD go to the log (`RUST_LOG=info` or `trace`).

use std::env;
use std::process::ExitCode;

use cat_runner::app::Frontend;
use cat_runner::persistence::JsonFileStore;
use cat_runner::platform::{Autopilot, LogRenderer, LogScreens, TickPacer};
use cat_runner::{App, Settings};

const DEFAULT_SETTINGS_PATH: &str = "settings.json";

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Cat Runner (native) starting...");

    let settings_path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
    let settings = Settings::load(&settings_path);

    let store = JsonFileStore::new(settings.highscore_path.clone(), settings.progress_path.clone());
    let start_level = settings.start_level;
    let pacer = TickPacer::new(settings.realtime);
    let mut app = App::new(settings, store);

    let mut frontend = Frontend::new(Autopilot, LogRenderer::default(), LogScreens::default(), pacer);

    match app.play_from(start_level, &mut frontend) {
        Ok(exit) => {
            let progress = app.progress();
            log::info!(
                "Session over ({:?}): best {}, {} levels unlocked, {} ticks",
                exit,
                progress.high_score,
                progress.unlocked_levels,
                frontend.pacer.ticks()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("Cannot start: {}", err);
            ExitCode::FAILURE
        }
    }
}
