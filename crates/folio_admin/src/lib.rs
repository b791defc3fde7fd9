//! Native admin console library entry point.
//!
//! Exposes a `run` helper so the binary stays a thin shell around
//! initialization.

mod app;
/// Backend worker + protocol types used by the UI and headless tests.
pub mod backend;

use app::FolioApp;
use eframe::egui;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("folio=warn,folio_admin=info"))
        .unwrap();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

/// Start the admin console with tracing enabled.
///
/// # Errors
/// Propagates any `eframe` initialization or runtime error.
pub fn run() -> eframe::Result<()> {
    init_tracing();

    let app = FolioApp::new();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(app::DEFAULT_WINDOW_SIZE)
            .with_min_inner_size(app::MIN_WINDOW_SIZE)
            .with_title("Folio Admin"),
        ..Default::default()
    };

    eframe::run_native("Folio Admin", options, Box::new(|_cc| Ok(Box::new(app))))
}
