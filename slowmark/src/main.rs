//! slowMark - a minimal markdown editor for the Slow Computer
//!
//! One document at a time: open it, edit it as plain text or read it
//! structured, save it back.

mod app;
mod config;
mod document;
mod error;
mod host;
mod menu;
mod picker;
mod preview;
mod shell;
mod state;

use app::SlowMarkApp;
use config::Config;
use eframe::NativeOptions;
use slowcore::SlowTheme;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = Config::load();
    log::debug!("config: {:?}", config);

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(config.window_size)
        .with_title("slowMark")
        .with_drag_and_drop(true);
    if let Some(pos) = slowcore::cascade_position() {
        viewport = viewport.with_position(pos);
    }
    let options = NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "slowMark",
        options,
        Box::new(|cc| {
            SlowTheme::default().apply(&cc.egui_ctx);
            Box::new(SlowMarkApp::new(cc, config))
        }),
    )
}
