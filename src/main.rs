mod app;
mod config;
mod data;
mod state;
mod theme;
mod ui;

use anyhow::{anyhow, Context};
use app::DoorSpecsApp;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = config::load().context("loading configuration")?;
    log::debug!("Using {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 900.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Door Specs",
        options,
        Box::new(move |cc| Ok(Box::new(DoorSpecsApp::new(cc, config)))),
    )
    .map_err(|e| anyhow!("running viewer: {e}"))
}
