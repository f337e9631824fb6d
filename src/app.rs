use eframe::egui;

use crate::config::{Catalog, Config};
use crate::state::AppState;
use crate::theme::{self, Theme};
use crate::ui::{cards, panels};

/// Storage key for the last shown catalog.
const CATALOG_KEY: &str = "catalog";

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DoorSpecsApp {
    pub state: AppState,
}

impl DoorSpecsApp {
    /// Restore persisted preferences, apply the theme and start the first load.
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        let stored = |key: &str| cc.storage.and_then(|s| s.get_string(key));

        let theme = Theme::from_stored(stored(theme::STORAGE_KEY).as_deref());
        let catalog = match stored(CATALOG_KEY) {
            Some(value) => Catalog::parse(&value).unwrap_or_else(|e| {
                log::warn!("Ignoring stored catalog: {e}");
                config.catalog
            }),
            None => config.catalog,
        };

        theme.apply(&cc.egui_ctx);

        let mut state = AppState::new(config, catalog, theme);
        let ctx = cc.egui_ctx.clone();
        state.start_load(move || ctx.request_repaint());

        Self { state }
    }
}

impl eframe::App for DoorSpecsApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.state.poll_load();
        let theme_before = self.state.theme;

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // Store a toggled theme now rather than at the next autosave.
        if self.state.theme != theme_before {
            if let Some(storage) = frame.storage_mut() {
                self.state.theme.persist(storage);
            }
        }

        // ---- Search panel ----
        egui::TopBottomPanel::top("search_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            panels::search_bar(ui, &mut self.state);
            ui.add_space(4.0);
        });

        // ---- Central panel: cards ----
        egui::CentralPanel::default().show(ctx, |ui| {
            cards::card_list(ui, &mut self.state);
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        storage.set_string(theme::STORAGE_KEY, self.state.theme.as_str().to_string());
        storage.set_string(CATALOG_KEY, self.state.catalog.as_str().to_string());
    }
}
