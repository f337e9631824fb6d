use eframe::egui::{self, Color32, RichText, Ui};

use crate::config::Catalog;
use crate::state::{AppState, LoadStatus};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(!state.is_loading(), egui::Button::new("Reload"))
                .clicked()
            {
                state.start_load(repaint(ui.ctx()));
                ui.close_menu();
            }
        });

        ui.separator();

        for catalog in Catalog::ALL {
            if ui
                .selectable_label(state.catalog == catalog, catalog.label())
                .clicked()
            {
                state.switch_catalog(catalog, repaint(ui.ctx()));
            }
        }

        ui.separator();

        match &state.status {
            LoadStatus::Idle => {}
            LoadStatus::Loading => {
                ui.spinner();
                ui.label(state.loading_message());
            }
            LoadStatus::Loaded => {
                ui.label(format!(
                    "{} records loaded, {} shown",
                    state.dataset.len(),
                    state.cards.len()
                ));
            }
            LoadStatus::Failed(err) => {
                ui.label(RichText::new("Failed to load data.").color(Color32::RED))
                    .on_hover_text(err);
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            if ui
                .button(state.theme.toggle_icon())
                .on_hover_text("Toggle light/dark theme")
                .clicked()
            {
                let theme = state.toggle_theme();
                theme.apply(ui.ctx());
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Search bar
// ---------------------------------------------------------------------------

/// Search field, clear button and "no results" line.
pub fn search_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        let edit = egui::TextEdit::singleline(&mut state.search.query)
            .hint_text("Search by model…")
            .desired_width(280.0);
        if ui.add(edit).changed() {
            state.apply_search();
        }
        if ui.button("Clear").clicked() {
            state.clear_search();
        }
    });

    if let Some(msg) = &state.search.no_results {
        ui.label(RichText::new(msg).italics());
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open spec sheet")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_file(&path);
    }
}

/// Callback that wakes the UI once a background load finishes.
fn repaint(ctx: &egui::Context) -> impl FnOnce() + Send + 'static {
    let ctx = ctx.clone();
    move || ctx.request_repaint()
}
