use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::render::{Card, FieldValue};
use crate::state::{AppState, LoadStatus, LOAD_ERROR_MESSAGE};

// ---------------------------------------------------------------------------
// Card list (central panel)
// ---------------------------------------------------------------------------

/// Render the list of collapsible cards.
pub fn card_list(ui: &mut Ui, state: &mut AppState) {
    match &state.status {
        LoadStatus::Loading if state.dataset.is_empty() => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading(state.loading_message());
            });
            return;
        }
        LoadStatus::Failed(_) => {
            ui.label(RichText::new(LOAD_ERROR_MESSAGE).color(Color32::RED));
            return;
        }
        _ => {}
    }

    if state.cards.is_empty() {
        // The search bar already explains an empty search result.
        if state.status == LoadStatus::Loaded && state.search.no_results.is_none() {
            ui.label("No products listed in this sheet.");
        }
        return;
    }

    let mut clicked = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (i, card) in state.cards.cards().iter().enumerate() {
                if ui.push_id(card.record_index, |ui| card_ui(ui, card)).inner {
                    clicked = Some(i);
                }
                ui.add_space(4.0);
            }
        });

    // One toggle per interaction, applied after the borrow of `cards` ends.
    if let Some(i) = clicked {
        state.toggle_card(i);
    }
}

/// Draw one card. Returns true when its header was clicked.
fn card_ui(ui: &mut Ui, card: &Card) -> bool {
    let mut clicked = false;
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());

        let header = RichText::new(format!("{}   {}", card.title, card.indicator())).strong();
        clicked = ui.add(egui::Button::new(header).frame(false)).clicked();

        if card.expanded {
            ui.separator();
            for line in &card.lines {
                match &line.value {
                    FieldValue::Link { url, text } => {
                        ui.horizontal_wrapped(|ui: &mut Ui| {
                            ui.label(format!("{}:", line.label));
                            ui.add(
                                egui::Hyperlink::from_label_and_url(text, url)
                                    .open_in_new_tab(true),
                            );
                        });
                    }
                    _ => {
                        ui.label(line.to_text());
                    }
                }
            }
        }
    });
    clicked
}
