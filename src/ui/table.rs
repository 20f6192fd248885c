use eframe::egui::{self, Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Selection table (bottom panel)
// ---------------------------------------------------------------------------

/// Render the selected tweets one page at a time.
pub fn selection_table(ui: &mut Ui, state: &mut AppState) {
    let total = state.selected_count();
    state.page.clamp(total);
    let page_count = state.page.page_count(total);

    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Selected Tweets");
        ui.separator();
        if ui
            .add_enabled(state.page.page() > 0, egui::Button::new("◀"))
            .clicked()
        {
            state.page.prev();
        }
        ui.label(format!("Page {} of {page_count}", state.page.page() + 1));
        if ui
            .add_enabled(state.page.page() + 1 < page_count, egui::Button::new("▶"))
            .clicked()
        {
            state.page.next(total);
        }
        ui.label(format!("{total} rows"));
    });
    ui.separator();

    if total == 0 {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No tweets selected. Drag on the chart to select points.");
        });
        return;
    }

    let rows = state.table_rows();
    let page_rows = state.page.page_rows(&rows);

    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(Layout::top_down(Align::Center))
        .column(Column::remainder())
        .min_scrolled_height(0.0)
        .body(|mut body| {
            for text in page_rows {
                body.row(36.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.add(egui::Label::new(*text).wrap());
                    });
                });
            }
        });
}
