use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::{ValueRange, SENTIMENT_COLUMN, SUBJECTIVITY_COLUMN};
use crate::state::{AppState, Event};
use crate::ui::plot::{RegionDraft, SelectTool};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the filter controls and dispatch whatever the user changed.
pub fn side_panel(ui: &mut Ui, state: &mut AppState, category_column: &str, step: Option<f64>) {
    ui.heading("Filters");
    ui.separator();

    // ---- Category dropdown ----
    ui.strong(format!("Select {category_column}:"));
    let current = state.filter().category.clone();
    let mut picked: Option<Option<String>> = None;
    egui::ComboBox::from_id_salt("category_dropdown")
        .selected_text(current.as_deref().unwrap_or("All"))
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_none(), "All").clicked() {
                picked = Some(None);
            }
            for cat in state.dataset().categories() {
                if ui
                    .selectable_label(current.as_deref() == Some(cat.as_str()), cat)
                    .clicked()
                {
                    picked = Some(Some(cat.clone()));
                }
            }
        });
    if let Some(category) = picked {
        if category != current {
            state.dispatch(Event::CategoryChanged(category));
        }
    }
    ui.add_space(8.0);

    if state.bounds().is_none() {
        ui.label(RichText::new("No data for this category.").color(Color32::YELLOW));
    }

    // ---- Range controls ----
    let bounds = state.bounds().copied();
    if let Some((lo, hi)) = range_control(
        ui,
        SENTIMENT_COLUMN,
        state.filter().sentiment,
        bounds.map(|b| b.sentiment),
        step,
    ) {
        state.dispatch(Event::SentimentRangeChanged(lo, hi));
    }
    ui.add_space(8.0);

    if let Some((lo, hi)) = range_control(
        ui,
        SUBJECTIVITY_COLUMN,
        state.filter().subjectivity,
        bounds.map(|b| b.subjectivity),
        step,
    ) {
        state.dispatch(Event::SubjectivityRangeChanged(lo, hi));
    }
}

/// A min/max slider pair. Returns the new `(lo, hi)` when either moved.
///
/// Sliders are disabled when there are no bounds to slide within.
fn range_control(
    ui: &mut Ui,
    label: &str,
    current: ValueRange,
    bounds: Option<ValueRange>,
    step: Option<f64>,
) -> Option<(f64, f64)> {
    ui.strong(format!("Select {label} Range:"));
    let span = bounds.unwrap_or(current);
    let (mut lo, mut hi) = (current.lo(), current.hi());

    let enabled = bounds.is_some();
    let lo_changed = ui
        .add_enabled(enabled, bounded_slider(&mut lo, span, step, "min"))
        .changed();
    let hi_changed = ui
        .add_enabled(enabled, bounded_slider(&mut hi, span, step, "max"))
        .changed();

    // Keep the handles from crossing.
    if lo_changed {
        lo = lo.min(hi);
    }
    if hi_changed {
        hi = hi.max(lo);
    }
    (lo_changed || hi_changed).then_some((lo, hi))
}

fn bounded_slider<'a>(
    value: &'a mut f64,
    span: ValueRange,
    step: Option<f64>,
    text: &str,
) -> egui::Slider<'a> {
    let slider = egui::Slider::new(value, span.lo()..=span.hi()).text(text);
    match step {
        Some(step) => slider.step_by(step),
        None => slider,
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar: counts, selection tool, view reset and status.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, draft: &mut RegionDraft) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(format!(
            "{} tweets loaded, {} visible, {} selected",
            state.dataset().len(),
            state.visible().len(),
            state.selected_count()
        ));

        ui.separator();

        ui.selectable_value(&mut draft.tool, SelectTool::Lasso, "Lasso Select");
        ui.selectable_value(&mut draft.tool, SelectTool::Box, "Box Select");

        if ui.button("Reset View").clicked() {
            draft.reset_view();
        }

        if ui
            .add_enabled(state.selection().is_active(), egui::Button::new("Clear Selection"))
            .clicked()
        {
            state.dispatch(Event::SelectionCleared);
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
