use eframe::egui;

use crate::color::ColorMap;
use crate::config::AppConfig;
use crate::state::AppState;
use crate::ui::plot::RegionDraft;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TweetExplorerApp {
    pub state: AppState,
    config: AppConfig,
    color_map: ColorMap,
    draft: RegionDraft,
}

impl TweetExplorerApp {
    pub fn new(state: AppState, config: AppConfig) -> Self {
        let color_map = ColorMap::new(state.dataset().categories());
        Self {
            state,
            config,
            color_map,
            draft: RegionDraft::default(),
        }
    }
}

impl eframe::App for TweetExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: counts, selection tool, view reset ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, &mut self.draft);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(
                    ui,
                    &mut self.state,
                    &self.config.category_column,
                    self.config.slider_step,
                );
            });

        // ---- Bottom panel: selected tweets ----
        egui::TopBottomPanel::bottom("table_panel")
            .default_height(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                table::selection_table(ui, &mut self.state);
            });

        // ---- Central panel: scatter plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::scatter_plot(
                ui,
                &mut self.state,
                &mut self.draft,
                &self.color_map,
                self.config.point_radius,
            );
        });
    }
}
