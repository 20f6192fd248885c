use eframe::egui::{Color32, Ui, Vec2b};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoints, Points};

use crate::color::ColorMap;
use crate::data::model::{DIM1_COLUMN, DIM2_COLUMN};
use crate::data::selection::Region;
use crate::data::view::ChartPoint;
use crate::state::{AppState, Event};

// ---------------------------------------------------------------------------
// Region drawing
// ---------------------------------------------------------------------------

/// How a drag on the chart selects points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectTool {
    #[default]
    Lasso,
    Box,
}

/// The region being dragged out, in plot coordinates, plus the view state
/// that has to survive between frames.
#[derive(Debug, Default)]
pub struct RegionDraft {
    pub tool: SelectTool,
    path: Vec<[f64; 2]>,
    /// Chart generation the view was last fitted to.
    fitted: Option<u64>,
}

impl RegionDraft {
    /// Fit the view to the data on the next frame.
    pub fn reset_view(&mut self) {
        self.fitted = None;
    }

    /// True once per chart rebuild (or after `reset_view`).
    fn needs_refit(&mut self, generation: u64) -> bool {
        let refit = self.fitted != Some(generation);
        self.fitted = Some(generation);
        refit
    }

    fn start(&mut self) {
        self.path.clear();
    }

    fn push(&mut self, p: [f64; 2]) {
        if self.path.last() != Some(&p) {
            self.path.push(p);
        }
    }

    /// Finish the drag. A drag too short to enclose anything yields `None`.
    fn finish(&mut self) -> Option<Region> {
        let path = std::mem::take(&mut self.path);
        match self.tool {
            SelectTool::Lasso if path.len() >= 3 => Some(Region::Lasso(path)),
            SelectTool::Box if path.len() >= 2 => Some(Region::Box {
                a: path[0],
                b: path[path.len() - 1],
            }),
            _ => None,
        }
    }

    /// Outline to draw while dragging.
    fn outline(&self) -> Vec<[f64; 2]> {
        match (self.tool, self.path.first(), self.path.last()) {
            (_, None, _) | (_, _, None) => Vec::new(),
            (SelectTool::Lasso, Some(&first), _) => {
                let mut pts = self.path.clone();
                pts.push(first);
                pts
            }
            (SelectTool::Box, Some(&[x0, y0]), Some(&[x1, y1])) => {
                vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1], [x0, y0]]
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Render the filtered points and dispatch region selections made on them.
///
/// Dragging draws the region; double-click clears the selection.
pub fn scatter_plot(
    ui: &mut Ui,
    state: &mut AppState,
    draft: &mut RegionDraft,
    color_map: &ColorMap,
    point_radius: f32,
) {
    let points = state.chart_points();
    let refit = draft.needs_refit(state.chart_generation());
    let mut event = None;

    Plot::new("scatter_plot")
        .legend(Legend::default())
        .x_axis_label(DIM1_COLUMN)
        .y_axis_label(DIM2_COLUMN)
        .allow_drag(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            // Scroll-zoom turns auto-bounds off; bring them back when the data changes.
            if refit {
                plot_ui.set_auto_bounds(Vec2b::TRUE);
            }

            for category in state.dataset().categories() {
                let series: Vec<[f64; 2]> = points
                    .iter()
                    .filter(|p| &p.category == category)
                    .map(ChartPoint::xy)
                    .collect();
                if series.is_empty() {
                    continue;
                }
                plot_ui.points(
                    Points::new(PlotPoints::from(series))
                        .name(category)
                        .color(color_map.color_for(category))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(point_radius),
                );
            }

            let selected: Vec<[f64; 2]> = points
                .iter()
                .filter(|p| state.selection().contains(p.index))
                .map(ChartPoint::xy)
                .collect();
            if !selected.is_empty() {
                plot_ui.points(
                    Points::new(PlotPoints::from(selected))
                        .name("Selected")
                        .color(Color32::WHITE)
                        .filled(false)
                        .radius(point_radius + 1.5),
                );
            }

            let (started, dragging, stopped, double) = {
                let r = plot_ui.response();
                (r.drag_started(), r.dragged(), r.drag_stopped(), r.double_clicked())
            };
            if started {
                draft.start();
            }
            if started || dragging {
                if let Some(p) = plot_ui.pointer_coordinate() {
                    draft.push([p.x, p.y]);
                }
            }
            if stopped {
                if let Some(region) = draft.finish() {
                    let xy: Vec<[f64; 2]> = points.iter().map(ChartPoint::xy).collect();
                    event = Some(Event::RegionSelected(region.select(&xy)));
                }
            } else if double {
                event = Some(Event::SelectionCleared);
            }

            let outline = draft.outline();
            if !outline.is_empty() {
                plot_ui.line(
                    Line::new(PlotPoints::from(outline))
                        .color(Color32::LIGHT_GRAY)
                        .width(1.0),
                );
            }
        });

    if let Some(event) = event {
        state.dispatch(event);
    }
}
