use crate::data::bounds::{compute_bounds, FilterBounds};
use crate::data::filter::{compute_visible, FilterState, VisibleSubset};
use crate::data::model::{Dataset, ValueRange};
use crate::data::selection::SelectionState;
use crate::data::view::{chart_points, table_rows, ChartPoint, Pagination};

// ---------------------------------------------------------------------------
// Events emitted by the UI collaborators
// ---------------------------------------------------------------------------

/// A user input. Each one is handled to completion by [`AppState::dispatch`]
/// before the next is accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Dropdown changed; `None` selects all categories.
    CategoryChanged(Option<String>),
    SentimentRangeChanged(f64, f64),
    SubjectivityRangeChanged(f64, f64),
    /// Point-local indices of the chart points inside the drawn region.
    RegionSelected(Vec<usize>),
    SelectionCleared,
}

/// Which derived views an event rebuilt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Redraw {
    pub chart: bool,
    pub table: bool,
}

impl Redraw {
    pub const CHART: Redraw = Redraw {
        chart: true,
        table: false,
    };
    pub const TABLE: Redraw = Redraw {
        chart: false,
        table: true,
    };
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Owns the dataset and is the only writer of the filter and selection.
pub struct AppState {
    dataset: Dataset,

    /// Current values of the dropdown and both range controls.
    filter: FilterState,

    /// Slider bounds for the current category; `None` when it has no rows.
    bounds: Option<FilterBounds>,

    /// Rows passing the current filters (cached).
    visible: VisibleSubset,

    /// Chart input built from `visible` (cached).
    points: Vec<ChartPoint>,

    /// Bumped every time `points` is rebuilt.
    chart_generation: u64,

    /// Rows picked by the last region selection.
    selection: SelectionState,

    /// Table page cursor.
    pub page: Pagination,

    /// Status message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Start with every category selected and both ranges at their full span.
    pub fn new(dataset: Dataset, page_size: usize) -> Self {
        let bounds = compute_bounds(&dataset, None);
        let filter = match &bounds {
            Some(b) => b.full_filter(None),
            None => FilterState {
                category: None,
                sentiment: ValueRange::degenerate(),
                subjectivity: ValueRange::degenerate(),
            },
        };
        let mut state = Self {
            dataset,
            filter,
            bounds,
            visible: VisibleSubset::default(),
            points: Vec::new(),
            chart_generation: 0,
            selection: SelectionState::cleared(),
            page: Pagination::new(page_size),
            status_message: None,
        };
        state.refilter();
        state
    }

    /// Apply one user input and rebuild the views that depend on it.
    pub fn dispatch(&mut self, event: Event) -> Redraw {
        log::debug!("dispatch {event:?}");
        let redraw = match event {
            Event::CategoryChanged(category) => {
                self.change_category(category);
                Redraw::CHART
            }
            Event::SentimentRangeChanged(lo, hi) => {
                match self.checked_range(lo, hi, |b| b.sentiment) {
                    Some(r) => self.filter.sentiment = r,
                    None => return Redraw::default(),
                }
                self.refilter();
                Redraw::CHART
            }
            Event::SubjectivityRangeChanged(lo, hi) => {
                match self.checked_range(lo, hi, |b| b.subjectivity) {
                    Some(r) => self.filter.subjectivity = r,
                    None => return Redraw::default(),
                }
                self.refilter();
                Redraw::CHART
            }
            Event::RegionSelected(points) => {
                let mapped = SelectionState::from_points(&points, &self.visible);
                if !mapped.dropped.is_empty() {
                    log::warn!(
                        "Ignoring {} stale point indices (chart has {} points): {:?}",
                        mapped.dropped.len(),
                        self.visible.len(),
                        mapped.dropped
                    );
                }
                self.selection = mapped.state;
                self.page.reset();
                Redraw::TABLE
            }
            Event::SelectionCleared => {
                self.selection = SelectionState::cleared();
                self.page.reset();
                Redraw::TABLE
            }
        };
        log::debug!(
            "{} visible, {} selected",
            self.visible.len(),
            self.selected_count()
        );
        redraw
    }

    /// Recompute bounds for the new category and reset both ranges to them.
    fn change_category(&mut self, category: Option<String>) {
        self.bounds = compute_bounds(&self.dataset, category.as_deref());
        match &self.bounds {
            Some(b) => {
                log::debug!(
                    "bounds: sentiment {} subjectivity {}",
                    b.sentiment,
                    b.subjectivity
                );
                self.filter = b.full_filter(category);
                self.status_message = None;
            }
            None => {
                let label = category.as_deref().unwrap_or("all categories");
                log::warn!("No data for category '{label}', keeping previous ranges");
                self.status_message = Some(format!("No data for {label}"));
                self.filter.category = category;
            }
        }
        self.refilter();
    }

    /// Normalise a range event: reject non-finite input, order the endpoints
    /// and clamp into the current bounds.
    fn checked_range(
        &self,
        lo: f64,
        hi: f64,
        bound: impl Fn(&FilterBounds) -> ValueRange,
    ) -> Option<ValueRange> {
        if !(lo.is_finite() && hi.is_finite()) {
            log::warn!("Ignoring non-finite range ({lo}, {hi})");
            return None;
        }
        let range = ValueRange::new(lo, hi);
        Some(match &self.bounds {
            Some(b) => range.clamp_to(&bound(b)),
            None => range,
        })
    }

    /// Recompute the visible subset and chart input after a filter change.
    fn refilter(&mut self) {
        self.visible = compute_visible(&self.dataset, &self.filter);
        self.points = chart_points(&self.dataset, &self.visible);
        self.chart_generation += 1;
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn bounds(&self) -> Option<&FilterBounds> {
        self.bounds.as_ref()
    }

    pub fn visible(&self) -> &VisibleSubset {
        &self.visible
    }

    /// Chart input; index `i` is point-local index `i`.
    pub fn chart_points(&self) -> &[ChartPoint] {
        &self.points
    }

    /// Changes whenever the chart input is rebuilt, so the plot can refit.
    pub fn chart_generation(&self) -> u64 {
        self.chart_generation
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Number of table rows, without building them.
    pub fn selected_count(&self) -> usize {
        self.selection.indices().map_or(0, <[usize]>::len)
    }

    /// Table input for the current selection.
    pub fn table_rows(&self) -> Vec<&str> {
        table_rows(&self.dataset, &self.selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn state() -> AppState {
        AppState::new(
            Dataset::from_records(vec![
                record("Jan", -0.5, 0.2),
                record("Feb", 0.1, 0.4),
                record("Jan", 0.8, 0.9),
                record("Feb", 0.9, 0.1),
            ]),
            30,
        )
    }

    #[test]
    fn starts_unfiltered() {
        let s = state();
        assert_eq!(s.visible().indices(), [0, 1, 2, 3]);
        assert_eq!(s.filter().sentiment, ValueRange::new(-0.5, 0.9));
        assert_eq!(s.filter().subjectivity, ValueRange::new(0.1, 0.9));
        assert!(!s.selection().is_active());
    }

    #[test]
    fn range_events_are_ordered_and_clamped() {
        let mut s = state();
        let redraw = s.dispatch(Event::SentimentRangeChanged(2.0, 0.0));
        assert_eq!(redraw, Redraw::CHART);
        assert_eq!(s.filter().sentiment, ValueRange::new(0.0, 0.9));
        assert_eq!(s.visible().indices(), [1, 2, 3]);
    }

    #[test]
    fn non_finite_range_is_ignored() {
        let mut s = state();
        let before = s.filter().clone();
        let redraw = s.dispatch(Event::SubjectivityRangeChanged(f64::NAN, 0.5));
        assert_eq!(redraw, Redraw::default());
        assert_eq!(s.filter(), &before);
    }

    #[test]
    fn unknown_category_keeps_ranges_and_empties_chart() {
        let mut s = state();
        s.dispatch(Event::SentimentRangeChanged(0.0, 0.5));
        s.dispatch(Event::CategoryChanged(Some("Dec".into())));
        assert!(s.bounds().is_none());
        assert_eq!(s.filter().sentiment, ValueRange::new(0.0, 0.5));
        assert!(s.filter().sentiment.is_finite());
        assert!(s.chart_points().is_empty());
        assert!(s.status_message.is_some());

        s.dispatch(Event::CategoryChanged(None));
        assert!(s.status_message.is_none());
        assert_eq!(s.visible().len(), 4);
    }

    #[test]
    fn empty_dataset_is_degenerate_not_nan() {
        let mut s = AppState::new(Dataset::default(), 30);
        assert!(s.bounds().is_none());
        assert_eq!(s.filter().sentiment, ValueRange::degenerate());
        s.dispatch(Event::RegionSelected(vec![0, 1]));
        assert!(s.table_rows().is_empty());
    }

    #[test]
    fn chart_generation_tracks_chart_rebuilds() {
        let mut s = state();
        let start = s.chart_generation();
        s.dispatch(Event::RegionSelected(vec![0]));
        s.dispatch(Event::SelectionCleared);
        assert_eq!(s.chart_generation(), start);

        s.dispatch(Event::SentimentRangeChanged(0.0, 0.5));
        assert_eq!(s.chart_generation(), start + 1);
        s.dispatch(Event::CategoryChanged(Some("Feb".into())));
        assert_eq!(s.chart_generation(), start + 2);

        s.dispatch(Event::SubjectivityRangeChanged(f64::NAN, 0.5));
        assert_eq!(s.chart_generation(), start + 2);
    }

    #[test]
    fn selected_count_matches_table_rows() {
        let mut s = state();
        assert_eq!(s.selected_count(), 0);
        s.dispatch(Event::RegionSelected(vec![3, 0, 9]));
        assert_eq!(s.selected_count(), 2);
        assert_eq!(s.selected_count(), s.table_rows().len());

        s.dispatch(Event::CategoryChanged(Some("Feb".into())));
        s.dispatch(Event::RegionSelected(vec![1]));
        assert_eq!(s.selected_count(), s.table_rows().len());
        s.dispatch(Event::SelectionCleared);
        assert_eq!(s.selected_count(), s.table_rows().len());
    }

    #[test]
    fn new_selection_resets_table_page() {
        let mut s = state();
        s.page.next(100);
        assert_eq!(s.page.page(), 1);
        s.dispatch(Event::RegionSelected(vec![0]));
        assert_eq!(s.page.page(), 0);
    }
}
