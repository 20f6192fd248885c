use super::filter::VisibleSubset;
use super::model::Dataset;
use super::selection::{apply_selection, SelectionState};

// ---------------------------------------------------------------------------
// Chart input
// ---------------------------------------------------------------------------

/// One plotted point. Its position in the `chart_points` output is its
/// point-local index.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    /// Dataset index of the record behind this point.
    pub index: usize,
    pub category: String,
}

impl ChartPoint {
    pub fn xy(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

/// Project the visible subset onto the chart's (dim1, dim2) plane.
pub fn chart_points(dataset: &Dataset, visible: &VisibleSubset) -> Vec<ChartPoint> {
    visible
        .iter(dataset)
        .map(|(index, rec)| ChartPoint {
            x: rec.dim1,
            y: rec.dim2,
            index,
            category: rec.category.clone(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Table input
// ---------------------------------------------------------------------------

/// Raw tweet texts of the selected rows, in selection order.
pub fn table_rows<'a>(dataset: &'a Dataset, selection: &SelectionState) -> Vec<&'a str> {
    apply_selection(dataset, selection)
        .into_iter()
        .map(|r| r.text.as_str())
        .collect()
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Page cursor for the selection table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
    page: usize,
}

impl Pagination {
    /// A page size of zero is treated as one.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page: 0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages for `total` rows; an empty table still has one page.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Rows on the current page.
    pub fn page_rows<'r, T>(&self, rows: &'r [T]) -> &'r [T] {
        let start = (self.page * self.page_size).min(rows.len());
        let end = (start + self.page_size).min(rows.len());
        &rows[start..end]
    }

    pub fn next(&mut self, total: usize) {
        if self.page + 1 < self.page_count(total) {
            self.page += 1;
        }
    }

    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.page = 0;
    }

    /// Pull the cursor back onto the last page if the table shrank.
    pub fn clamp(&mut self, total: usize) {
        self.page = self.page.min(self.page_count(total) - 1);
    }
}
