use std::collections::BTreeSet;

use super::filter::VisibleSubset;
use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Selection state: dataset rows picked by a region selection on the chart
// ---------------------------------------------------------------------------

/// Dataset indices picked by the last region selection, in the order the
/// chart reported them.
///
/// `None` means no selection has been made (or it was cleared). The indices
/// are never re-filtered when the filters change afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    indices: Option<Vec<usize>>,
    /// Same indices as `indices`, for membership tests while drawing.
    lookup: BTreeSet<usize>,
}

/// Result of mapping a chart selection onto the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedSelection {
    pub state: SelectionState,
    /// Point-local indices that no longer exist in the plotted subset.
    pub dropped: Vec<usize>,
}

impl SelectionState {
    /// Map point-local chart indices through `visible` (the subset the chart
    /// was drawn from). Indices past the end are dropped, not clamped.
    pub fn from_points(points: &[usize], visible: &VisibleSubset) -> MappedSelection {
        let mut indices = Vec::with_capacity(points.len());
        let mut dropped = Vec::new();
        for &p in points {
            match visible.dataset_index(p) {
                Some(i) => indices.push(i),
                None => dropped.push(p),
            }
        }
        let lookup = indices.iter().copied().collect();
        MappedSelection {
            state: SelectionState {
                indices: Some(indices),
                lookup,
            },
            dropped,
        }
    }

    pub fn cleared() -> Self {
        Self::default()
    }

    /// Mapped dataset indices, or `None` when nothing is selected.
    pub fn indices(&self) -> Option<&[usize]> {
        self.indices.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.indices.is_some()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.lookup.contains(&index)
    }
}

/// Records for a selection, in selection order. Empty when nothing is selected.
pub fn apply_selection<'a>(dataset: &'a Dataset, selection: &SelectionState) -> Vec<&'a Record> {
    selection
        .indices()
        .unwrap_or_default()
        .iter()
        .filter_map(|&i| dataset.get(i))
        .collect()
}

// ---------------------------------------------------------------------------
// Region geometry (lasso / box)
// ---------------------------------------------------------------------------

/// A region drawn on the chart, in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    /// Closed polygon (the last vertex connects back to the first).
    Lasso(Vec<[f64; 2]>),
    /// Axis-aligned rectangle spanned by two corners.
    Box { a: [f64; 2], b: [f64; 2] },
}

impl Region {
    pub fn contains(&self, p: [f64; 2]) -> bool {
        match self {
            Region::Lasso(poly) => polygon_contains(poly, p),
            Region::Box { a, b } => {
                let (x0, x1) = (a[0].min(b[0]), a[0].max(b[0]));
                let (y0, y1) = (a[1].min(b[1]), a[1].max(b[1]));
                x0 <= p[0] && p[0] <= x1 && y0 <= p[1] && p[1] <= y1
            }
        }
    }

    /// Point-local indices of `points` inside the region, in plotted order.
    pub fn select(&self, points: &[[f64; 2]]) -> Vec<usize> {
        points
            .iter()
            .enumerate()
            .filter(|(_, p)| self.contains(**p))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Even-odd ray casting. Fewer than three vertices enclose nothing.
fn polygon_contains(poly: &[[f64; 2]], p: [f64; 2]) -> bool {
    if poly.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = poly.len() - 1;
    for i in 0..poly.len() {
        let (xi, yi) = (poly[i][0], poly[i][1]);
        let (xj, yj) = (poly[j][0], poly[j][1]);
        if (yi > p[1]) != (yj > p[1]) && p[0] < (xj - xi) * (p[1] - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{compute_visible, FilterState};
    use crate::data::model::tests::record;
    use crate::data::model::ValueRange;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            record("Jan", 0.1, 0.1),
            record("Feb", 0.2, 0.2),
            record("Jan", 0.3, 0.3),
            record("Feb", 0.4, 0.4),
            record("Jan", 0.5, 0.5),
        ])
    }

    fn feb_only(ds: &Dataset) -> VisibleSubset {
        compute_visible(
            ds,
            &FilterState {
                category: Some("Feb".into()),
                sentiment: ValueRange::new(0.0, 1.0),
                subjectivity: ValueRange::new(0.0, 1.0),
            },
        )
    }

    #[test]
    fn points_map_through_visible_subset() {
        let ds = dataset();
        let mapped = SelectionState::from_points(&[1, 0], &feb_only(&ds));
        assert_eq!(mapped.state.indices(), Some(&[3, 1][..]));
        assert!(mapped.dropped.is_empty());

        let rows = apply_selection(&ds, &mapped.state);
        assert_eq!(rows[0].text, ds.get(3).unwrap().text);
        assert_eq!(rows[1].text, ds.get(1).unwrap().text);
    }

    #[test]
    fn stale_points_are_dropped() {
        let ds = dataset();
        let mapped = SelectionState::from_points(&[0, 7, 1, 2], &feb_only(&ds));
        assert_eq!(mapped.state.indices(), Some(&[1, 3][..]));
        assert_eq!(mapped.dropped, vec![7, 2]);
    }

    #[test]
    fn no_selection_and_empty_selection_yield_no_rows() {
        let ds = dataset();
        assert!(apply_selection(&ds, &SelectionState::cleared()).is_empty());
        let empty = SelectionState::from_points(&[], &VisibleSubset::all(&ds)).state;
        assert!(empty.is_active());
        assert!(apply_selection(&ds, &empty).is_empty());
    }

    #[test]
    fn contains_agrees_with_ordered_indices() {
        let ds = Dataset::from_records((0..50).map(|i| record("Jan", i as f64 / 50.0, 0.5)).collect());
        let points = [41, 3, 17, 3, 29];
        let state = SelectionState::from_points(&points, &VisibleSubset::all(&ds)).state;
        let ordered = state.indices().unwrap();
        for i in 0..ds.len() {
            assert_eq!(state.contains(i), ordered.contains(&i), "index {i}");
        }
        assert!(!SelectionState::cleared().contains(0));
    }

    #[test]
    fn lasso_uses_even_odd_rule() {
        let square = Region::Lasso(vec![[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]]);
        assert!(square.contains([1.0, 1.0]));
        assert!(!square.contains([3.0, 1.0]));
        assert!(!Region::Lasso(vec![[0.0, 0.0], [1.0, 1.0]]).contains([0.5, 0.5]));
    }

    #[test]
    fn box_accepts_corners_in_any_order() {
        let region = Region::Box {
            a: [2.0, 0.0],
            b: [0.0, 2.0],
        };
        let points = [[1.0, 1.0], [5.0, 5.0], [0.0, 0.0], [-1.0, 1.0]];
        assert_eq!(region.select(&points), vec![0, 2]);
    }
}
