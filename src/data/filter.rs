use super::model::{Dataset, Record, ValueRange};

// ---------------------------------------------------------------------------
// Filter predicate: category + two numeric ranges
// ---------------------------------------------------------------------------

/// Current values of the three filter controls.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    /// `None` means "all categories".
    pub category: Option<String>,
    pub sentiment: ValueRange,
    pub subjectivity: ValueRange,
}

impl FilterState {
    /// Whether `record` passes all three predicates.
    pub fn matches(&self, record: &Record) -> bool {
        self.category
            .as_deref()
            .map_or(true, |c| record.category == c)
            && self.sentiment.contains(record.sentiment)
            && self.subjectivity.contains(record.subjectivity)
    }
}

// ---------------------------------------------------------------------------
// Visible subset
// ---------------------------------------------------------------------------

/// Dataset indices passing the current filters, in dataset order.
///
/// Position `i` in this list is the chart's point-local index `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleSubset {
    indices: Vec<usize>,
}

impl VisibleSubset {
    /// Every row of `dataset`, unfiltered.
    pub fn all(dataset: &Dataset) -> Self {
        Self {
            indices: (0..dataset.len()).collect(),
        }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Map a chart point-local index back to its dataset index.
    pub fn dataset_index(&self, point: usize) -> Option<usize> {
        self.indices.get(point).copied()
    }

    /// `(dataset index, record)` pairs in plotted order.
    pub fn iter<'a>(&'a self, dataset: &'a Dataset) -> impl Iterator<Item = (usize, &'a Record)> + 'a {
        self.indices
            .iter()
            .filter_map(move |&i| dataset.get(i).map(|r| (i, r)))
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Return the subset of `dataset` that passes every predicate of `filter`,
/// preserving dataset order.
pub fn compute_visible(dataset: &Dataset, filter: &FilterState) -> VisibleSubset {
    let indices = dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| filter.matches(rec))
        .map(|(i, _)| i)
        .collect();
    VisibleSubset { indices }
}
