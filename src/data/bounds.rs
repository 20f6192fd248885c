use super::filter::FilterState;
use super::model::{Dataset, NumericField, Record, ValueRange};

// ---------------------------------------------------------------------------
// Range policy: slider bounds for the current category
// ---------------------------------------------------------------------------

/// Allowed min/max of both numeric filters for one category selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterBounds {
    pub sentiment: ValueRange,
    pub subjectivity: ValueRange,
}

impl FilterBounds {
    /// A filter that selects everything within these bounds.
    pub fn full_filter(&self, category: Option<String>) -> FilterState {
        FilterState {
            category,
            sentiment: self.sentiment,
            subjectivity: self.subjectivity,
        }
    }
}

/// Min/max of sentiment and subjectivity over the records of `category`
/// (every record when `category` is `None`).
///
/// The two reductions are independent. Returns `None` when no record matches,
/// which callers treat as "no data for this category" rather than a bound.
pub fn compute_bounds(dataset: &Dataset, category: Option<&str>) -> Option<FilterBounds> {
    let matching: Vec<&Record> = dataset
        .records()
        .iter()
        .filter(|r| category.map_or(true, |c| r.category == c))
        .collect();
    let sentiment = ValueRange::spanning(matching.iter().map(|r| NumericField::Sentiment.of(r)))?;
    let subjectivity =
        ValueRange::spanning(matching.iter().map(|r| NumericField::Subjectivity.of(r)))?;
    Some(FilterBounds {
        sentiment,
        subjectivity,
    })
}
