use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Column names of the source table
// ---------------------------------------------------------------------------

pub const DEFAULT_CATEGORY_COLUMN: &str = "Month";
pub const SENTIMENT_COLUMN: &str = "Sentiment";
pub const SUBJECTIVITY_COLUMN: &str = "Subjectivity";
pub const DIM1_COLUMN: &str = "Dimension 1";
pub const DIM2_COLUMN: &str = "Dimension 2";
pub const TEXT_COLUMN: &str = "RawTweet";

// ---------------------------------------------------------------------------
// ValueRange – an inclusive numeric interval with lo <= hi
// ---------------------------------------------------------------------------

/// Inclusive interval `[lo, hi]`. Constructors keep `lo <= hi`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    lo: f64,
    hi: f64,
}

impl ValueRange {
    /// Build a range from two endpoints in either order.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    /// The degenerate `[0, 0]` range used when there is no data at all.
    pub fn degenerate() -> Self {
        Self { lo: 0.0, hi: 0.0 }
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn contains(&self, v: f64) -> bool {
        self.lo <= v && v <= self.hi
    }

    pub fn is_finite(&self) -> bool {
        self.lo.is_finite() && self.hi.is_finite()
    }

    /// Clamp both endpoints into `bounds`.
    pub fn clamp_to(&self, bounds: &ValueRange) -> Self {
        Self::new(
            self.lo.clamp(bounds.lo, bounds.hi),
            self.hi.clamp(bounds.lo, bounds.hi),
        )
    }

    /// Min/max over an iterator of values; `None` when the iterator is empty.
    pub fn spanning(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some(Self { lo: v, hi: v }),
            Some(r) => Some(Self {
                lo: r.lo.min(v),
                hi: r.hi.max(v),
            }),
        })
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.4}, {:.4}]", self.lo, self.hi)
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the source table
// ---------------------------------------------------------------------------

/// A single labelled tweet. Identified by its position in the [`Dataset`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub category: String,
    pub sentiment: f64,
    pub subjectivity: f64,
    /// First projection coordinate (chart x).
    pub dim1: f64,
    /// Second projection coordinate (chart y).
    pub dim2: f64,
    pub text: String,
}

/// The numeric columns of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Sentiment,
    Subjectivity,
    Dim1,
    Dim2,
}

impl NumericField {
    pub fn of(self, record: &Record) -> f64 {
        match self {
            NumericField::Sentiment => record.sentiment,
            NumericField::Subjectivity => record.subjectivity,
            NumericField::Dim1 => record.dim1,
            NumericField::Dim2 => record.dim2,
        }
    }

    pub fn column_name(self) -> &'static str {
        match self {
            NumericField::Sentiment => SENTIMENT_COLUMN,
            NumericField::Subjectivity => SUBJECTIVITY_COLUMN,
            NumericField::Dim1 => DIM1_COLUMN,
            NumericField::Dim2 => DIM2_COLUMN,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The immutable, loaded-once table of records.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    /// Unique categories in order of first appearance.
    categories: Vec<String>,
}

impl Dataset {
    /// Build the dataset and its category index from loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut categories = Vec::new();
        for rec in &records {
            if seen.insert(rec.category.as_str()) {
                categories.push(rec.category.clone());
            }
        }
        Dataset {
            records,
            categories,
        }
    }

    /// All records in load order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Min/max of a numeric column over every record.
    pub fn column_range(&self, field: NumericField) -> Option<ValueRange> {
        ValueRange::spanning(self.records.iter().map(|r| field.of(r)))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(category: &str, sentiment: f64, subjectivity: f64) -> Record {
        Record {
            category: category.to_string(),
            sentiment,
            subjectivity,
            dim1: sentiment * 10.0,
            dim2: subjectivity * 10.0,
            text: format!("{category} {sentiment} {subjectivity}"),
        }
    }

    #[test]
    fn value_range_orders_endpoints() {
        let r = ValueRange::new(0.8, -0.5);
        assert_eq!(r.lo(), -0.5);
        assert_eq!(r.hi(), 0.8);
        assert!(r.contains(0.8));
        assert!(r.contains(-0.5));
        assert!(!r.contains(0.81));
    }

    #[test]
    fn clamp_keeps_range_inside_bounds() {
        let bounds = ValueRange::new(0.0, 1.0);
        let r = ValueRange::new(-3.0, 0.5).clamp_to(&bounds);
        assert_eq!(r, ValueRange::new(0.0, 0.5));
        let r = ValueRange::new(2.0, 5.0).clamp_to(&bounds);
        assert_eq!(r, ValueRange::new(1.0, 1.0));
    }

    #[test]
    fn spanning_empty_is_none() {
        assert_eq!(ValueRange::spanning(std::iter::empty()), None);
        assert_eq!(
            ValueRange::spanning([0.3, -0.1, 0.2]),
            Some(ValueRange::new(-0.1, 0.3))
        );
    }

    #[test]
    fn categories_keep_first_appearance_order() {
        let ds = Dataset::from_records(vec![
            record("Mar", 0.1, 0.1),
            record("Jan", 0.2, 0.2),
            record("Mar", 0.3, 0.3),
            record("Feb", 0.4, 0.4),
        ]);
        assert_eq!(ds.categories(), ["Mar", "Jan", "Feb"]);
        assert_eq!(ds.len(), 4);
    }

    #[test]
    fn column_range_over_all_records() {
        let ds = Dataset::from_records(vec![record("Jan", -0.4, 0.9), record("Feb", 0.6, 0.1)]);
        assert_eq!(
            ds.column_range(NumericField::Sentiment),
            Some(ValueRange::new(-0.4, 0.6))
        );
        assert_eq!(Dataset::default().column_range(NumericField::Dim1), None);
    }
}
