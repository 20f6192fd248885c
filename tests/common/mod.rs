#![allow(dead_code)]

use tweet_explorer::data::model::{Dataset, Record};

pub fn record(category: &str, sentiment: f64, subjectivity: f64, text: &str) -> Record {
    Record {
        category: category.to_string(),
        sentiment,
        subjectivity,
        dim1: sentiment * 4.0,
        dim2: subjectivity * 4.0 - 2.0,
        text: text.to_string(),
    }
}

/// Two months: Jan sentiments span [-0.5, 0.8], Feb sentiments span [0.1, 0.9].
pub fn months_dataset() -> Dataset {
    Dataset::from_records(vec![
        record("Jan", -0.5, 0.3, "cold start to the year"),
        record("Feb", 0.1, 0.2, "valentines plans"),
        record("Jan", 0.8, 0.6, "new year new me"),
        record("Feb", 0.9, 0.7, "short month, great month"),
        record("Jan", 0.2, 0.1, "back to work"),
        record("Feb", 0.4, 0.5, "snow day"),
    ])
}

/// Ten rows alternating between categories A and B.
pub fn ten_row_dataset() -> Dataset {
    Dataset::from_records(
        (0..10)
            .map(|i| {
                let cat = if i % 2 == 0 { "A" } else { "B" };
                let v = i as f64 / 10.0;
                record(cat, v, 1.0 - v, &format!("{cat} tweet {i}"))
            })
            .collect(),
    )
}
