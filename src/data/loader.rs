use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::model::{
    Dataset, Record, DIM1_COLUMN, DIM2_COLUMN, SENTIMENT_COLUMN, SUBJECTIVITY_COLUMN, TEXT_COLUMN,
};
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a tweet dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; extra columns (e.g. a pandas index) are ignored
/// * `.json`    – `[{ "Month": "Jan", "Sentiment": 0.3, ... }, ...]`
/// * `.parquet` – string and numeric columns named as in the CSV header
///
/// `category_column` names the column used for the category dropdown.
pub fn load_file(path: &Path, category_column: &str) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path, category_column),
        "json" => load_json(path, category_column),
        "parquet" | "pq" => load_parquet(path, category_column),
        other => Err(DataError::UnsupportedExtension {
            ext: other.to_string(),
        }
        .into()),
    };
    dataset.with_context(|| format!("loading dataset from {}", path.display()))
}

/// Names of the six required columns, category first.
fn required_columns(category_column: &str) -> [&str; 6] {
    [
        category_column,
        SENTIMENT_COLUMN,
        SUBJECTIVITY_COLUMN,
        DIM1_COLUMN,
        DIM2_COLUMN,
        TEXT_COLUMN,
    ]
}

fn finite(value: f64, row: usize, column: &str) -> Result<f64, DataError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DataError::NonFiniteNumber {
            row,
            column: column.to_string(),
        })
    }
}

fn parse_number(raw: &str, row: usize, column: &str) -> Result<f64, DataError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DataError::MissingValue {
            row,
            column: column.to_string(),
        });
    }
    let value = raw.parse::<f64>().map_err(|_| DataError::InvalidNumber {
        row,
        column: column.to_string(),
        value: raw.to_string(),
    })?;
    finite(value, row, column)
}

fn required_text(raw: &str, row: usize, column: &str) -> Result<String, DataError> {
    if raw.is_empty() {
        return Err(DataError::MissingValue {
            row,
            column: column.to_string(),
        });
    }
    Ok(raw.to_string())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path, category_column: &str) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let columns = required_columns(category_column);
    let mut idx = [0usize; 6];
    for (slot, name) in idx.iter_mut().zip(columns) {
        *slot = headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DataError::MissingColumn {
                column: name.to_string(),
            })?;
    }

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let field = |i: usize| row.get(idx[i]).unwrap_or("");

        records.push(Record {
            category: required_text(field(0), row_no, columns[0])?,
            sentiment: parse_number(field(1), row_no, columns[1])?,
            subjectivity: parse_number(field(2), row_no, columns[2])?,
            dim1: parse_number(field(3), row_no, columns[3])?,
            dim2: parse_number(field(4), row_no, columns[4])?,
            text: required_text(field(5), row_no, columns[5])?,
        });
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Month": "Jan",
///     "Sentiment": 0.25,
///     "Subjectivity": 0.6,
///     "Dimension 1": -3.1,
///     "Dimension 2": 4.7,
///     "RawTweet": "..."
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path, category_column: &str) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;
    let columns = required_columns(category_column);

    let mut records = Vec::with_capacity(rows.len());
    for (i, rec) in rows.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        records.push(Record {
            category: json_text(obj, i, columns[0])?,
            sentiment: json_number(obj, i, columns[1])?,
            subjectivity: json_number(obj, i, columns[2])?,
            dim1: json_number(obj, i, columns[3])?,
            dim2: json_number(obj, i, columns[4])?,
            text: json_text(obj, i, columns[5])?,
        });
    }

    Ok(Dataset::from_records(records))
}

fn json_field<'a>(
    obj: &'a Map<String, JsonValue>,
    row: usize,
    column: &str,
) -> Result<&'a JsonValue, DataError> {
    // An absent key is a missing value in that row.
    match obj.get(column) {
        None | Some(JsonValue::Null) => Err(DataError::MissingValue {
            row,
            column: column.to_string(),
        }),
        Some(v) => Ok(v),
    }
}

fn json_number(obj: &Map<String, JsonValue>, row: usize, column: &str) -> Result<f64, DataError> {
    match json_field(obj, row, column)? {
        JsonValue::Number(n) => match n.as_f64() {
            Some(v) => finite(v, row, column),
            None => Err(DataError::InvalidNumber {
                row,
                column: column.to_string(),
                value: n.to_string(),
            }),
        },
        JsonValue::String(s) => parse_number(s, row, column),
        other => Err(DataError::InvalidNumber {
            row,
            column: column.to_string(),
            value: other.to_string(),
        }),
    }
}

fn json_text(obj: &Map<String, JsonValue>, row: usize, column: &str) -> Result<String, DataError> {
    match json_field(obj, row, column)? {
        JsonValue::String(s) => Ok(s.clone()),
        other => Ok(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing the tweet table.
///
/// Text columns may be Utf8 or LargeUtf8; numeric columns may be any of
/// Float64, Float32, Int64 or Int32. Works with files written by both
/// **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path, category_column: &str) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let columns = required_columns(category_column);
    let mut records = Vec::new();
    let mut offset = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let mut cols = Vec::with_capacity(columns.len());
        for name in columns {
            let i = schema
                .index_of(name)
                .map_err(|_| DataError::MissingColumn {
                    column: name.to_string(),
                })?;
            cols.push(batch.column(i));
        }

        for row in 0..batch.num_rows() {
            let abs = offset + row;
            records.push(Record {
                category: arrow_text(cols[0], row, abs, columns[0])?,
                sentiment: arrow_number(cols[1], row, abs, columns[1])?,
                subjectivity: arrow_number(cols[2], row, abs, columns[2])?,
                dim1: arrow_number(cols[3], row, abs, columns[3])?,
                dim2: arrow_number(cols[4], row, abs, columns[4])?,
                text: arrow_text(cols[5], row, abs, columns[5])?,
            });
        }
        offset += batch.num_rows();
    }

    Ok(Dataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn arrow_null_check(col: &Arc<dyn Array>, row: usize, abs: usize, column: &str) -> Result<(), DataError> {
    if col.is_null(row) {
        Err(DataError::MissingValue {
            row: abs,
            column: column.to_string(),
        })
    } else {
        Ok(())
    }
}

fn unsupported(col: &Arc<dyn Array>, column: &str) -> DataError {
    DataError::UnsupportedColumnType {
        column: column.to_string(),
        data_type: format!("{:?}", col.data_type()),
    }
}

fn arrow_text(col: &Arc<dyn Array>, row: usize, abs: usize, column: &str) -> Result<String, DataError> {
    arrow_null_check(col, row, abs, column)?;
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        _ => Err(unsupported(col, column)),
    }
}

fn arrow_number(col: &Arc<dyn Array>, row: usize, abs: usize, column: &str) -> Result<f64, DataError> {
    arrow_null_check(col, row, abs, column)?;
    let value = match col.data_type() {
        DataType::Float64 => col.as_primitive::<Float64Type>().value(row),
        DataType::Float32 => col.as_primitive::<Float32Type>().value(row) as f64,
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row) as f64,
        DataType::Int32 => col.as_primitive::<Int32Type>().value(row) as f64,
        _ => return Err(unsupported(col, column)),
    };
    finite(value, abs, column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(ext: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn data_error(err: &anyhow::Error) -> Option<&DataError> {
        err.chain().find_map(|e| e.downcast_ref::<DataError>())
    }

    #[test]
    fn csv_ignores_extra_columns() {
        let file = write_temp(
            "csv",
            ",Month,Sentiment,Subjectivity,Dimension 1,Dimension 2,RawTweet\n\
             0,Jan,0.5,0.25,1.0,2.0,hello world\n\
             1,Feb,-0.1,0.75,-1.5,0.5,\"quoted, text\"\n",
        );
        let ds = load_file(file.path(), "Month").unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.categories(), ["Jan", "Feb"]);
        let second = ds.get(1).unwrap();
        assert_eq!(second.sentiment, -0.1);
        assert_eq!(second.dim1, -1.5);
        assert_eq!(second.text, "quoted, text");
    }

    #[test]
    fn csv_missing_column_is_fatal() {
        let file = write_temp(
            "csv",
            "Month,Sentiment,Subjectivity,Dimension 1,RawTweet\nJan,0.1,0.2,0.3,hi\n",
        );
        let err = load_file(file.path(), "Month").unwrap_err();
        assert_eq!(
            data_error(&err),
            Some(&DataError::MissingColumn {
                column: "Dimension 2".into()
            })
        );
    }

    #[test]
    fn csv_rejects_nan_and_garbage() {
        let header = "Month,Sentiment,Subjectivity,Dimension 1,Dimension 2,RawTweet\n";
        let nan = write_temp("csv", &format!("{header}Jan,NaN,0.2,0.3,0.4,hi\n"));
        let err = load_file(nan.path(), "Month").unwrap_err();
        assert!(matches!(
            data_error(&err),
            Some(DataError::NonFiniteNumber { row: 0, .. })
        ));

        let garbage = write_temp("csv", &format!("{header}Jan,0.1,lots,0.3,0.4,hi\n"));
        let err = load_file(garbage.path(), "Month").unwrap_err();
        assert!(matches!(
            data_error(&err),
            Some(DataError::InvalidNumber { column, .. }) if column == "Subjectivity"
        ));
    }

    #[test]
    fn custom_category_column() {
        let file = write_temp(
            "csv",
            "Week,Sentiment,Subjectivity,Dimension 1,Dimension 2,RawTweet\nW1,0.1,0.2,0.3,0.4,hi\n",
        );
        let ds = load_file(file.path(), "Week").unwrap();
        assert_eq!(ds.get(0).unwrap().category, "W1");
    }

    #[test]
    fn json_records() {
        let file = write_temp(
            "json",
            r#"[
                {"Month": "Apr", "Sentiment": 0.2, "Subjectivity": 0.4,
                 "Dimension 1": 3, "Dimension 2": -2.5, "RawTweet": "spring"}
            ]"#,
        );
        let ds = load_file(file.path(), "Month").unwrap();
        let rec = ds.get(0).unwrap();
        assert_eq!(rec.category, "Apr");
        assert_eq!(rec.dim1, 3.0);
        assert_eq!(rec.text, "spring");
    }

    #[test]
    fn json_null_is_missing_value() {
        let file = write_temp(
            "json",
            r#"[{"Month": "Apr", "Sentiment": null, "Subjectivity": 0.4,
                 "Dimension 1": 3, "Dimension 2": -2.5, "RawTweet": "spring"}]"#,
        );
        let err = load_file(file.path(), "Month").unwrap_err();
        assert!(matches!(
            data_error(&err),
            Some(DataError::MissingValue { row: 0, .. })
        ));
    }

    #[test]
    fn json_absent_key_reports_its_row() {
        let file = write_temp(
            "json",
            r#"[
                {"Month": "Apr", "Sentiment": 0.2, "Subjectivity": 0.4,
                 "Dimension 1": 3, "Dimension 2": -2.5, "RawTweet": "spring"},
                {"Month": "May", "Sentiment": 0.1, "Subjectivity": 0.3,
                 "Dimension 1": 1, "Dimension 2": 0.5}
            ]"#,
        );
        let err = load_file(file.path(), "Month").unwrap_err();
        assert_eq!(
            data_error(&err),
            Some(&DataError::MissingValue {
                row: 1,
                column: "RawTweet".into()
            })
        );
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = write_temp("xlsx", "");
        let err = load_file(file.path(), "Month").unwrap_err();
        assert_eq!(
            data_error(&err),
            Some(&DataError::UnsupportedExtension { ext: "xlsx".into() })
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_file(Path::new("/nonexistent/tweets.csv"), "Month").is_err());
    }
}
