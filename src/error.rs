use thiserror::Error;

/// Errors raised while turning a source table into a [`Dataset`](crate::data::model::Dataset).
///
/// All of these are fatal at startup: the viewer never opens on a partial table.
#[derive(Debug, Error, PartialEq)]
pub enum DataError {
    #[error("missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("row {row}, column '{column}': missing value")]
    MissingValue { row: usize, column: String },

    #[error("row {row}, column '{column}': '{value}' is not a number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("row {row}, column '{column}': value is not finite")]
    NonFiniteNumber { row: usize, column: String },

    #[error("unsupported file extension: .{ext}")]
    UnsupportedExtension { ext: String },

    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedColumnType { column: String, data_type: String },
}
