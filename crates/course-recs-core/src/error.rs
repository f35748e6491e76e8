//! Error type for catalog construction and recommendation requests.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecommendError {
    /// The exact-name variant was asked for a name with no catalog row.
    #[error("course not found: {0}")]
    UnknownExactName(String),

    #[error("similarity matrix has {matrix_rows} rows but the catalog has {catalog_rows} entries")]
    DimensionMismatch {
        matrix_rows: usize,
        catalog_rows: usize,
    },

    #[error("similarity matrix is not square: row {row} has {len} columns, expected {expected}")]
    NonSquareMatrix {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// A catalog with no rows cannot back a recommender.
    #[error("catalog is empty")]
    EmptyCatalog,

    #[error("invalid recommendation parameter: {0}")]
    InvalidParams(String),
}
