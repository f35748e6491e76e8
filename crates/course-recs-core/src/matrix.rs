//! Dense, square similarity matrix.
//!
//! Stored row-major in a single `Vec<f64>`. Row `i` and column `i` both
//! refer to catalog entry `i`. Scores are never interpreted beyond
//! "higher is more similar", so negative or >1 values are kept as-is.

use crate::error::RecommendError;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimilarityMatrix {
    side: usize,
    data: Vec<f64>,
}

impl SimilarityMatrix {
    /// Build a matrix from nested rows, rejecting ragged or non-square input.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, RecommendError> {
        let side = rows.len();
        let mut data = Vec::with_capacity(side * side);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != side {
                return Err(RecommendError::NonSquareMatrix {
                    row,
                    len: values.len(),
                    expected: side,
                });
            }
            data.extend(values);
        }
        Ok(Self { side, data })
    }

    /// Number of rows (and columns).
    pub fn len(&self) -> usize {
        self.side
    }

    pub fn is_empty(&self) -> bool {
        self.side == 0
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        if index >= self.side {
            return None;
        }
        let start = index * self.side;
        Some(&self.data[start..start + self.side])
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.row(row).and_then(|r| r.get(col).copied())
    }

    /// Principal submatrix over `keep`, in the given order.
    ///
    /// Used when the loader drops duplicate catalog rows: the same indices
    /// are dropped from both axes so row `i` still means entry `i`.
    /// Indices must be in range.
    pub fn select(&self, keep: &[usize]) -> Self {
        let side = keep.len();
        let mut data = Vec::with_capacity(side * side);
        for &r in keep {
            let start = r * self.side;
            data.extend(keep.iter().map(|&c| self.data[start + c]));
        }
        Self { side, data }
    }
}
