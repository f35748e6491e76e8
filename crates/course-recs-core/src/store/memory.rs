//! In-memory [`CatalogStore`] holding the whole snapshot.
//!
//! Entries and the matrix are owned outright and never mutated, so no
//! locking is needed. Exact-name lookup goes through a `HashMap` built at
//! construction time that records the first row for each name.

use std::collections::HashMap;

use crate::error::RecommendError;
use crate::matrix::SimilarityMatrix;
use crate::models::CatalogEntry;

use super::CatalogStore;

/// Immutable catalog snapshot: entries plus their aligned similarity matrix.
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    entries: Vec<CatalogEntry>,
    matrix: SimilarityMatrix,
    first_index: HashMap<String, usize>,
}

impl InMemoryCatalog {
    /// Pair entries with a matrix, failing if the two are not the same size.
    pub fn new(
        entries: Vec<CatalogEntry>,
        matrix: SimilarityMatrix,
    ) -> Result<Self, RecommendError> {
        if matrix.len() != entries.len() {
            return Err(RecommendError::DimensionMismatch {
                matrix_rows: matrix.len(),
                catalog_rows: entries.len(),
            });
        }

        let mut first_index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            first_index.entry(entry.name.clone()).or_insert(i);
        }

        Ok(Self {
            entries,
            matrix,
            first_index,
        })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }
}

impl CatalogStore for InMemoryCatalog {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn entry_at(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    fn index_of_exact_name(&self, name: &str) -> Option<usize> {
        self.first_index.get(name).copied()
    }

    fn similarity_row(&self, index: usize) -> Option<&[f64]> {
        self.matrix.row(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(names: &[&str]) -> InMemoryCatalog {
        let n = names.len();
        let rows: Vec<Vec<f64>> = (0..n)
            .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();
        InMemoryCatalog::new(
            names.iter().map(|n| CatalogEntry::named(*n)).collect(),
            SimilarityMatrix::from_rows(rows).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0]]).unwrap();
        let err = InMemoryCatalog::new(
            vec![CatalogEntry::named("a"), CatalogEntry::named("b")],
            matrix,
        )
        .unwrap_err();
        assert_eq!(
            err,
            RecommendError::DimensionMismatch {
                matrix_rows: 1,
                catalog_rows: 2
            }
        );
    }

    #[test]
    fn test_names_in_row_order() {
        let c = catalog(&["Python Basics", "Rust Basics", "Go Basics"]);
        assert_eq!(c.names(), vec!["Python Basics", "Rust Basics", "Go Basics"]);
        assert_eq!(c.entry_at(1).unwrap().name, "Rust Basics");
        assert!(c.entry_at(3).is_none());
    }

    #[test]
    fn test_exact_name_first_row_wins() {
        let c = catalog(&["Intro", "Other", "Intro"]);
        assert_eq!(c.index_of_exact_name("Intro"), Some(0));
        assert_eq!(c.index_of_exact_name("Other"), Some(1));
        assert_eq!(c.index_of_exact_name("intro"), None);
    }

    #[test]
    fn test_similarity_row_aligned() {
        let c = catalog(&["a", "b"]);
        assert_eq!(c.similarity_row(1), Some(&[0.0, 1.0][..]));
        assert!(c.similarity_row(2).is_none());
    }

    #[test]
    fn test_empty_catalog() {
        let c = InMemoryCatalog::new(Vec::new(), SimilarityMatrix::default()).unwrap();
        assert!(c.is_empty());
        assert!(c.names().is_empty());
    }
}
