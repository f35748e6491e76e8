//! Catalog storage abstraction.
//!
//! The [`CatalogStore`] trait is everything the engine needs from a loaded
//! catalog: positional entry access, the ordered list of names used as
//! fuzzy-match candidates, exact-name lookup, and the similarity row for a
//! given entry. Implementations are read-only after construction, so a
//! single store can be shared by any number of concurrent callers.

pub mod memory;

use crate::models::CatalogEntry;

/// Read-only view over a catalog and its similarity matrix.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`len`](CatalogStore::len) | Number of entries (equals matrix side) |
/// | [`entry_at`](CatalogStore::entry_at) | Entry at a row index |
/// | [`names`](CatalogStore::names) | All names, in matrix row order |
/// | [`index_of_exact_name`](CatalogStore::index_of_exact_name) | First row with this exact name |
/// | [`similarity_row`](CatalogStore::similarity_row) | Matrix row for an entry |
pub trait CatalogStore: Send + Sync {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry_at(&self, index: usize) -> Option<&CatalogEntry>;

    /// Names in row order; position `i` is entry `i`.
    fn names(&self) -> Vec<&str>;

    /// Index of the first entry whose name equals `name` exactly.
    fn index_of_exact_name(&self, name: &str) -> Option<usize>;

    /// Similarity scores from entry `index` to every entry, indexed by column.
    fn similarity_row(&self, index: usize) -> Option<&[f64]>;
}
