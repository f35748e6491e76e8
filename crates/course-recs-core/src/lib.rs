//! # Course Recs Core
//!
//! Pure recommendation logic for Course Recs: data models, the catalog
//! store abstraction, fuzzy name matching, similarity ranking, rating
//! normalization, and display sanitization.
//!
//! This crate performs no file or network I/O. Loading the catalog and
//! similarity matrix from disk is the job of the calling application,
//! which hands a fully built [`store::CatalogStore`] to the
//! [`engine::Recommender`].

pub mod engine;
pub mod error;
pub mod fuzzy;
pub mod matrix;
pub mod models;
pub mod rating;
pub mod sanitize;
pub mod store;

pub use engine::{RecommendParams, Recommender};
pub use error::RecommendError;
pub use matrix::SimilarityMatrix;
pub use models::{CatalogEntry, RecommendationResult};
pub use store::{memory::InMemoryCatalog, CatalogStore};
