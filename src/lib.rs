//! # Course Recs
//!
//! **Course recommendations from a precomputed similarity matrix.**
//!
//! Given a free-text course name, Course Recs fuzzy-matches it to a catalog
//! entry, ranks the catalog by that entry's row in a precomputed similarity
//! matrix, nudges the ranking with normalized course ratings, and returns
//! the top results via a CLI and a JSON HTTP server.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐   ┌────────────────┐
//! │ CSV catalog │──▶│    Loader     │──▶│ InMemoryCatalog │
//! │ + matrix    │   │ dedup/ASCII  │   │  (immutable)    │
//! └─────────────┘   └──────────────┘   └───────┬────────┘
//!                                              │
//!                                       ┌──────┴──────┐
//!                                       │ Recommender │
//!                                       └──────┬──────┘
//!                          ┌───────────────────┤
//!                          ▼                   ▼
//!                     ┌──────────┐       ┌──────────┐
//!                     │   CLI    │       │   HTTP   │
//!                     │  (recs)  │       │  (axum)  │
//!                     └──────────┘       └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! recs check                              # validate data files
//! recs courses --limit 20                 # list catalog names
//! recs recommend "machine learning"       # fuzzy recommend
//! recs recommend "Machine Learning" --exact --top-n 3
//! recs serve                              # start HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`loader`] | Catalog CSV and similarity matrix loading, cleaning, dedup |
//! | [`recommend`] | Request overrides, shared recommend path, CLI output |
//! | [`courses`] | Catalog listing |
//! | [`stats`] | Data health summary (`recs check`) |
//! | [`server`] | JSON HTTP server (Axum) with CORS |
//!
//! The ranking algorithm itself lives in the `course-recs-core` crate.

pub mod config;
pub mod courses;
pub mod loader;
pub mod recommend;
pub mod server;
pub mod stats;

pub use course_recs_core::{
    CatalogEntry, CatalogStore, InMemoryCatalog, RecommendError, RecommendParams,
    RecommendationResult, Recommender, SimilarityMatrix,
};
