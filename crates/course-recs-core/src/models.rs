//! Core data models shared by the catalog store and the engine.

use serde::Serialize;

/// One course row in the catalog.
///
/// Fields are kept as raw strings. In particular `rating` is whatever the
/// dataset held (`"4.7"`, `"Not Calibrated"`, `""`) and is only interpreted
/// at scoring time by [`normalize_rating`](crate::rating::normalize_rating).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CatalogEntry {
    pub name: String,
    pub institution: String,
    pub difficulty: String,
    pub rating: String,
    pub url: String,
    pub description: String,
}

impl CatalogEntry {
    /// Build an entry with only a name; all optional fields take their defaults.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            institution: "Unknown".to_string(),
            difficulty: "Unknown".to_string(),
            rating: String::new(),
            url: String::new(),
            description: String::new(),
        }
    }
}

/// A single ranked recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResult {
    pub course_name: String,
    pub course_url: String,
    /// Raw rating string, exactly as stored in the catalog.
    pub rating: String,
    pub institution: String,
    pub difficulty_level: String,
    /// Raw similarity between the anchor and this course.
    pub similarity: f64,
    /// `similarity * (1 - w) + normalized_rating * w`.
    pub final_score: f64,
}
