//! Recommendation engine.
//!
//! The engine operates entirely through the [`CatalogStore`] trait. It does
//! no I/O and holds no mutable state, so one [`Recommender`] can serve any
//! number of concurrent requests.
//!
//! # Algorithm
//!
//! 1. Resolve the anchor row: fuzzy-match the query against all names
//!    (or require an exact name when fuzzy matching is off).
//! 2. Read the anchor's similarity row as `(index, score)` pairs.
//! 3. Stable-sort by score (desc) and keep the first `top_n`.
//! 4. Normalize each candidate's rating to `[0, 1]` and blend:
//!    `final = similarity × (1 - w) + rating × w`.
//! 5. Optionally sanitize display fields.
//! 6. Stable-sort the selection by final score (desc).

use std::cmp::Ordering;

use tracing::debug;

use crate::error::RecommendError;
use crate::fuzzy;
use crate::models::RecommendationResult;
use crate::rating::{blend_score, normalize_rating};
use crate::sanitize::sanitize_display;
use crate::store::CatalogStore;

pub const DEFAULT_TOP_N: usize = 6;
pub const DEFAULT_MIN_MATCH_CONFIDENCE: u32 = 90;
pub const DEFAULT_RATING_WEIGHT: f64 = 0.05;

/// Tuning knobs and variant switches for a recommendation request.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendParams {
    /// Maximum number of results.
    pub top_n: usize,
    /// Minimum fuzzy confidence (`0..=100`) required to accept an anchor.
    pub min_match_confidence: u32,
    /// Share of the final score given to the normalized rating.
    pub rating_weight: f64,
    /// Fuzzy-match the query; when false the query must be an exact name.
    pub use_fuzzy_match: bool,
    /// Strip disallowed characters from name, institution, and difficulty.
    pub sanitize_display: bool,
    /// Keep the anchor itself among the candidates.
    pub include_anchor: bool,
}

impl Default for RecommendParams {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            min_match_confidence: DEFAULT_MIN_MATCH_CONFIDENCE,
            rating_weight: DEFAULT_RATING_WEIGHT,
            use_fuzzy_match: true,
            sanitize_display: true,
            include_anchor: true,
        }
    }
}

impl RecommendParams {
    pub fn validate(&self) -> Result<(), RecommendError> {
        if self.top_n == 0 {
            return Err(RecommendError::InvalidParams("top_n must be >= 1".to_string()));
        }
        if self.min_match_confidence > 100 {
            return Err(RecommendError::InvalidParams(
                "min_match_confidence must be in [0, 100]".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.rating_weight) {
            return Err(RecommendError::InvalidParams(
                "rating_weight must be in [0.0, 1.0]".to_string(),
            ));
        }
        Ok(())
    }
}

/// The catalog row a query resolved to.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    pub index: usize,
    pub name: String,
    /// Match confidence in `[0, 100]`; always 100 for exact lookups.
    pub confidence: f64,
}

/// Recommendation engine over a read-only catalog snapshot.
#[derive(Debug, Clone)]
pub struct Recommender<S> {
    store: S,
    defaults: RecommendParams,
}

impl<S: CatalogStore> Recommender<S> {
    pub fn new(store: S, defaults: RecommendParams) -> Self {
        Self { store, defaults }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn defaults(&self) -> &RecommendParams {
        &self.defaults
    }

    /// Recommend using the engine's default parameters.
    pub fn recommend(&self, query: &str) -> Result<Vec<RecommendationResult>, RecommendError> {
        recommend(&self.store, query, &self.defaults)
    }

    /// Recommend with per-request parameters.
    pub fn recommend_with(
        &self,
        query: &str,
        params: &RecommendParams,
    ) -> Result<Vec<RecommendationResult>, RecommendError> {
        recommend(&self.store, query, params)
    }

    /// Recommend with per-request parameters, returning the resolved anchor too.
    pub fn recommend_with_anchor(
        &self,
        query: &str,
        params: &RecommendParams,
    ) -> Result<(Option<Anchor>, Vec<RecommendationResult>), RecommendError> {
        recommend_with_anchor(&self.store, query, params)
    }

    pub fn resolve_anchor(
        &self,
        query: &str,
        params: &RecommendParams,
    ) -> Result<Option<Anchor>, RecommendError> {
        resolve_anchor(&self.store, query, params)
    }
}

/// Resolve `query` to an anchor row.
///
/// Fuzzy mode returns `Ok(None)` for an empty catalog or when the best
/// confidence is below `min_match_confidence`. Exact mode fails with
/// [`RecommendError::UnknownExactName`] if no row carries the name.
pub fn resolve_anchor<S: CatalogStore + ?Sized>(
    store: &S,
    query: &str,
    params: &RecommendParams,
) -> Result<Option<Anchor>, RecommendError> {
    if !params.use_fuzzy_match {
        let index = store
            .index_of_exact_name(query)
            .ok_or_else(|| RecommendError::UnknownExactName(query.to_string()))?;
        return Ok(Some(Anchor {
            index,
            name: query.to_string(),
            confidence: 100.0,
        }));
    }

    let Some(best) = fuzzy::best_match(query, store.names()) else {
        debug!("empty catalog, no anchor for {:?}", query);
        return Ok(None);
    };

    if best.confidence < f64::from(params.min_match_confidence) {
        debug!(
            confidence = best.confidence,
            threshold = params.min_match_confidence,
            "no confident match for {:?}",
            query
        );
        return Ok(None);
    }

    let Some(entry) = store.entry_at(best.index) else {
        return Ok(None);
    };
    // Duplicate names resolve to their first row.
    let index = store.index_of_exact_name(&entry.name).unwrap_or(best.index);

    Ok(Some(Anchor {
        index,
        name: entry.name.clone(),
        confidence: best.confidence,
    }))
}

/// Order scores descending; NaN sorts last.
fn by_score_desc(a: f64, b: f64) -> Ordering {
    let key = |x: f64| if x.is_nan() { f64::NEG_INFINITY } else { x };
    key(b).total_cmp(&key(a))
}

/// Top `top_n` `(index, score)` pairs of a similarity row.
///
/// Stable: equal scores keep column order.
pub fn rank_row(
    row: &[f64],
    anchor: usize,
    top_n: usize,
    include_anchor: bool,
) -> Vec<(usize, f64)> {
    let mut scored: Vec<(usize, f64)> = row
        .iter()
        .copied()
        .enumerate()
        .filter(|(i, _)| include_anchor || *i != anchor)
        .collect();
    scored.sort_by(|a, b| by_score_desc(a.1, b.1));
    scored.truncate(top_n);
    scored
}

/// Run a recommendation against a [`CatalogStore`].
///
/// An empty vector means "no confident match"; it is not an error.
pub fn recommend<S: CatalogStore + ?Sized>(
    store: &S,
    query: &str,
    params: &RecommendParams,
) -> Result<Vec<RecommendationResult>, RecommendError> {
    recommend_with_anchor(store, query, params).map(|(_, results)| results)
}

/// Like [`recommend`], also returning the anchor the query resolved to.
///
/// The query is resolved once; `None` means no confident match.
pub fn recommend_with_anchor<S: CatalogStore + ?Sized>(
    store: &S,
    query: &str,
    params: &RecommendParams,
) -> Result<(Option<Anchor>, Vec<RecommendationResult>), RecommendError> {
    params.validate()?;

    let Some(anchor) = resolve_anchor(store, query, params)? else {
        return Ok((None, Vec::new()));
    };

    let Some(row) = store.similarity_row(anchor.index) else {
        return Ok((Some(anchor), Vec::new()));
    };

    debug!(
        anchor = anchor.index,
        confidence = anchor.confidence,
        "ranking similarity row for {:?}",
        anchor.name
    );

    let display = |s: &str| {
        if params.sanitize_display {
            sanitize_display(s)
        } else {
            s.to_string()
        }
    };

    let mut results: Vec<RecommendationResult> =
        rank_row(row, anchor.index, params.top_n, params.include_anchor)
            .into_iter()
            .filter_map(|(idx, similarity)| {
                let entry = store.entry_at(idx)?;
                let rating = normalize_rating(&entry.rating);
                Some(RecommendationResult {
                    course_name: display(&entry.name),
                    course_url: entry.url.clone(),
                    rating: entry.rating.clone(),
                    institution: display(&entry.institution),
                    difficulty_level: display(&entry.difficulty),
                    similarity,
                    final_score: blend_score(similarity, rating, params.rating_weight),
                })
            })
            .collect();

    results.sort_by(|a, b| by_score_desc(a.final_score, b.final_score));

    Ok((Some(anchor), results))
}
