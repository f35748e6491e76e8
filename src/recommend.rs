//! Recommendation entry points for the CLI and HTTP server.
//!
//! The ranking algorithm itself (fuzzy match, similarity ranking, rating
//! blend, sanitization) lives in `course-recs-core::engine`. This module
//! merges per-request overrides onto the configured defaults and formats
//! results for the terminal.

use anyhow::Result;
use course_recs_core::engine::{Anchor, RecommendParams};
use course_recs_core::{CatalogStore, RecommendationResult, Recommender};
use serde::Serialize;

use crate::config::Config;
use crate::loader;

/// Per-request adjustments on top of the configured [`RecommendParams`].
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub top_n: Option<usize>,
    pub min_match_confidence: Option<u32>,
    pub rating_weight: Option<f64>,
    /// Require an exact catalog name instead of fuzzy matching.
    pub exact: bool,
    /// Skip display sanitization.
    pub raw: bool,
    /// Leave the matched course itself out of the results.
    pub exclude_anchor: bool,
}

impl Overrides {
    pub fn apply(&self, base: &RecommendParams) -> RecommendParams {
        RecommendParams {
            top_n: self.top_n.unwrap_or(base.top_n),
            min_match_confidence: self
                .min_match_confidence
                .unwrap_or(base.min_match_confidence),
            rating_weight: self.rating_weight.unwrap_or(base.rating_weight),
            use_fuzzy_match: base.use_fuzzy_match && !self.exact,
            sanitize_display: base.sanitize_display && !self.raw,
            include_anchor: base.include_anchor && !self.exclude_anchor,
        }
    }
}

/// Matched anchor plus its ranked recommendations.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendResponse {
    pub matched: Option<MatchedCourse>,
    pub recommendations: Vec<RecommendationResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchedCourse {
    pub course_name: String,
    pub confidence: f64,
}

impl From<Anchor> for MatchedCourse {
    fn from(a: Anchor) -> Self {
        Self {
            course_name: a.name,
            confidence: a.confidence,
        }
    }
}

/// Shared implementation behind `recs recommend` and `POST /recommend`.
pub fn recommend_courses<S: CatalogStore>(
    engine: &Recommender<S>,
    query: &str,
    overrides: &Overrides,
) -> Result<RecommendResponse> {
    let params = overrides.apply(engine.defaults());
    params.validate()?;

    let (matched, recommendations) = engine.recommend_with_anchor(query, &params)?;

    Ok(RecommendResponse {
        matched: matched.map(MatchedCourse::from),
        recommendations,
    })
}

/// CLI entry point: load the catalog, recommend, print to stdout.
pub fn run_recommend(
    config: &Config,
    query: &str,
    overrides: &Overrides,
    json: bool,
) -> Result<()> {
    let (catalog, _) = loader::load_catalog(&config.data)?;
    let engine = Recommender::new(catalog, config.recommend.params());

    let response = recommend_courses(&engine, query, overrides)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let Some(matched) = &response.matched else {
        println!("No recommendations.");
        return Ok(());
    };

    println!(
        "Matched: {} (confidence {:.0})",
        matched.course_name, matched.confidence
    );
    println!();

    for (i, r) in response.recommendations.iter().enumerate() {
        println!("{}. [{:.3}] {}", i + 1, r.final_score, r.course_name);
        println!("    institution: {}", r.institution);
        println!("    difficulty: {}", r.difficulty_level);
        println!("    rating: {}", if r.rating.is_empty() { "-" } else { r.rating.as_str() });
        println!("    similarity: {:.3}", r.similarity);
        if !r.course_url.is_empty() {
            println!("    url: {}", r.course_url);
        }
        println!();
    }

    Ok(())
}
