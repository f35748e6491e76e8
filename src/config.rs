//! Configuration parsing and validation.
//!
//! Course Recs is configured via a TOML file (default `config/recs.toml`).
//! Only `[data]` is required; `[recommend]` and `[server]` fall back to
//! their defaults.
//!
//! ```toml
//! [data]
//! catalog_path = "data/coursera.csv"
//! matrix_path = "models/similarity_matrix.json"
//!
//! [recommend]
//! top_n = 6
//! min_match_confidence = 90
//! rating_weight = 0.05
//!
//! [server]
//! bind = "127.0.0.1:5000"
//! ```
//!
//! Relative data paths are resolved against the directory holding the
//! config file.

use anyhow::{bail, Context, Result};
use course_recs_core::engine::{
    RecommendParams, DEFAULT_MIN_MATCH_CONFIDENCE, DEFAULT_RATING_WEIGHT, DEFAULT_TOP_N,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub recommend: RecommendConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Course catalog CSV.
    pub catalog_path: PathBuf,
    /// Similarity matrix, `.json` (array of arrays) or `.csv` (headerless floats).
    pub matrix_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecommendConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_min_match_confidence")]
    pub min_match_confidence: u32,
    #[serde(default = "default_rating_weight")]
    pub rating_weight: f64,
    #[serde(default = "default_true")]
    pub use_fuzzy_match: bool,
    #[serde(default = "default_true")]
    pub sanitize_display: bool,
    #[serde(default = "default_true")]
    pub include_anchor: bool,
}

impl Default for RecommendConfig {
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

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}
fn default_min_match_confidence() -> u32 {
    DEFAULT_MIN_MATCH_CONFIDENCE
}
fn default_rating_weight() -> f64 {
    DEFAULT_RATING_WEIGHT
}
fn default_true() -> bool {
    true
}

impl RecommendConfig {
    pub fn params(&self) -> RecommendParams {
        RecommendParams {
            top_n: self.top_n,
            min_match_confidence: self.min_match_confidence,
            rating_weight: self.rating_weight,
            use_fuzzy_match: self.use_fuzzy_match,
            sanitize_display: self.sanitize_display,
            include_anchor: self.include_anchor,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    config.data.catalog_path = resolve(base, &config.data.catalog_path);
    config.data.matrix_path = resolve(base, &config.data.matrix_path);

    if config.recommend.top_n < 1 {
        bail!("recommend.top_n must be >= 1");
    }

    if config.recommend.min_match_confidence > 100 {
        bail!("recommend.min_match_confidence must be in [0, 100]");
    }

    if !(0.0..=1.0).contains(&config.recommend.rating_weight) {
        bail!("recommend.rating_weight must be in [0.0, 1.0]");
    }

    if config.server.bind.trim().is_empty() {
        bail!("server.bind must not be empty");
    }

    Ok(config)
}

fn resolve(base: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}
