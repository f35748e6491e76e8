//! # Course Recs CLI (`recs`)
//!
//! The `recs` binary loads a course catalog and its similarity matrix and
//! serves recommendations from the terminal or over HTTP.
//!
//! ## Usage
//!
//! ```bash
//! recs --config ./config/recs.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `recs recommend "<name>"` | Recommend courses similar to a (fuzzy) course name |
//! | `recs courses` | List catalog course names |
//! | `recs check` | Load and validate the data files, print a summary |
//! | `recs serve` | Start the JSON HTTP server |
//!
//! ## Examples
//!
//! ```bash
//! # Fuzzy match, default settings
//! recs recommend "python for everybody"
//!
//! # Exact name, three results, without the course itself
//! recs recommend "Python for Everybody" --exact --top-n 3 --exclude-anchor
//!
//! # Machine-readable output
//! recs recommend "data science" --json
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use course_recs::recommend::Overrides;
use course_recs::{config, courses, recommend, server, stats};

/// Course Recs CLI: course recommendations from a precomputed similarity matrix.
#[derive(Parser)]
#[command(
    name = "recs",
    about = "Course Recs: course recommendations from a precomputed similarity matrix",
    version,
    long_about = "Course Recs fuzzy-matches a course name against a catalog, ranks the catalog \
    by precomputed similarity to the matched course, blends in course ratings, and serves the \
    results via a CLI and a JSON HTTP server."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/recs.toml`. Data paths, recommendation
    /// defaults, and the server bind address are read from this file.
    #[arg(long, global = true, default_value = "./config/recs.toml")]
    config: PathBuf,

    /// Enable debug logging on stderr (overridden by `RUST_LOG`).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Recommend courses similar to a course name.
    ///
    /// The name is fuzzy-matched against the catalog unless `--exact` is
    /// given. Prints `No recommendations.` when nothing matches confidently.
    Recommend {
        /// Course name (free text).
        query: String,

        /// Maximum number of results.
        #[arg(long)]
        top_n: Option<usize>,

        /// Minimum fuzzy match confidence (0-100).
        #[arg(long = "min-confidence")]
        min_confidence: Option<u32>,

        /// Weight of the normalized rating in the final score (0.0-1.0).
        #[arg(long)]
        rating_weight: Option<f64>,

        /// Require an exact catalog name; unknown names are an error.
        #[arg(long)]
        exact: bool,

        /// Do not sanitize course name, institution, and difficulty.
        #[arg(long)]
        raw: bool,

        /// Leave the matched course itself out of the results.
        #[arg(long)]
        exclude_anchor: bool,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// List catalog course names in row order.
    Courses {
        /// Maximum number of courses to list.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Load and validate the catalog and similarity matrix.
    Check,

    /// Start the JSON HTTP server.
    ///
    /// Binds to the address configured in `[server].bind`.
    Serve,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Recommend {
            query,
            top_n,
            min_confidence,
            rating_weight,
            exact,
            raw,
            exclude_anchor,
            json,
        } => {
            let overrides = Overrides {
                top_n,
                min_match_confidence: min_confidence,
                rating_weight,
                exact,
                raw,
                exclude_anchor,
            };
            recommend::run_recommend(&cfg, &query, &overrides, json)?;
        }
        Commands::Courses { limit } => {
            courses::run_courses(&cfg, limit)?;
        }
        Commands::Check => {
            stats::run_check(&cfg)?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
