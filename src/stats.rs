//! Data health overview.
//!
//! Loads the catalog and matrix exactly as the server would and prints a
//! summary: file sizes, row counts, dropped duplicates, unparsable ratings,
//! and a per-difficulty breakdown. Used by `recs check` to verify the data
//! files before starting the server.

use anyhow::Result;
use std::collections::BTreeMap;

use crate::config::Config;
use crate::loader;

/// Run the check command: load the data and print a summary.
pub fn run_check(config: &Config) -> Result<()> {
    let (catalog, stats) = loader::load_catalog(&config.data)?;

    let file_size = |p: &std::path::Path| std::fs::metadata(p).map(|m| m.len()).unwrap_or(0);

    println!("Course Recs: Data Check");
    println!("=======================");
    println!();
    println!(
        "  Catalog:     {} ({})",
        config.data.catalog_path.display(),
        format_bytes(file_size(&config.data.catalog_path))
    );
    println!(
        "  Matrix:      {} ({})",
        config.data.matrix_path.display(),
        format_bytes(file_size(&config.data.matrix_path))
    );
    println!();
    println!("  Rows read:   {}", stats.raw_rows);
    println!("  Duplicates:  {}", stats.duplicates_dropped);
    println!("  Courses:     {}", catalog.entries().len());
    println!(
        "  Matrix:      {} x {}",
        catalog.matrix().len(),
        catalog.matrix().len()
    );
    println!("  No rating:   {}", stats.unparsable_ratings);

    let mut by_difficulty: BTreeMap<&str, usize> = BTreeMap::new();
    for e in catalog.entries() {
        *by_difficulty.entry(e.difficulty.as_str()).or_default() += 1;
    }

    if !by_difficulty.is_empty() {
        println!();
        println!("  By difficulty:");
        println!("  {:<24} {:>8}", "DIFFICULTY", "COURSES");
        println!("  {}", "-".repeat(33));
        for (difficulty, count) in &by_difficulty {
            println!("  {:<24} {:>8}", difficulty, count);
        }
    }

    println!();
    println!("ok");
    Ok(())
}

/// Format a byte count as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
