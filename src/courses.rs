//! Catalog listing for `recs courses` and `GET /courses`.

use anyhow::Result;
use course_recs_core::CatalogStore;

use crate::config::Config;
use crate::loader;

/// Course names in catalog order, optionally truncated.
pub fn course_names<S: CatalogStore + ?Sized>(store: &S, limit: Option<usize>) -> Vec<String> {
    let names = store.names();
    let take = limit.unwrap_or(names.len());
    names.into_iter().take(take).map(str::to_string).collect()
}

pub fn run_courses(config: &Config, limit: Option<usize>) -> Result<()> {
    let (catalog, _) = loader::load_catalog(&config.data)?;
    let total = catalog.len();

    println!("{:<6} {:<56} {:<8} INSTITUTION", "ROW", "COURSE", "RATING");
    for (i, name) in course_names(&catalog, limit).iter().enumerate() {
        let Some(entry) = catalog.entry_at(i) else {
            continue;
        };
        println!(
            "{:<6} {:<56} {:<8} {}",
            i,
            truncate(name, 56),
            if entry.rating.is_empty() { "-" } else { entry.rating.as_str() },
            entry.institution
        );
    }

    if let Some(n) = limit {
        if n < total {
            println!("... {} more", total - n);
        }
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
        out.push_str("...");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_recs_core::{CatalogEntry, InMemoryCatalog, SimilarityMatrix};

    #[test]
    fn test_course_names_limit() {
        let catalog = InMemoryCatalog::new(
            vec![CatalogEntry::named("A"), CatalogEntry::named("B")],
            SimilarityMatrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap(),
        )
        .unwrap();
        assert_eq!(course_names(&catalog, None), vec!["A", "B"]);
        assert_eq!(course_names(&catalog, Some(1)), vec!["A"]);
        assert_eq!(course_names(&catalog, Some(10)).len(), 2);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
    }
}
