//! Fuzzy matching of free-text queries against catalog names.
//!
//! Scoring is a token-sort ratio: both strings are lowercased, every
//! non-alphanumeric character becomes a separator, the resulting tokens
//! are sorted and re-joined, and the normalized Levenshtein similarity of
//! the two canonical forms is scaled to `[0, 100]`. This makes the score
//! insensitive to case, punctuation, and word order.
//!
//! A candidate equal to the query (byte-for-byte, or after trimming and
//! lowercasing) is taken at confidence 100 before any scoring, so names
//! that only differ in punctuation, or have no tokens at all, still
//! resolve to their own row.

use strsim::normalized_levenshtein;

/// Best candidate found for a query.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    /// Row index of the candidate.
    pub index: usize,
    /// Confidence in `[0, 100]`.
    pub confidence: f64,
}

/// Canonical token-sorted form used for comparison.
pub fn canonical_tokens(text: &str) -> String {
    let lower = text.to_lowercase();
    let mut tokens: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Token-sort ratio between two strings, in `[0, 100]`.
///
/// Returns 0 when either side has no tokens at all.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    let a = canonical_tokens(a);
    let b = canonical_tokens(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    normalized_levenshtein(&a, &b) * 100.0
}

fn fold(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Highest-confidence candidate for `query`, or `None` if there are no candidates.
///
/// An exact name wins outright: a byte-for-byte equal candidate first, then
/// one equal after trimming and lowercasing. Otherwise the token-sort
/// ratio decides. Ties keep the earliest candidate, so duplicate names
/// resolve to their first row.
pub fn best_match<'a, I>(query: &str, candidates: I) -> Option<FuzzyMatch>
where
    I: IntoIterator<Item = &'a str>,
{
    let candidates: Vec<&str> = candidates.into_iter().collect();
    if candidates.is_empty() {
        return None;
    }

    let folded = fold(query);
    let exact = candidates
        .iter()
        .position(|name| *name == query)
        .or_else(|| candidates.iter().position(|name| fold(name) == folded));
    if let Some(index) = exact {
        return Some(FuzzyMatch {
            index,
            confidence: 100.0,
        });
    }

    let query = canonical_tokens(query);
    let mut best: Option<FuzzyMatch> = None;

    for (index, name) in candidates.into_iter().enumerate() {
        let name = canonical_tokens(name);
        let confidence = if query.is_empty() || name.is_empty() {
            0.0
        } else {
            normalized_levenshtein(&query, &name) * 100.0
        };
        if best.as_ref().map_or(true, |b| confidence > b.confidence) {
            best = Some(FuzzyMatch { index, confidence });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_tokens() {
        assert_eq!(
            canonical_tokens("Python for Everybody: Part 2!"),
            "2 everybody for part python"
        );
        assert_eq!(canonical_tokens("  --  "), "");
    }

    #[test]
    fn test_ratio_ignores_case_punctuation_and_order() {
        assert!((token_sort_ratio("Machine Learning", "machine learning!") - 100.0).abs() < 1e-9);
        assert!((token_sort_ratio("Learning, Machine", "Machine Learning") - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_ratio_bounds() {
        let score = token_sort_ratio("Data Science Foundations", "Cooking for Beginners");
        assert!((0.0..=100.0).contains(&score));
        assert!(score < 90.0);
        assert_eq!(token_sort_ratio("", "anything"), 0.0);
    }

    #[test]
    fn test_best_match_picks_highest() {
        let names = ["Financial Markets", "Machine Learning", "Machine Learning Specialization"];
        let m = best_match("machine learnin", names).unwrap();
        assert_eq!(m.index, 1);
        assert!(m.confidence > 90.0);
    }

    #[test]
    fn test_best_match_tie_keeps_first() {
        let names = ["Intro to Rust", "intro to rust", "Other"];
        let m = best_match("Intro to Rust", names).unwrap();
        assert_eq!(m.index, 0);
        assert!((m.confidence - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_best_match_empty_candidates() {
        assert!(best_match("anything", std::iter::empty()).is_none());
    }

    #[test]
    fn test_exact_name_beats_punctuation_collision() {
        let names = ["C++ Programming", "C# Programming"];
        assert_eq!(best_match("C# Programming", names).unwrap().index, 1);
        assert_eq!(best_match("c# programming ", names).unwrap().index, 1);
        assert_eq!(best_match("C++ Programming", names).unwrap().index, 0);
    }

    #[test]
    fn test_tokenless_name_matches_itself() {
        let names = ["Other", "!!!"];
        let m = best_match("!!!", names).unwrap();
        assert_eq!(m.index, 1);
        assert!((m.confidence - 100.0).abs() < 1e-9);
        assert_eq!(best_match("???", names).unwrap().confidence, 0.0);
    }

    #[test]
    fn test_nonsense_query_low_confidence() {
        let names = ["Machine Learning", "Financial Markets", "The Science of Well-Being"];
        let m = best_match("zzz_nonexistent_xyz", names).unwrap();
        assert!(m.confidence < 90.0);
    }
}
