//! Catalog and similarity matrix loading.
//!
//! Turns the two data files named in `[data]` into an immutable
//! [`InMemoryCatalog`]. Loading happens once at startup; any structural
//! problem (missing file, unparsable matrix, empty dataset, size
//! mismatch) is fatal and reported with the offending path.
//!
//! # Cleaning
//!
//! 1. Columns are located by header name, so column order does not matter.
//!    `Course Name` is required; every other column is optional.
//! 2. Non-ASCII characters are stripped from headers and every field.
//! 3. Rows identical across all six fields are dropped (first kept), and
//!    the matching rows and columns are dropped from the matrix so row `i`
//!    keeps referring to entry `i`.

use anyhow::{bail, Context, Result};
use course_recs_core::{CatalogEntry, InMemoryCatalog, RecommendError, SimilarityMatrix};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

use crate::config::DataConfig;

pub const COL_NAME: &str = "Course Name";
pub const COL_INSTITUTION: &str = "University";
pub const COL_DIFFICULTY: &str = "Difficulty Level";
pub const COL_RATING: &str = "Course Rating";
pub const COL_URL: &str = "Course URL";
pub const COL_DESCRIPTION: &str = "Course Description";

const UNKNOWN: &str = "Unknown";

/// Counts gathered while loading, for `recs check`.
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    pub raw_rows: usize,
    pub duplicates_dropped: usize,
    pub unparsable_ratings: usize,
}

/// Load and clean the catalog and matrix named in `data`.
pub fn load_catalog(data: &DataConfig) -> Result<(InMemoryCatalog, LoadStats)> {
    let raw = read_entries(&data.catalog_path)?;
    if raw.is_empty() {
        return Err(RecommendError::EmptyCatalog).with_context(|| {
            format!(
                "Catalog is empty: {} contains no course rows",
                data.catalog_path.display()
            )
        });
    }

    let matrix = read_matrix(&data.matrix_path)?;
    if matrix.len() != raw.len() {
        bail!(
            "Similarity matrix {} has {} rows but catalog {} has {} rows",
            data.matrix_path.display(),
            matrix.len(),
            data.catalog_path.display(),
            raw.len()
        );
    }

    let raw_rows = raw.len();
    let (entries, keep) = dedup_entries(raw);
    let matrix = if keep.len() == raw_rows {
        matrix
    } else {
        matrix.select(&keep)
    };

    let stats = LoadStats {
        raw_rows,
        duplicates_dropped: raw_rows - entries.len(),
        unparsable_ratings: entries
            .iter()
            .filter(|e| e.rating.trim().parse::<f64>().map_or(true, |v| !v.is_finite()))
            .count(),
    };

    let catalog = InMemoryCatalog::new(entries, matrix)
        .context("Catalog and similarity matrix are misaligned")?;

    info!(
        courses = catalog.entries().len(),
        duplicates = stats.duplicates_dropped,
        "catalog loaded"
    );

    Ok((catalog, stats))
}

fn strip_non_ascii(s: &str) -> String {
    s.chars().filter(char::is_ascii).collect()
}

/// Read the catalog CSV into entries, one per data row, in file order.
pub fn read_entries(path: &Path) -> Result<Vec<CatalogEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open catalog: {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("Failed to read catalog header: {}", path.display()))?
        .iter()
        .map(|h| strip_non_ascii(h).trim().to_string())
        .collect();

    let column = |name: &str| headers.iter().position(|h| h == name);
    let Some(name_col) = column(COL_NAME) else {
        bail!(
            "Catalog {} is missing required column '{}'",
            path.display(),
            COL_NAME
        );
    };
    let institution_col = column(COL_INSTITUTION);
    let difficulty_col = column(COL_DIFFICULTY);
    let rating_col = column(COL_RATING);
    let url_col = column(COL_URL);
    let description_col = column(COL_DESCRIPTION);

    let mut entries = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| {
            format!("Failed to parse catalog row {} in {}", line + 1, path.display())
        })?;

        let field = |col: Option<usize>| -> Option<String> {
            col.and_then(|c| record.get(c)).map(strip_non_ascii)
        };
        let or_unknown = |v: Option<String>| match v {
            Some(s) if !s.trim().is_empty() => s,
            _ => UNKNOWN.to_string(),
        };

        entries.push(CatalogEntry {
            name: field(Some(name_col)).unwrap_or_default(),
            institution: or_unknown(field(institution_col)),
            difficulty: or_unknown(field(difficulty_col)),
            rating: field(rating_col).unwrap_or_default(),
            url: field(url_col).unwrap_or_default(),
            description: field(description_col).unwrap_or_default(),
        });
    }

    debug!(rows = entries.len(), "read catalog {}", path.display());
    Ok(entries)
}

/// Read a similarity matrix, choosing the format by file extension.
pub fn read_matrix(path: &Path) -> Result<SimilarityMatrix> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let rows: Vec<Vec<f64>> = match ext.as_deref() {
        Some("json") => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open similarity matrix: {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file)).with_context(|| {
                format!("Failed to parse similarity matrix: {}", path.display())
            })?
        }
        Some("csv") => read_matrix_csv(path)?,
        _ => bail!(
            "Unsupported similarity matrix format: {} (expected .json or .csv)",
            path.display()
        ),
    };

    SimilarityMatrix::from_rows(rows)
        .with_context(|| format!("Invalid similarity matrix: {}", path.display()))
}

fn read_matrix_csv(path: &Path) -> Result<Vec<Vec<f64>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open similarity matrix: {}", path.display()))?;

    let mut rows = Vec::new();
    for (r, record) in reader.records().enumerate() {
        let record = record
            .with_context(|| format!("Failed to read matrix row {} in {}", r, path.display()))?;
        let row = record
            .iter()
            .enumerate()
            .map(|(c, v)| {
                v.parse::<f64>().with_context(|| {
                    format!("Non-numeric matrix value '{}' at row {}, column {}", v, r, c)
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }
    Ok(rows)
}

/// Drop exact duplicate entries, returning survivors and their original indices.
fn dedup_entries(raw: Vec<CatalogEntry>) -> (Vec<CatalogEntry>, Vec<usize>) {
    let mut seen: HashSet<CatalogEntry> = HashSet::with_capacity(raw.len());
    let mut keep = Vec::with_capacity(raw.len());
    let mut entries = Vec::with_capacity(raw.len());

    for (i, entry) in raw.into_iter().enumerate() {
        if seen.insert(entry.clone()) {
            keep.push(i);
            entries.push(entry);
        }
    }

    (entries, keep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_recs_core::CatalogStore;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const HEADER: &str =
        "Course Name,University,Difficulty Level,Course Rating,Course URL,Course Description\n";

    fn write(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let p = dir.path().join(name);
        fs::write(&p, body).unwrap();
        p
    }

    fn data_config(catalog: PathBuf, matrix: PathBuf) -> DataConfig {
        DataConfig {
            catalog_path: catalog,
            matrix_path: matrix,
        }
    }

    #[test]
    fn test_load_json_matrix() {
        let tmp = TempDir::new().unwrap();
        let catalog = write(
            &tmp,
            "c.csv",
            &format!(
                "{}Rust Basics,Ferris U,Beginner,4.8,https://x/rust,Learn Rust\n\
                 Go Basics,Gopher U,Intermediate,Not Calibrated,https://x/go,Learn Go\n",
                HEADER
            ),
        );
        let matrix = write(&tmp, "m.json", "[[1.0, 0.3], [0.3, 1.0]]");

        let (cat, stats) = load_catalog(&data_config(catalog, matrix)).unwrap();
        assert_eq!(cat.len(), 2);
        assert_eq!(stats.raw_rows, 2);
        assert_eq!(stats.duplicates_dropped, 0);
        assert_eq!(stats.unparsable_ratings, 1);
        assert_eq!(cat.entry_at(1).unwrap().rating, "Not Calibrated");
        assert_eq!(cat.similarity_row(0), Some(&[1.0, 0.3][..]));
    }

    #[test]
    fn test_load_csv_matrix() {
        let tmp = TempDir::new().unwrap();
        let catalog = write(&tmp, "c.csv", &format!("{}A,U,Beginner,4,u,d\n", HEADER));
        let matrix = write(&tmp, "m.csv", " 1.0 \n");
        let (cat, _) = load_catalog(&data_config(catalog, matrix)).unwrap();
        assert_eq!(cat.similarity_row(0), Some(&[1.0][..]));
    }

    #[test]
    fn test_duplicates_dropped_with_matrix_alignment() {
        let tmp = TempDir::new().unwrap();
        let catalog = write(
            &tmp,
            "c.csv",
            &format!(
                "{}A,U,Beginner,4,u,d\nA,U,Beginner,4,u,d\nB,U,Beginner,3,u,d\n",
                HEADER
            ),
        );
        let matrix = write(
            &tmp,
            "m.json",
            "[[1.0, 1.0, 0.2], [1.0, 1.0, 0.2], [0.2, 0.2, 1.0]]",
        );
        let (cat, stats) = load_catalog(&data_config(catalog, matrix)).unwrap();
        assert_eq!(stats.duplicates_dropped, 1);
        assert_eq!(cat.names(), vec!["A", "B"]);
        assert_eq!(cat.similarity_row(1), Some(&[0.2, 1.0][..]));
    }

    #[test]
    fn test_non_ascii_stripped_and_missing_columns_default() {
        let tmp = TempDir::new().unwrap();
        let catalog = write(
            &tmp,
            "c.csv",
            "\u{feff}Course Name,Course Rating\nCaf\u{e9} Culture\u{2122},4.2\n",
        );
        let matrix = write(&tmp, "m.json", "[[1.0]]");
        let (cat, _) = load_catalog(&data_config(catalog, matrix)).unwrap();
        let e = cat.entry_at(0).unwrap();
        assert_eq!(e.name, "Caf Culture");
        assert_eq!(e.institution, "Unknown");
        assert_eq!(e.difficulty, "Unknown");
        assert_eq!(e.url, "");
        assert_eq!(e.rating, "4.2");
    }

    #[test]
    fn test_short_rows_default_missing_fields() {
        let tmp = TempDir::new().unwrap();
        let catalog = write(&tmp, "c.csv", &format!("{}Only Name\n", HEADER));
        let matrix = write(&tmp, "m.json", "[[1.0]]");
        let (cat, _) = load_catalog(&data_config(catalog, matrix)).unwrap();
        let e = cat.entry_at(0).unwrap();
        assert_eq!(e.name, "Only Name");
        assert_eq!(e.institution, "Unknown");
        assert_eq!(e.rating, "");
    }

    #[test]
    fn test_missing_name_column_fails() {
        let tmp = TempDir::new().unwrap();
        let catalog = write(&tmp, "c.csv", "Title,University\nX,Y\n");
        let matrix = write(&tmp, "m.json", "[[1.0]]");
        let err = load_catalog(&data_config(catalog, matrix)).unwrap_err();
        assert!(err.to_string().contains("Course Name"));
    }

    #[test]
    fn test_empty_catalog_fails() {
        let tmp = TempDir::new().unwrap();
        let catalog = write(&tmp, "c.csv", HEADER);
        let matrix = write(&tmp, "m.json", "[]");
        let err = load_catalog(&data_config(catalog, matrix)).unwrap_err();
        assert!(err.to_string().contains("empty"));
        assert!(matches!(
            err.downcast_ref::<RecommendError>(),
            Some(RecommendError::EmptyCatalog)
        ));
    }

    #[test]
    fn test_dimension_mismatch_fails() {
        let tmp = TempDir::new().unwrap();
        let catalog = write(&tmp, "c.csv", &format!("{}A,U,B,4,u,d\nB,U,B,4,u,d\n", HEADER));
        let matrix = write(&tmp, "m.json", "[[1.0]]");
        let err = load_catalog(&data_config(catalog, matrix)).unwrap_err();
        assert!(err.to_string().contains("1 rows"));
    }

    #[test]
    fn test_missing_files_fail() {
        let tmp = TempDir::new().unwrap();
        let err = load_catalog(&data_config(
            tmp.path().join("nope.csv"),
            tmp.path().join("nope.json"),
        ))
        .unwrap_err();
        assert!(err.to_string().contains("Failed to open catalog"));
    }

    #[test]
    fn test_corrupt_matrix_fails() {
        let tmp = TempDir::new().unwrap();
        let catalog = write(&tmp, "c.csv", &format!("{}A,U,B,4,u,d\n", HEADER));
        let matrix = write(&tmp, "m.json", "{not json");
        assert!(load_catalog(&data_config(catalog, matrix)).is_err());

        let matrix = write(&tmp, "m.pkl", "binary");
        let err = load_catalog(&data_config(
            tmp.path().join("c.csv"),
            matrix,
        ))
        .unwrap_err();
        assert!(err.to_string().contains("Unsupported"));
    }

    #[test]
    fn test_ragged_matrix_fails() {
        let tmp = TempDir::new().unwrap();
        let catalog = write(&tmp, "c.csv", &format!("{}A,U,B,4,u,d\nB,U,B,4,u,d\n", HEADER));
        let matrix = write(&tmp, "m.csv", "1.0,0.5\n0.5\n");
        let err = load_catalog(&data_config(catalog, matrix)).unwrap_err();
        assert!(format!("{:#}", err).contains("not square"));
    }
}
