//! Evaluation dataset resolution and loading.
//!
//! A dataset reference is resolved in a fixed order: a known benchmark name
//! is fetched from the HuggingFace Hub, an existing directory is read from
//! disk, and anything else is rejected. On-disk datasets come in two
//! layouts:
//!
//! - `sources.txt` + `corrections.txt`: newline-delimited sentence pairs,
//!   index-aligned, equal line counts;
//! - `data.csv`: one record per pair with `source` and `correction`
//!   columns and no missing values.
//!
//! When both layouts are present the text pair takes precedence.

pub mod benchmark;

use std::fs;
use std::path::Path;

use crate::error::{CorrigoError, Result};

/// A labeled evaluation set: noisy sources paired with corrected references.
///
/// The two sequences are index-aligned and always of equal length; the
/// constructor rejects mismatched inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationDataset {
    sources: Vec<String>,
    corrections: Vec<String>,
}

impl EvaluationDataset {
    /// Create a dataset from parallel source and correction sequences.
    ///
    /// # Errors
    ///
    /// Returns a dataset format error when the sequences have different
    /// lengths.
    pub fn new(sources: Vec<String>, corrections: Vec<String>) -> Result<Self> {
        if sources.len() != corrections.len() {
            return Err(CorrigoError::dataset_format(format!(
                "sources and corrections must have the same length, but got {} vs {}",
                sources.len(),
                corrections.len()
            )));
        }
        Ok(EvaluationDataset {
            sources,
            corrections,
        })
    }

    /// The noisy input sentences.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// The reference corrections, index-aligned with [`sources`](Self::sources).
    pub fn corrections(&self) -> &[String] {
        &self.corrections
    }

    /// Number of sentence pairs.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the dataset holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Keep only the first `limit` pairs.
    ///
    /// Both sequences are cut together so they stay index-aligned. A limit
    /// beyond the current length leaves the dataset unchanged.
    pub fn truncate(&mut self, limit: usize) {
        self.sources.truncate(limit);
        self.corrections.truncate(limit);
    }

    /// Consume the dataset into its `(sources, corrections)` parts.
    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.sources, self.corrections)
    }
}

/// Resolve a dataset reference into a loaded dataset.
///
/// `reference` is tried as a known benchmark name first (see
/// [`benchmark::SpellcheckBenchmark`]), then as a directory path. `split`
/// selects the benchmark split and is ignored for on-disk datasets.
///
/// # Errors
///
/// - Dataset reference error when `reference` is neither a benchmark name
///   nor a directory.
/// - Dataset format error when a directory exists but its contents do not
///   match either supported layout.
///
/// # Examples
///
/// ```no_run
/// use corrigo::dataset;
///
/// # fn example() -> corrigo::error::Result<()> {
/// let ds = dataset::resolve("RUSpellRU", "test")?;
/// println!("{} pairs", ds.len());
///
/// let ds = dataset::resolve("/data/my_typos", "test")?;
/// # Ok(())
/// # }
/// ```
pub fn resolve(reference: &str, split: &str) -> Result<EvaluationDataset> {
    if let Some(bench) = benchmark::SpellcheckBenchmark::from_name(reference) {
        return benchmark::load(bench, split);
    }

    let path = Path::new(reference);
    if path.is_dir() {
        return load_dir(path);
    }

    Err(CorrigoError::dataset_reference(format!(
        "'{}' is neither a known benchmark nor a dataset directory",
        reference
    )))
}

/// Load a dataset from a directory in one of the two supported layouts.
fn load_dir(dir: &Path) -> Result<EvaluationDataset> {
    let sources_path = dir.join("sources.txt");
    let corrections_path = dir.join("corrections.txt");
    if sources_path.is_file() && corrections_path.is_file() {
        return read_text_pair(&sources_path, &corrections_path, dir);
    }

    let csv_path = dir.join("data.csv");
    if csv_path.is_file() {
        return read_csv_dataset(&csv_path);
    }

    Err(CorrigoError::dataset_format(format!(
        "'{}' must contain either sources.txt/corrections.txt or data.csv",
        dir.display()
    )))
}

/// Read the `sources.txt`/`corrections.txt` layout.
///
/// Lines are paired by index; a trailing newline does not produce an empty
/// trailing record.
fn read_text_pair(
    sources_path: &Path,
    corrections_path: &Path,
    dir: &Path,
) -> Result<EvaluationDataset> {
    let sources: Vec<String> = fs::read_to_string(sources_path)?
        .lines()
        .map(str::to_string)
        .collect();
    let corrections: Vec<String> = fs::read_to_string(corrections_path)?
        .lines()
        .map(str::to_string)
        .collect();

    if sources.len() != corrections.len() {
        return Err(CorrigoError::dataset_format(format!(
            "sources.txt and corrections.txt must have the same number of lines, \
             but got {} vs {} in '{}'",
            sources.len(),
            corrections.len(),
            dir.display()
        )));
    }

    EvaluationDataset::new(sources, corrections)
}

/// Read the `data.csv` layout.
///
/// Requires `source` and `correction` header columns; every record must
/// carry a non-empty value in both. Shared with the benchmark loader, which
/// downloads split files in the same format.
pub(crate) fn read_csv_dataset(path: &Path) -> Result<EvaluationDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| {
            CorrigoError::dataset_format(format!("Failed to open '{}': {}", path.display(), e))
        })?;

    let headers = reader
        .headers()
        .map_err(|e| {
            CorrigoError::dataset_format(format!(
                "Failed to read CSV headers from '{}': {}",
                path.display(),
                e
            ))
        })?
        .clone();

    let source_idx = headers.iter().position(|h| h == "source").ok_or_else(|| {
        CorrigoError::dataset_format(format!(
            "'{}' must provide a 'source' column",
            path.display()
        ))
    })?;
    let correction_idx = headers
        .iter()
        .position(|h| h == "correction")
        .ok_or_else(|| {
            CorrigoError::dataset_format(format!(
                "'{}' must provide a 'correction' column",
                path.display()
            ))
        })?;

    let mut sources = Vec::new();
    let mut corrections = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            CorrigoError::dataset_format(format!(
                "Failed to parse record {} in '{}': {}",
                index + 1,
                path.display(),
                e
            ))
        })?;

        let source = record.get(source_idx).unwrap_or("");
        let correction = record.get(correction_idx).unwrap_or("");
        if source.is_empty() || correction.is_empty() {
            return Err(CorrigoError::dataset_format(format!(
                "'{}' contains missing values (record {})",
                path.display(),
                index + 1
            )));
        }

        sources.push(source.to_string());
        corrections.push(correction.to_string());
    }

    EvaluationDataset::new(sources, corrections)
}
