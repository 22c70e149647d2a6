//! Correction quality metrics.
//!
//! Scoring compares the edits a model made against the edits the reference
//! demands. Both are recovered from a word-level Levenshtein alignment: the
//! gold operations transform the source into the reference, the predicted
//! operations transform the source into the prediction. Precision, recall
//! and F1 are micro-averaged over these operation sets across the whole
//! evaluation set; `exact_match` reports the fraction of predictions that
//! equal their reference after trimming.

use std::cmp::min;
use std::collections::{HashMap, HashSet};

use crate::error::{CorrigoError, Result};

/// A single word-level edit recovered from an alignment.
///
/// `position` indexes into the source token sequence. Insertions apply
/// before the given position, so an insertion at `position == len` appends.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EditOp {
    /// Source token index the edit applies to.
    pub position: usize,
    /// What the edit does at that position.
    pub kind: EditKind,
}

/// The kind of a word-level edit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EditKind {
    /// Replace the source token with the given token.
    Replace(String),
    /// Insert the given token before the source position.
    Insert(String),
    /// Delete the source token.
    Delete,
}

/// Compute the word-level edit operations turning `source` into `target`.
///
/// The alignment is a minimum-edit-distance alignment over whitespace
/// tokens; ties prefer substitutions over insertions and deletions so both
/// sides of a comparison resolve ambiguity the same way.
pub fn edit_operations(source: &str, target: &str) -> Vec<EditOp> {
    let src: Vec<&str> = source.split_whitespace().collect();
    let tgt: Vec<&str> = target.split_whitespace().collect();
    let len1 = src.len();
    let len2 = tgt.len();

    // Distance matrix over token prefixes.
    let mut matrix = vec![vec![0usize; len2 + 1]; len1 + 1];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=len2 {
        matrix[0][j] = j;
    }

    for i in 1..=len1 {
        for j in 1..=len2 {
            let cost = if src[i - 1] == tgt[j - 1] { 0 } else { 1 };
            matrix[i][j] = min(
                min(
                    matrix[i - 1][j] + 1, // deletion
                    matrix[i][j - 1] + 1, // insertion
                ),
                matrix[i - 1][j - 1] + cost, // substitution or match
            );
        }
    }

    // Backtrace from the corner, collecting edits in reverse.
    let mut ops = Vec::new();
    let mut i = len1;
    let mut j = len2;
    while i > 0 || j > 0 {
        if i > 0 && j > 0 {
            let cost = if src[i - 1] == tgt[j - 1] { 0 } else { 1 };
            if matrix[i][j] == matrix[i - 1][j - 1] + cost {
                if cost == 1 {
                    ops.push(EditOp {
                        position: i - 1,
                        kind: EditKind::Replace(tgt[j - 1].to_string()),
                    });
                }
                i -= 1;
                j -= 1;
                continue;
            }
        }
        if i > 0 && matrix[i][j] == matrix[i - 1][j] + 1 {
            ops.push(EditOp {
                position: i - 1,
                kind: EditKind::Delete,
            });
            i -= 1;
            continue;
        }
        // Only insertion remains.
        ops.push(EditOp {
            position: i,
            kind: EditKind::Insert(tgt[j - 1].to_string()),
        });
        j -= 1;
    }
    ops.reverse();
    ops
}

/// Score predictions against references.
///
/// All three slices must be index-aligned and of equal length. Returned
/// keys: `precision`, `recall`, `f1`, `exact_match`. An empty evaluation
/// set scores as a vacuously perfect run.
///
/// # Errors
///
/// Returns an invalid-argument error when the slice lengths differ.
pub fn compute_metrics(
    sources: &[String],
    corrections: &[String],
    predictions: &[String],
) -> Result<HashMap<String, f64>> {
    if sources.len() != corrections.len() || sources.len() != predictions.len() {
        return Err(CorrigoError::invalid_argument(format!(
            "sources, corrections and predictions must have the same length, \
             but got {} vs {} vs {}",
            sources.len(),
            corrections.len(),
            predictions.len()
        )));
    }

    let mut true_positives = 0usize;
    let mut false_positives = 0usize;
    let mut false_negatives = 0usize;
    let mut exact = 0usize;

    for ((source, correction), prediction) in
        sources.iter().zip(corrections.iter()).zip(predictions.iter())
    {
        let gold: HashSet<EditOp> = edit_operations(source, correction).into_iter().collect();
        let predicted: HashSet<EditOp> = edit_operations(source, prediction).into_iter().collect();

        true_positives += gold.intersection(&predicted).count();
        false_positives += predicted.difference(&gold).count();
        false_negatives += gold.difference(&predicted).count();

        if prediction.trim() == correction.trim() {
            exact += 1;
        }
    }

    let precision = if true_positives + false_positives == 0 {
        1.0
    } else {
        true_positives as f64 / (true_positives + false_positives) as f64
    };
    let recall = if true_positives + false_negatives == 0 {
        1.0
    } else {
        true_positives as f64 / (true_positives + false_negatives) as f64
    };
    let f1 = if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    };
    let exact_match = if sources.is_empty() {
        1.0
    } else {
        exact as f64 / sources.len() as f64
    };

    let mut metrics = HashMap::new();
    metrics.insert("precision".to_string(), precision);
    metrics.insert("recall".to_string(), recall);
    metrics.insert("f1".to_string(), f1);
    metrics.insert("exact_match".to_string(), exact_match);
    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_edit_operations_identical() {
        assert!(edit_operations("the same text", "the same text").is_empty());
        assert!(edit_operations("", "").is_empty());
    }

    #[test]
    fn test_edit_operations_replace() {
        let ops = edit_operations("teh cat sat", "the cat sat");
        assert_eq!(
            ops,
            vec![EditOp {
                position: 0,
                kind: EditKind::Replace("the".to_string()),
            }]
        );
    }

    #[test]
    fn test_edit_operations_insert_and_delete() {
        let ops = edit_operations("the cat", "the black cat");
        assert_eq!(
            ops,
            vec![EditOp {
                position: 1,
                kind: EditKind::Insert("black".to_string()),
            }]
        );

        let ops = edit_operations("the black cat", "the cat");
        assert_eq!(
            ops,
            vec![EditOp {
                position: 1,
                kind: EditKind::Delete,
            }]
        );
    }

    #[test]
    fn test_edit_operations_mixed() {
        let ops = edit_operations("teh cat saat on mat", "the cat sat on the mat");
        let set: HashSet<EditOp> = ops.into_iter().collect();
        assert!(set.contains(&EditOp {
            position: 0,
            kind: EditKind::Replace("the".to_string()),
        }));
        assert!(set.contains(&EditOp {
            position: 2,
            kind: EditKind::Replace("sat".to_string()),
        }));
        assert!(set.contains(&EditOp {
            position: 4,
            kind: EditKind::Insert("the".to_string()),
        }));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_perfect_predictions() {
        let sources = strings(&["teh cat", "a dgo barks"]);
        let corrections = strings(&["the cat", "a dog barks"]);
        let metrics = compute_metrics(&sources, &corrections, &corrections).unwrap();

        assert!((metrics["precision"] - 1.0).abs() < 1e-9);
        assert!((metrics["recall"] - 1.0).abs() < 1e-9);
        assert!((metrics["f1"] - 1.0).abs() < 1e-9);
        assert!((metrics["exact_match"] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unchanged_predictions() {
        let sources = strings(&["teh cat", "a dgo barks"]);
        let corrections = strings(&["the cat", "a dog barks"]);
        // The model returned its input untouched: nothing predicted, so
        // precision is vacuous and recall is zero.
        let metrics = compute_metrics(&sources, &corrections, &sources).unwrap();

        assert!((metrics["precision"] - 1.0).abs() < 1e-9);
        assert!((metrics["recall"] - 0.0).abs() < 1e-9);
        assert!((metrics["f1"] - 0.0).abs() < 1e-9);
        assert!((metrics["exact_match"] - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_predictions() {
        let sources = strings(&["teh cat", "a dgo"]);
        let corrections = strings(&["the cat", "a dog"]);
        let predictions = strings(&["the cat", "a dgo"]);
        let metrics = compute_metrics(&sources, &corrections, &predictions).unwrap();

        // One of two required edits made, no spurious ones.
        assert!((metrics["precision"] - 1.0).abs() < 1e-9);
        assert!((metrics["recall"] - 0.5).abs() < 1e-9);
        assert!((metrics["exact_match"] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_spurious_edit_lowers_precision() {
        let sources = strings(&["teh cat sat"]);
        let corrections = strings(&["the cat sat"]);
        let predictions = strings(&["the dog sat"]);
        let metrics = compute_metrics(&sources, &corrections, &predictions).unwrap();

        // The required edit was made plus one wrong edit.
        assert!((metrics["precision"] - 0.5).abs() < 1e-9);
        assert!((metrics["recall"] - 1.0).abs() < 1e-9);
        assert!((metrics["exact_match"] - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_inputs_are_vacuously_perfect() {
        let metrics = compute_metrics(&[], &[], &[]).unwrap();
        assert!((metrics["precision"] - 1.0).abs() < 1e-9);
        assert!((metrics["recall"] - 1.0).abs() < 1e-9);
        assert!((metrics["f1"] - 1.0).abs() < 1e-9);
        assert!((metrics["exact_match"] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let err =
            compute_metrics(&strings(&["a"]), &strings(&["a", "b"]), &strings(&["a"])).unwrap_err();
        assert!(matches!(err, CorrigoError::Other(_)));
    }

    #[test]
    fn test_exact_match_ignores_surrounding_whitespace() {
        let sources = strings(&["teh cat"]);
        let corrections = strings(&["the cat"]);
        let predictions = strings(&[" the cat "]);
        let metrics = compute_metrics(&sources, &corrections, &predictions).unwrap();
        assert!((metrics["exact_match"] - 1.0).abs() < 1e-9);
    }
}
