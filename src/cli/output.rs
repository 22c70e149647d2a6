//! Output formatting for CLI commands.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cli::args::{CorrigoArgs, OutputFormat};
use crate::error::Result;

/// One registry entry in `models` output.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub repo_id: String,
    pub family: String,
}

/// Result structure for listing models.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelListResult {
    pub models: Vec<ModelInfo>,
}

/// Result structure for listing benchmark datasets.
#[derive(Debug, Serialize, Deserialize)]
pub struct DatasetListResult {
    pub datasets: Vec<String>,
}

/// Result structure for single-sentence correction.
#[derive(Debug, Serialize, Deserialize)]
pub struct CorrectionResult {
    pub model: String,
    pub source: String,
    pub candidates: Vec<String>,
    pub duration_ms: u64,
}

/// Result structure for dataset evaluation.
#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub model: String,
    pub dataset: String,
    pub split: String,
    pub metrics: BTreeMap<String, f64>,
    pub duration_ms: u64,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &CorrigoArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &CorrigoArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    // Convert to JSON value for easier manipulation
    let value = serde_json::to_value(result)?;

    match result {
        _ if std::any::type_name::<T>().contains("EvaluationResult") => {
            output_evaluation_human(&value)
        }
        _ if std::any::type_name::<T>().contains("CorrectionResult") => {
            output_correction_human(&value)
        }
        _ if std::any::type_name::<T>().contains("ModelListResult") => {
            output_model_list_human(&value)
        }
        _ if std::any::type_name::<T>().contains("DatasetListResult") => {
            output_dataset_list_human(&value)
        }
        _ => {
            // Generic output for other types
            output_generic_human(&value)
        }
    }
}

/// Output the model registry in human format.
fn output_model_list_human(value: &serde_json::Value) -> Result<()> {
    if let Some(models) = value.get("models").and_then(|m| m.as_array()) {
        println!("Available models:");
        for model in models {
            let name = model.get("name").and_then(|n| n.as_str()).unwrap_or("?");
            let repo_id = model.get("repo_id").and_then(|r| r.as_str()).unwrap_or("?");
            let family = model.get("family").and_then(|f| f.as_str()).unwrap_or("?");
            println!("  {name:<14} {repo_id} ({family})");
        }
    }
    Ok(())
}

/// Output the benchmark list in human format.
fn output_dataset_list_human(value: &serde_json::Value) -> Result<()> {
    if let Some(datasets) = value.get("datasets").and_then(|d| d.as_array()) {
        println!("Available benchmarks:");
        for dataset in datasets {
            if let Some(name) = dataset.as_str() {
                println!("  {name}");
            }
        }
    }
    Ok(())
}

/// Output evaluation metrics in human format.
fn output_evaluation_human(value: &serde_json::Value) -> Result<()> {
    if let Some(obj) = value.as_object() {
        println!("Evaluation Results:");
        println!("═══════════════════");

        if let Some(model) = obj.get("model").and_then(|m| m.as_str()) {
            println!("Model: {model}");
        }
        if let Some(dataset) = obj.get("dataset").and_then(|d| d.as_str()) {
            println!("Dataset: {dataset}");
        }
        if let Some(split) = obj.get("split").and_then(|s| s.as_str()) {
            println!("Split: {split}");
        }

        if let Some(metrics) = obj.get("metrics").and_then(|m| m.as_object()) {
            println!();
            println!("Metrics:");
            println!("────────");
            for (name, metric) in metrics {
                if let Some(score) = metric.as_f64() {
                    println!("{name}: {score:.4}");
                }
            }
        }

        if let Some(duration) = obj.get("duration_ms").and_then(|d| d.as_u64()) {
            println!();
            println!("Evaluation time: {duration}ms");
        }
    }
    Ok(())
}

/// Output correction candidates in human format.
fn output_correction_human(value: &serde_json::Value) -> Result<()> {
    if let Some(obj) = value.as_object() {
        if let Some(source) = obj.get("source").and_then(|s| s.as_str()) {
            println!("Source: {source}");
        }

        if let Some(candidates) = obj.get("candidates").and_then(|c| c.as_array()) {
            for (i, candidate) in candidates.iter().enumerate() {
                if let Some(text) = candidate.as_str() {
                    if candidates.len() == 1 {
                        println!("Correction: {text}");
                    } else {
                        println!("Candidate {}: {}", i + 1, text);
                    }
                }
            }
        }

        if let Some(duration) = obj.get("duration_ms").and_then(|d| d.as_u64()) {
            println!();
            println!("Inference time: {duration}ms");
        }
    }
    Ok(())
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value) -> Result<()> {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &CorrigoArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(
            format_value(&serde_json::Value::String("test".to_string())),
            "test"
        );
        assert_eq!(
            format_value(&serde_json::Value::Number(serde_json::Number::from(42))),
            "42"
        );
        assert_eq!(format_value(&serde_json::Value::Bool(false)), "false");
        assert_eq!(format_value(&serde_json::Value::Null), "null");
        assert_eq!(
            format_value(&serde_json::json!(["a", "b"])),
            "[a, b]"
        );
    }

    #[test]
    fn test_evaluation_result_serialization() {
        let mut metrics = BTreeMap::new();
        metrics.insert("f1".to_string(), 0.5);
        metrics.insert("exact_match".to_string(), 0.25);

        let result = EvaluationResult {
            model: "ent5_large".to_string(),
            dataset: "RUSpellRU".to_string(),
            split: "test".to_string(),
            metrics,
            duration_ms: 12,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["model"], "ent5_large");
        assert_eq!(json["metrics"]["f1"], 0.5);
    }
}
