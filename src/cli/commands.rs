//! Command implementations for the corrigo CLI.

use std::collections::BTreeMap;
use std::time::Instant;

use crate::cli::args::{Command, CorrectArgs, CorrigoArgs, EvaluateArgs, FamilyArg};
use crate::cli::output::{
    CorrectionResult, DatasetListResult, EvaluationResult, ModelInfo, ModelListResult,
    output_result,
};
use crate::correction::Corrector;
#[cfg(feature = "correctors-api")]
use crate::correction::M2M100Corrector;
#[cfg(feature = "correctors-candle")]
use crate::correction::T5Corrector;
use crate::dataset::benchmark::SpellcheckBenchmark;
use crate::error::{CorrigoError, Result};
use crate::models::{AvailableCorrector, ModelFamily};

/// Execute a CLI command.
pub fn execute_command(args: CorrigoArgs) -> Result<()> {
    match &args.command {
        Command::Models => list_models(&args),
        Command::Datasets => list_datasets(&args),
        Command::Correct(correct_args) => correct_sentence(correct_args.clone(), &args),
        Command::Evaluate(evaluate_args) => evaluate_model(evaluate_args.clone(), &args),
    }
}

/// List the pretrained models in the registry.
fn list_models(cli_args: &CorrigoArgs) -> Result<()> {
    let models = AvailableCorrector::ALL
        .iter()
        .map(|corrector| ModelInfo {
            name: corrector.name().to_string(),
            repo_id: corrector.repo_id().to_string(),
            family: corrector.family().to_string(),
        })
        .collect();

    output_result(
        "Available pretrained models",
        &ModelListResult { models },
        cli_args,
    )?;

    Ok(())
}

/// List the known benchmark datasets.
fn list_datasets(cli_args: &CorrigoArgs) -> Result<()> {
    let datasets = SpellcheckBenchmark::ALL
        .iter()
        .map(|benchmark| benchmark.name().to_string())
        .collect();

    output_result(
        "Available benchmark datasets",
        &DatasetListResult { datasets },
        cli_args,
    )?;

    Ok(())
}

/// Correct a single sentence.
fn correct_sentence(args: CorrectArgs, cli_args: &CorrigoArgs) -> Result<()> {
    if cli_args.verbosity() > 1 {
        println!("Loading model: {}", args.model);
    }

    let mut corrector = build_corrector(&args.model, args.family)?;
    let options = args.generation_options();

    if cli_args.verbosity() > 1 {
        println!("Correcting: {}", args.sentence);
    }

    let start_time = Instant::now();
    let candidates = corrector.correct(&args.sentence, &args.prefix, &options)?;
    let duration = start_time.elapsed();

    output_result(
        "Correction complete",
        &CorrectionResult {
            model: corrector.name().to_string(),
            source: args.sentence,
            candidates,
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )?;

    Ok(())
}

/// Evaluate a model against a labeled dataset.
fn evaluate_model(args: EvaluateArgs, cli_args: &CorrigoArgs) -> Result<()> {
    if cli_args.verbosity() > 1 {
        println!("Loading model: {}", args.model);
    }

    let mut corrector = build_corrector(&args.model, args.family)?;
    let options = args.generation_options();

    if cli_args.verbosity() > 0 {
        println!(
            "Evaluating {} on {} (split: {})",
            corrector.name(),
            args.dataset,
            args.split
        );
    }

    let start_time = Instant::now();
    let metrics = corrector.evaluate(
        &args.dataset,
        args.batch_size,
        &args.prefix,
        &args.split,
        args.size,
        &options,
    )?;
    let duration = start_time.elapsed();

    output_result(
        "Evaluation complete",
        &EvaluationResult {
            model: corrector.name().to_string(),
            dataset: args.dataset,
            split: args.split,
            metrics: metrics.into_iter().collect::<BTreeMap<String, f64>>(),
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )?;

    Ok(())
}

/// Resolve a model argument to a backend instance.
///
/// Registry names carry their own family; anything else is treated as a raw
/// HuggingFace identifier or local path and needs `--family` to pick the
/// backend.
fn build_corrector(model: &str, family: Option<FamilyArg>) -> Result<Box<dyn Corrector>> {
    if let Some(entry) = AvailableCorrector::from_name(model) {
        log::debug!("Resolved '{}' to '{}'", model, entry.repo_id());
        return match entry.family() {
            ModelFamily::TextToText => build_t5(entry.repo_id()),
            ModelFamily::Seq2Seq => build_m2m100(entry.repo_id()),
        };
    }

    match family.map(FamilyArg::to_model_family) {
        Some(ModelFamily::TextToText) => build_t5(model),
        Some(ModelFamily::Seq2Seq) => build_m2m100(model),
        None => Err(CorrigoError::invalid_argument(format!(
            "'{model}' is not a registered model; pass --family to load it as a raw identifier"
        ))),
    }
}

#[cfg(feature = "correctors-candle")]
fn build_t5(identifier: &str) -> Result<Box<dyn Corrector>> {
    Ok(Box::new(T5Corrector::from_pretrained(identifier)?))
}

#[cfg(not(feature = "correctors-candle"))]
fn build_t5(identifier: &str) -> Result<Box<dyn Corrector>> {
    Err(CorrigoError::invalid_argument(format!(
        "Model '{identifier}' needs the 'correctors-candle' feature"
    )))
}

#[cfg(feature = "correctors-api")]
fn build_m2m100(identifier: &str) -> Result<Box<dyn Corrector>> {
    Ok(Box::new(M2M100Corrector::from_pretrained(identifier)?))
}

#[cfg(not(feature = "correctors-api"))]
fn build_m2m100(identifier: &str) -> Result<Box<dyn Corrector>> {
    Err(CorrigoError::invalid_argument(format!(
        "Model '{identifier}' needs the 'correctors-api' feature"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unregistered_model_requires_family() {
        let result = build_corrector("my-org/unknown-model", None);
        let err = result.err().map(|e| e.to_string());
        assert!(err.is_some_and(|msg| msg.contains("--family")));
    }

    #[cfg(not(feature = "correctors-candle"))]
    #[test]
    fn test_t5_backend_needs_feature() {
        let result = build_corrector("ent5_large", None);
        let err = result.err().map(|e| e.to_string());
        assert!(err.is_some_and(|msg| msg.contains("correctors-candle")));
    }

    #[cfg(not(feature = "correctors-api"))]
    #[test]
    fn test_m2m100_backend_needs_feature() {
        let result = build_corrector("m2m100_418M", None);
        let err = result.err().map(|e| e.to_string());
        assert!(err.is_some_and(|msg| msg.contains("correctors-api")));
    }
}
