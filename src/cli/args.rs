//! Command line argument parsing for the corrigo CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::correction::GenerationOptions;
use crate::models::ModelFamily;

/// corrigo - pretrained spelling correction models
#[derive(Parser, Debug, Clone)]
#[command(name = "corrigo")]
#[command(about = "Run and evaluate pretrained spelling correction models")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct CorrigoArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl CorrigoArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the pretrained models in the registry
    Models,

    /// List the known benchmark datasets
    Datasets,

    /// Correct a single sentence
    Correct(CorrectArgs),

    /// Evaluate a model against a labeled dataset
    Evaluate(EvaluateArgs),
}

/// Arguments for correcting a sentence
#[derive(Parser, Debug, Clone)]
pub struct CorrectArgs {
    /// Sentence to correct
    #[arg(value_name = "SENTENCE")]
    pub sentence: String,

    /// Registry name or HuggingFace repository identifier of the model
    #[arg(short, long)]
    pub model: String,

    /// Model family for identifiers outside the registry
    #[arg(long)]
    pub family: Option<FamilyArg>,

    /// Prefix prepended to the sentence before inference
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Number of candidate corrections per sentence
    #[arg(long, default_value = "1")]
    pub num_return_sequences: usize,

    /// Sampling temperature (greedy decoding when omitted)
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Nucleus sampling probability mass
    #[arg(long)]
    pub top_p: Option<f64>,

    /// Sampling seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Cap on generated tokens per sentence
    #[arg(long)]
    pub max_new_tokens: Option<u64>,

    /// Penalty applied to recently generated tokens
    #[arg(long)]
    pub repetition_penalty: Option<f64>,
}

impl CorrectArgs {
    /// Build the generation options from the flags that were set.
    pub fn generation_options(&self) -> GenerationOptions {
        build_generation_options(
            self.num_return_sequences,
            self.temperature,
            self.top_p,
            self.seed,
            self.max_new_tokens,
            self.repetition_penalty,
        )
    }
}

/// Arguments for evaluating a model
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    /// Benchmark name or path to a dataset directory
    #[arg(value_name = "DATASET")]
    pub dataset: String,

    /// Registry name or HuggingFace repository identifier of the model
    #[arg(short, long)]
    pub model: String,

    /// Model family for identifiers outside the registry
    #[arg(long)]
    pub family: Option<FamilyArg>,

    /// Batch size for inference
    #[arg(short, long, default_value = "32")]
    pub batch_size: usize,

    /// Prefix prepended to every sentence before inference
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Benchmark split to evaluate on
    #[arg(long, default_value = "test")]
    pub split: String,

    /// Evaluate only the first N pairs (whole dataset when omitted)
    #[arg(long)]
    pub size: Option<usize>,

    /// Number of candidate corrections per sentence
    #[arg(long, default_value = "1")]
    pub num_return_sequences: usize,

    /// Sampling temperature (greedy decoding when omitted)
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Nucleus sampling probability mass
    #[arg(long)]
    pub top_p: Option<f64>,

    /// Sampling seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Cap on generated tokens per sentence
    #[arg(long)]
    pub max_new_tokens: Option<u64>,

    /// Penalty applied to recently generated tokens
    #[arg(long)]
    pub repetition_penalty: Option<f64>,
}

impl EvaluateArgs {
    /// Build the generation options from the flags that were set.
    pub fn generation_options(&self) -> GenerationOptions {
        build_generation_options(
            self.num_return_sequences,
            self.temperature,
            self.top_p,
            self.seed,
            self.max_new_tokens,
            self.repetition_penalty,
        )
    }
}

fn build_generation_options(
    num_return_sequences: usize,
    temperature: Option<f64>,
    top_p: Option<f64>,
    seed: Option<u64>,
    max_new_tokens: Option<u64>,
    repetition_penalty: Option<f64>,
) -> GenerationOptions {
    let mut options = GenerationOptions::new();
    if num_return_sequences != 1 {
        options = options.set("num_return_sequences", num_return_sequences as u64);
    }
    if let Some(temperature) = temperature {
        options = options.set("temperature", temperature);
    }
    if let Some(top_p) = top_p {
        options = options.set("top_p", top_p);
    }
    if let Some(seed) = seed {
        options = options.set("seed", seed);
    }
    if let Some(max_new_tokens) = max_new_tokens {
        options = options.set("max_new_tokens", max_new_tokens);
    }
    if let Some(repetition_penalty) = repetition_penalty {
        options = options.set("repetition_penalty", repetition_penalty);
    }
    options
}

/// Model families selectable on the command line
#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyArg {
    /// Local text-to-text backend
    T5,
    /// Hosted seq2seq backend
    M2m100,
}

impl FamilyArg {
    /// The library-level model family this flag selects.
    pub fn to_model_family(self) -> ModelFamily {
        match self {
            FamilyArg::T5 => ModelFamily::TextToText,
            FamilyArg::M2m100 => ModelFamily::Seq2Seq,
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_models_command() {
        let args = CorrigoArgs::try_parse_from(["corrigo", "models"]).unwrap();
        assert!(matches!(args.command, Command::Models));
    }

    #[test]
    fn test_basic_correct_command() {
        let args = CorrigoArgs::try_parse_from([
            "corrigo",
            "correct",
            "tehre is a mstake",
            "--model",
            "ent5_large",
            "--num-return-sequences",
            "3",
        ])
        .unwrap();

        if let Command::Correct(correct_args) = args.command {
            assert_eq!(correct_args.sentence, "tehre is a mstake");
            assert_eq!(correct_args.model, "ent5_large");
            assert_eq!(correct_args.num_return_sequences, 3);
        } else {
            panic!("Expected Correct command");
        }
    }

    #[test]
    fn test_evaluate_command() {
        let args = CorrigoArgs::try_parse_from([
            "corrigo",
            "evaluate",
            "RUSpellRU",
            "--model",
            "m2m100_418M",
            "--batch-size",
            "16",
            "--split",
            "test",
            "--size",
            "100",
        ])
        .unwrap();

        if let Command::Evaluate(eval_args) = args.command {
            assert_eq!(eval_args.dataset, "RUSpellRU");
            assert_eq!(eval_args.model, "m2m100_418M");
            assert_eq!(eval_args.batch_size, 16);
            assert_eq!(eval_args.split, "test");
            assert_eq!(eval_args.size, Some(100));
        } else {
            panic!("Expected Evaluate command");
        }
    }

    #[test]
    fn test_evaluate_defaults() {
        let args = CorrigoArgs::try_parse_from([
            "corrigo", "evaluate", "/data/typos", "--model", "fred_large",
        ])
        .unwrap();

        if let Command::Evaluate(eval_args) = args.command {
            assert_eq!(eval_args.batch_size, 32);
            assert_eq!(eval_args.split, "test");
            assert_eq!(eval_args.size, None);
            assert!(eval_args.generation_options().is_empty());
        } else {
            panic!("Expected Evaluate command");
        }
    }

    #[test]
    fn test_generation_options_from_flags() {
        let args = CorrigoArgs::try_parse_from([
            "corrigo",
            "correct",
            "text",
            "--model",
            "ent5_large",
            "--temperature",
            "0.7",
            "--seed",
            "7",
            "--num-return-sequences",
            "2",
        ])
        .unwrap();

        if let Command::Correct(correct_args) = args.command {
            let options = correct_args.generation_options();
            assert_eq!(options.get_f64("temperature"), Some(0.7));
            assert_eq!(options.get_u64("seed"), Some(7));
            assert_eq!(options.num_return_sequences(), 2);
            assert_eq!(options.get("max_new_tokens"), None);
        } else {
            panic!("Expected Correct command");
        }
    }

    #[test]
    fn test_family_flag() {
        let args = CorrigoArgs::try_parse_from([
            "corrigo",
            "correct",
            "text",
            "--model",
            "my-org/my-spell-model",
            "--family",
            "t5",
        ])
        .unwrap();

        if let Command::Correct(correct_args) = args.command {
            assert!(matches!(
                correct_args.family.map(FamilyArg::to_model_family),
                Some(ModelFamily::TextToText)
            ));
        } else {
            panic!("Expected Correct command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        // Default verbosity
        let args = CorrigoArgs::try_parse_from(["corrigo", "models"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        // Multiple verbose flags
        let args = CorrigoArgs::try_parse_from(["corrigo", "-vv", "models"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        // Quiet flag
        let args = CorrigoArgs::try_parse_from(["corrigo", "--quiet", "models"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args = CorrigoArgs::try_parse_from(["corrigo", "--format", "json", "models"]).unwrap();
        assert!(matches!(args.output_format, OutputFormat::Json));
    }
}
