//! Candle-based corrector for T5-family checkpoints.
//!
//! Runs text-to-text spelling models locally through the HuggingFace Candle
//! framework. Requires the `correctors-candle` feature to be enabled.

use std::path::{Path, PathBuf};

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::generation::LogitsProcessor;
use candle_transformers::models::t5;
use candle_transformers::utils::apply_repeat_penalty;
use serde::{Deserialize, Serialize};
use tokenizers::Tokenizer;

use crate::correction::corrector::Corrector;
use crate::correction::options::GenerationOptions;
use crate::error::{CorrigoError, Result};
use crate::hub;

/// Default sampling seed when the options carry none.
const DEFAULT_SEED: u64 = 299792458;

/// Default cap on generated tokens per sentence.
const DEFAULT_MAX_NEW_TOKENS: u64 = 512;

/// Window of recent tokens considered by the repetition penalty.
const REPEAT_LAST_N: usize = 64;

/// Configuration for the candle T5 backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct T5CorrectorConfig {
    /// CUDA device ordinal to try first.
    pub cuda_device: usize,
    /// Run on CPU even when CUDA is available.
    pub force_cpu: bool,
}

impl Default for T5CorrectorConfig {
    fn default() -> Self {
        T5CorrectorConfig {
            cuda_device: 0,
            force_cpu: false,
        }
    }
}

/// Local corrector for T5-family checkpoints using Candle.
///
/// Covers the text-to-text entries of the registry
/// (`ai-forever/T5-large-spell`, `ai-forever/FRED-T5-large-spell`) and any
/// other T5 checkpoint with a `config.json`/`tokenizer.json`/
/// `model.safetensors` layout. Weights come from the HuggingFace Hub or a
/// local directory; inference runs offline on CUDA when available, CPU
/// otherwise.
///
/// Recognized generation options: `temperature`, `top_p`, `seed`,
/// `max_new_tokens`, `repetition_penalty`, `num_return_sequences`. Without
/// a temperature, decoding is greedy and multiple return sequences come out
/// identical; sampled runs derive one seed per candidate.
///
/// # Examples
///
/// ```no_run
/// use corrigo::correction::{Corrector, GenerationOptions, T5Corrector};
///
/// # fn example() -> corrigo::error::Result<()> {
/// let mut corrector = T5Corrector::from_pretrained("ai-forever/T5-large-spell")?;
///
/// let options = GenerationOptions::new().set("max_new_tokens", 64);
/// let candidates = corrector.correct("Th festeival was excelent", "", &options)?;
/// println!("{}", candidates[0]);
/// # Ok(())
/// # }
/// ```
pub struct T5Corrector {
    model: t5::T5ForConditionalGeneration,
    tokenizer: Tokenizer,
    config: t5::Config,
    device: Device,
    model_name: String,
}

impl T5Corrector {
    /// Create a corrector from a HuggingFace repository identifier or a
    /// local checkpoint directory.
    ///
    /// Hub checkpoints are downloaded into the shared cache on first use; a
    /// directory must already contain `config.json`, `tokenizer.json` and
    /// `model.safetensors`.
    ///
    /// # Errors
    ///
    /// Returns a model load error if any checkpoint file is missing or
    /// unreadable, or if device initialization fails.
    pub fn new(model_name_or_path: &str) -> Result<Self> {
        Self::with_config(model_name_or_path, &T5CorrectorConfig::default())
    }

    /// Create a corrector with explicit backend configuration.
    pub fn with_config(model_name_or_path: &str, backend: &T5CorrectorConfig) -> Result<Self> {
        // Prefer GPU when present.
        let device = if backend.force_cpu {
            Device::Cpu
        } else {
            Device::cuda_if_available(backend.cuda_device)
                .map_err(|e| CorrigoError::model_load(format!("Device setup failed: {}", e)))?
        };

        let (config_filename, tokenizer_filename, weights_filename) =
            Self::checkpoint_files(model_name_or_path)?;

        let config_str = std::fs::read_to_string(config_filename).map_err(|e| {
            CorrigoError::model_load(format!(
                "Config read failed for '{}': {}",
                model_name_or_path, e
            ))
        })?;
        let config: t5::Config = serde_json::from_str(&config_str).map_err(|e| {
            CorrigoError::model_load(format!(
                "Config parse failed for '{}': {}",
                model_name_or_path, e
            ))
        })?;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_filename], DType::F32, &device).map_err(
                |e| {
                    CorrigoError::model_load(format!(
                        "Weights load failed for '{}': {}",
                        model_name_or_path, e
                    ))
                },
            )?
        };
        let model = t5::T5ForConditionalGeneration::load(vb, &config).map_err(|e| {
            CorrigoError::model_load(format!(
                "Model load failed for '{}': {}",
                model_name_or_path, e
            ))
        })?;

        let tokenizer = Tokenizer::from_file(tokenizer_filename).map_err(|e| {
            CorrigoError::model_load(format!(
                "Tokenizer load failed for '{}': {}",
                model_name_or_path, e
            ))
        })?;

        Ok(Self {
            model,
            tokenizer,
            config,
            device,
            model_name: model_name_or_path.to_string(),
        })
    }

    /// Resolve the three checkpoint files from a directory or the hub.
    fn checkpoint_files(model_name_or_path: &str) -> Result<(PathBuf, PathBuf, PathBuf)> {
        let dir = Path::new(model_name_or_path);
        if dir.is_dir() {
            let local = |name: &str| -> Result<PathBuf> {
                let path = dir.join(name);
                if path.is_file() {
                    Ok(path)
                } else {
                    Err(CorrigoError::model_load(format!(
                        "'{}' is missing {}",
                        dir.display(),
                        name
                    )))
                }
            };
            return Ok((
                local("config.json")?,
                local("tokenizer.json")?,
                local("model.safetensors")?,
            ));
        }

        let repo = hub::model_repo(model_name_or_path)?;
        let fetch = |name: &str| -> Result<PathBuf> {
            repo.get(name).map_err(|e| {
                CorrigoError::model_load(format!(
                    "Failed to fetch {} for '{}': {}",
                    name, model_name_or_path, e
                ))
            })
        };
        Ok((
            fetch("config.json")?,
            fetch("tokenizer.json")?,
            fetch("model.safetensors")?,
        ))
    }

    /// Generate one candidate for an already-prefixed input.
    fn generate(&mut self, text: &str, seed: u64, options: &GenerationOptions) -> Result<String> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| CorrigoError::generation(format!("Tokenization failed: {}", e)))?;
        let input_ids = Tensor::new(encoding.get_ids(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| CorrigoError::generation(format!("Tensor creation failed: {}", e)))?;

        self.model.clear_kv_cache();
        let encoder_output = self
            .model
            .encode(&input_ids)
            .map_err(|e| CorrigoError::generation(format!("Encoder forward failed: {}", e)))?;

        let temperature = options.get_f64("temperature");
        let top_p = options.get_f64("top_p");
        let mut logits_processor = LogitsProcessor::new(seed, temperature, top_p);
        let max_new_tokens = options.get_u64("max_new_tokens").unwrap_or(DEFAULT_MAX_NEW_TOKENS);
        let repeat_penalty = options.get_f64("repetition_penalty").unwrap_or(1.0) as f32;

        let mut output_ids = vec![
            self.config
                .decoder_start_token_id
                .unwrap_or(self.config.pad_token_id) as u32,
        ];
        for index in 0..max_new_tokens {
            // With the KV cache only the newest token is fed back.
            let decoder_ids = if index == 0 || !self.config.use_cache {
                Tensor::new(output_ids.as_slice(), &self.device)
            } else {
                Tensor::new(&output_ids[output_ids.len() - 1..], &self.device)
            }
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| CorrigoError::generation(format!("Tensor creation failed: {}", e)))?;

            let logits = self
                .model
                .decode(&decoder_ids, &encoder_output)
                .and_then(|l| l.squeeze(0))
                .map_err(|e| CorrigoError::generation(format!("Decoder forward failed: {}", e)))?;
            let logits = if repeat_penalty == 1.0 {
                logits
            } else {
                let start_at = output_ids.len().saturating_sub(REPEAT_LAST_N);
                apply_repeat_penalty(&logits, repeat_penalty, &output_ids[start_at..])
                    .map_err(|e| CorrigoError::generation(format!("Repeat penalty failed: {}", e)))?
            };

            let next_token_id = logits_processor
                .sample(&logits)
                .map_err(|e| CorrigoError::generation(format!("Sampling failed: {}", e)))?;
            if next_token_id as usize == self.config.eos_token_id {
                break;
            }
            output_ids.push(next_token_id);
        }

        self.tokenizer
            .decode(&output_ids, true)
            .map_err(|e| CorrigoError::generation(format!("Detokenization failed: {}", e)))
    }
}

impl Corrector for T5Corrector {
    fn from_pretrained(model_name_or_path: &str) -> Result<Self> {
        T5Corrector::new(model_name_or_path)
    }

    /// Correct a batch of sentences with local T5 inference.
    ///
    /// Sentences decode one at a time; `batch_size` only fixes the
    /// traversal into chunks, matching the shared contract.
    fn batch_correct(
        &mut self,
        sentences: &[String],
        batch_size: usize,
        prefix: &str,
        options: &GenerationOptions,
    ) -> Result<Vec<Vec<String>>> {
        let num_sequences = options.num_return_sequences();
        let seed = options.get_u64("seed").unwrap_or(DEFAULT_SEED);

        let mut results = Vec::with_capacity(sentences.len());
        for chunk in sentences.chunks(batch_size.max(1)) {
            for sentence in chunk {
                let input = format!("{prefix}{sentence}");
                let mut candidates = Vec::with_capacity(num_sequences);
                for candidate in 0..num_sequences {
                    let candidate_seed = seed.wrapping_add(candidate as u64);
                    candidates.push(self.generate(&input, candidate_seed, options)?);
                }
                results.push(candidates);
            }
        }
        Ok(results)
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}
