//! The corrector capability: required operations plus derived flows.

use std::collections::HashMap;

use crate::correction::options::GenerationOptions;
use crate::dataset;
use crate::error::{CorrigoError, Result};
use crate::evaluation;

/// Trait for spelling correction backed by a pretrained model.
///
/// Implementations supply two operations: binding a model
/// ([`from_pretrained`](Corrector::from_pretrained)) and correcting a batch
/// ([`batch_correct`](Corrector::batch_correct)). Single-sentence
/// correction and dataset evaluation are derived from those and normally
/// not overridden.
///
/// Everything is synchronous: calls block until inference finishes, and no
/// concurrent access to a corrector is contracted. Methods take `&mut self`
/// because autoregressive decoding mutates model state.
///
/// # Examples
///
/// ## Local T5 backend (requires `correctors-candle` feature)
///
/// ```no_run
/// # #[cfg(feature = "correctors-candle")]
/// # {
/// use corrigo::correction::{Corrector, GenerationOptions, T5Corrector};
///
/// # fn example() -> corrigo::error::Result<()> {
/// let mut corrector = T5Corrector::from_pretrained("ai-forever/T5-large-spell")?;
///
/// let candidates = corrector.correct("fone the store", "", &GenerationOptions::new())?;
/// println!("{}", candidates[0]);
/// # Ok(())
/// # }
/// # }
/// ```
///
/// ## Hosted backend (requires `correctors-api` feature)
///
/// ```no_run
/// # #[cfg(feature = "correctors-api")]
/// # {
/// use corrigo::correction::{Corrector, GenerationOptions, M2M100Corrector};
///
/// # fn example() -> corrigo::error::Result<()> {
/// let mut corrector = M2M100Corrector::from_pretrained("ai-forever/RuM2M100-418M")?;
///
/// let batches = corrector.batch_correct(
///     &["превед медвед".to_string()],
///     32,
///     "",
///     &GenerationOptions::new(),
/// )?;
/// # Ok(())
/// # }
/// # }
/// ```
///
/// ## Custom implementation
///
/// ```
/// use corrigo::correction::{Corrector, GenerationOptions};
/// use corrigo::error::Result;
///
/// struct IdentityCorrector;
///
/// impl Corrector for IdentityCorrector {
///     fn from_pretrained(_model_name_or_path: &str) -> Result<Self> {
///         Ok(IdentityCorrector)
///     }
///
///     fn batch_correct(
///         &mut self,
///         sentences: &[String],
///         _batch_size: usize,
///         _prefix: &str,
///         _options: &GenerationOptions,
///     ) -> Result<Vec<Vec<String>>> {
///         Ok(sentences.iter().map(|s| vec![s.clone()]).collect())
///     }
/// }
/// ```
pub trait Corrector {
    /// Bind a corrector to a pretrained checkpoint.
    ///
    /// # Arguments
    ///
    /// * `model_name_or_path` - HuggingFace repository identifier or local
    ///   directory path of the checkpoint
    ///
    /// # Errors
    ///
    /// Returns a model load error when the identifier is invalid or the
    /// checkpoint cannot be fetched.
    fn from_pretrained(model_name_or_path: &str) -> Result<Self>
    where
        Self: Sized;

    /// Correct a batch of sentences.
    ///
    /// Sentences are processed in chunks of at most `batch_size` (a zero
    /// batch size counts as one); `prefix` is prepended to every sentence
    /// before inference, the way instruction-tuned checkpoints expect.
    ///
    /// # Returns
    ///
    /// One candidate list per input sentence, in input order, so the outer
    /// length always equals `sentences.len()`. Each list holds at least one
    /// candidate and exactly as many as the options request via
    /// `num_return_sequences`.
    ///
    /// # Errors
    ///
    /// Returns a generation error when inference fails; no partial results
    /// are returned.
    fn batch_correct(
        &mut self,
        sentences: &[String],
        batch_size: usize,
        prefix: &str,
        options: &GenerationOptions,
    ) -> Result<Vec<Vec<String>>>;

    /// Correct a single sentence.
    ///
    /// Equivalent to a single-element [`batch_correct`](Corrector::batch_correct)
    /// with batch size one, returning that sentence's candidate list.
    fn correct(
        &mut self,
        sentence: &str,
        prefix: &str,
        options: &GenerationOptions,
    ) -> Result<Vec<String>> {
        let mut results = self.batch_correct(&[sentence.to_string()], 1, prefix, options)?;
        results.pop().ok_or_else(|| {
            CorrigoError::generation("batch_correct returned no results for a single-sentence batch")
        })
    }

    /// Evaluate this corrector against a labeled dataset.
    ///
    /// The flow:
    ///
    /// 1. resolve `dataset_name_or_path` (known benchmark name or dataset
    ///    directory; `dataset_split` selects the benchmark split);
    /// 2. when `size` is `Some(k)`, keep only the first `k` source/correction
    ///    pairs — both sequences are cut together;
    /// 3. run [`batch_correct`](Corrector::batch_correct) over the remaining
    ///    sources;
    /// 4. keep the first candidate of each sentence's list as its
    ///    prediction;
    /// 5. hand `(sources, corrections, predictions)` to the metrics
    ///    function and return its map unchanged.
    ///
    /// # Errors
    ///
    /// Dataset resolution errors surface before any model call. A candidate
    /// list coming back empty is a contract violation and reported as a
    /// generation error.
    fn evaluate(
        &mut self,
        dataset_name_or_path: &str,
        batch_size: usize,
        prefix: &str,
        dataset_split: &str,
        size: Option<usize>,
        options: &GenerationOptions,
    ) -> Result<HashMap<String, f64>> {
        let mut ds = dataset::resolve(dataset_name_or_path, dataset_split)?;
        if let Some(limit) = size {
            ds.truncate(limit);
        }
        let (sources, corrections) = ds.into_parts();

        let batch_answers = self.batch_correct(&sources, batch_size, prefix, options)?;

        let mut predictions = Vec::with_capacity(batch_answers.len());
        for (index, mut candidates) in batch_answers.into_iter().enumerate() {
            if candidates.is_empty() {
                return Err(CorrigoError::generation(format!(
                    "no candidates returned for sentence {index}"
                )));
            }
            predictions.push(candidates.swap_remove(0));
        }

        evaluation::compute_metrics(&sources, &corrections, &predictions)
    }

    /// Get the name/identifier of this corrector.
    ///
    /// This is useful for logging and debugging purposes.
    fn name(&self) -> &str {
        "unknown"
    }
}
