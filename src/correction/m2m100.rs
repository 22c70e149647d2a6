//! Hosted-endpoint corrector for M2M100-family checkpoints.
//!
//! The RuM2M100 checkpoints have no local Candle implementation, so this
//! backend sends batches to a hosted text2text inference endpoint speaking
//! the HuggingFace Inference API wire shape. Requires the `correctors-api`
//! feature to be enabled.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::correction::corrector::Corrector;
use crate::correction::options::GenerationOptions;
use crate::error::{CorrigoError, Result};

/// Base URL for model endpoints when only a repository identifier is given.
const DEFAULT_ENDPOINT_BASE: &str = "https://api-inference.huggingface.co/models";

/// Environment variable carrying the endpoint bearer token.
const API_TOKEN_VAR: &str = "HF_API_TOKEN";

/// Request timeout; generation on large checkpoints is slow.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Request body for one chunk of sentences.
#[derive(Debug, Serialize)]
struct GenerationRequest {
    /// Prefixed input sentences, one entry per sentence.
    inputs: Vec<String>,
    /// Generation options, forwarded verbatim.
    #[serde(skip_serializing_if = "GenerationOptions::is_empty")]
    parameters: GenerationOptions,
}

/// One generated candidate in the endpoint response.
#[derive(Debug, Deserialize)]
struct GeneratedText {
    /// The corrected text.
    generated_text: String,
}

/// Hosted-endpoint corrector for seq2seq translation-style checkpoints.
///
/// Each chunk becomes one HTTP POST of
/// `{"inputs": [..], "parameters": {..}}`; the endpoint answers with one
/// array of `{"generated_text": ..}` objects per input, in input order.
/// Calls block until the endpoint responds, keeping the whole pipeline
/// synchronous.
///
/// A bearer token is read from `HF_API_TOKEN` when set; anonymous requests
/// work against public endpoints within their rate limits.
///
/// # Examples
///
/// ```no_run
/// use corrigo::correction::{Corrector, GenerationOptions, M2M100Corrector};
///
/// # fn example() -> corrigo::error::Result<()> {
/// // By repository identifier against the default endpoint base.
/// let mut corrector = M2M100Corrector::from_pretrained("ai-forever/RuM2M100-418M")?;
///
/// // Or against a dedicated deployment.
/// let mut corrector = M2M100Corrector::from_pretrained("https://my-endpoint.example/m2m100")?;
///
/// let candidates = corrector.correct("превед медвед", "", &GenerationOptions::new())?;
/// # Ok(())
/// # }
/// ```
pub struct M2M100Corrector {
    /// HTTP client for endpoint requests.
    client: reqwest::blocking::Client,
    /// Full endpoint URL the chunks are posted to.
    endpoint: String,
    /// Optional bearer token.
    api_token: Option<String>,
    /// Identifier the corrector was created from.
    model_name: String,
}

impl M2M100Corrector {
    /// Create a corrector from a repository identifier or a full endpoint
    /// URL.
    ///
    /// Bare identifiers resolve against the default endpoint base; anything
    /// starting with `http://` or `https://` is used as the endpoint
    /// directly. The bearer token, if any, comes from `HF_API_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns a model load error for an empty identifier or when the HTTP
    /// client cannot be constructed.
    pub fn new(model_name_or_path: &str) -> Result<Self> {
        let endpoint = Self::endpoint_for(model_name_or_path)?;
        Self::with_endpoint(model_name_or_path, &endpoint, std::env::var(API_TOKEN_VAR).ok())
    }

    /// Create a corrector against an explicit endpoint and token.
    pub fn with_endpoint(
        model_name: &str,
        endpoint: &str,
        api_token: Option<String>,
    ) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CorrigoError::model_load(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_token,
            model_name: model_name.to_string(),
        })
    }

    /// Resolve the endpoint URL for an identifier.
    fn endpoint_for(model_name_or_path: &str) -> Result<String> {
        if model_name_or_path.trim().is_empty() {
            return Err(CorrigoError::model_load("model identifier must not be empty"));
        }
        if model_name_or_path.starts_with("http://") || model_name_or_path.starts_with("https://") {
            Ok(model_name_or_path.to_string())
        } else {
            Ok(format!("{}/{}", DEFAULT_ENDPOINT_BASE, model_name_or_path))
        }
    }

    /// Post one chunk and parse the per-input candidate lists.
    fn request_chunk(&self, inputs: Vec<String>, options: &GenerationOptions) -> Result<Vec<Vec<String>>> {
        let expected = inputs.len();
        let request = GenerationRequest {
            inputs,
            parameters: options.clone(),
        };

        let mut builder = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json");
        if let Some(token) = &self.api_token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let http_response = builder
            .json(&request)
            .send()
            .map_err(|e| CorrigoError::generation(format!("Endpoint request failed: {}", e)))?;

        let status = http_response.status();
        let response_text = http_response
            .text()
            .map_err(|e| CorrigoError::generation(format!("Failed to read response text: {}", e)))?;

        // A missing model is a binding problem, not a generation one.
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CorrigoError::model_load(format!(
                "Model '{}' not available at '{}' (status 404): {}",
                self.model_name, self.endpoint, response_text
            )));
        }
        if !status.is_success() {
            return Err(CorrigoError::generation(format!(
                "Endpoint error (status {}): {}",
                status, response_text
            )));
        }

        let parsed: Vec<Vec<GeneratedText>> = serde_json::from_str(&response_text).map_err(|e| {
            CorrigoError::generation(format!(
                "Failed to parse endpoint response: {}. Response text: {}",
                e, response_text
            ))
        })?;
        if parsed.len() != expected {
            return Err(CorrigoError::generation(format!(
                "Endpoint returned {} results for {} inputs",
                parsed.len(),
                expected
            )));
        }

        let mut lists = Vec::with_capacity(parsed.len());
        for candidates in parsed {
            if candidates.is_empty() {
                return Err(CorrigoError::generation(
                    "Endpoint returned an empty candidate list",
                ));
            }
            lists.push(candidates.into_iter().map(|g| g.generated_text).collect());
        }
        Ok(lists)
    }
}

impl Corrector for M2M100Corrector {
    fn from_pretrained(model_name_or_path: &str) -> Result<Self> {
        M2M100Corrector::new(model_name_or_path)
    }

    /// Correct a batch of sentences with one endpoint request per chunk.
    fn batch_correct(
        &mut self,
        sentences: &[String],
        batch_size: usize,
        prefix: &str,
        options: &GenerationOptions,
    ) -> Result<Vec<Vec<String>>> {
        let num_sequences = options.num_return_sequences();

        let mut results = Vec::with_capacity(sentences.len());
        for chunk in sentences.chunks(batch_size.max(1)) {
            let inputs: Vec<String> = chunk.iter().map(|s| format!("{prefix}{s}")).collect();
            for mut candidates in self.request_chunk(inputs, options)? {
                // Anything past the requested sequence count is dropped.
                candidates.truncate(num_sequences);
                results.push(candidates);
            }
        }
        Ok(results)
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}
