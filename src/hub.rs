//! Shared HuggingFace Hub access.
//!
//! Model checkpoints and benchmark datasets are both fetched through the
//! synchronous `hf-hub` API. This module centralizes client construction so
//! every download honors the same cache directory resolution.

use hf_hub::api::sync::{Api, ApiBuilder, ApiRepo};
use hf_hub::{Repo, RepoType};

use crate::error::{CorrigoError, Result};

/// Resolve the cache directory for hub downloads.
///
/// Honors `HF_HOME` first, then falls back to `~/.cache/huggingface`, then
/// to a temp directory when no home is available.
pub fn cache_dir() -> String {
    std::env::var("HF_HOME")
        .or_else(|_| std::env::var("HOME").map(|home| format!("{}/.cache/huggingface", home)))
        .unwrap_or_else(|_| "/tmp/huggingface".to_string())
}

/// Build a synchronous hub client with the resolved cache directory.
pub fn api() -> Result<Api> {
    ApiBuilder::new()
        .with_cache_dir(cache_dir().into())
        .build()
        .map_err(|e| CorrigoError::hub(format!("Hub API initialization failed: {}", e)))
}

/// Open a model repository by identifier.
pub fn model_repo(repo_id: &str) -> Result<ApiRepo> {
    Ok(api()?.model(repo_id.to_string()))
}

/// Open a dataset repository by identifier.
pub fn dataset_repo(repo_id: &str) -> Result<ApiRepo> {
    Ok(api()?.repo(Repo::new(repo_id.to_string(), RepoType::Dataset)))
}
