//! # corrigo
//!
//! Run and evaluate pretrained spelling correction models from Rust.
//!
//! ## Features
//!
//! - Registry of published correction checkpoints
//! - A common corrector contract: load once, correct in batches
//! - Benchmark and on-disk dataset loading
//! - Word-level precision/recall/F1 and exact-match scoring
//!
//! Backends are feature-gated: `correctors-candle` runs T5-family
//! checkpoints locally, `correctors-api` calls hosted M2M100 endpoints.

pub mod cli;
pub mod correction;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod hub;
pub mod models;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
