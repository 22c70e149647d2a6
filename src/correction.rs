//! Spelling correction with pretrained models.
//!
//! This module provides a trait-based interface for invoking pretrained
//! spelling correction checkpoints. The crate itself implements no
//! correction algorithm; it binds external models and drives them through a
//! uniform batch interface with an evaluation flow on top.
//!
//! # Feature Flags
//!
//! Backends are heavyweight and opt-in via Cargo features:
//!
//! - `correctors-candle` - local T5 inference through HuggingFace Candle
//! - `correctors-api` - hosted-endpoint inference over HTTP
//!
//! # Usage
//!
//! ## Local T5 checkpoints
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! corrigo = { version = "0.1", features = ["correctors-candle"] }
//! ```
//!
//! Then use:
//! ```no_run
//! # #[cfg(feature = "correctors-candle")]
//! # {
//! use corrigo::correction::{Corrector, GenerationOptions, T5Corrector};
//! use corrigo::models::AvailableCorrector;
//!
//! # fn example() -> corrigo::error::Result<()> {
//! let mut corrector =
//!     T5Corrector::from_pretrained(AvailableCorrector::Ent5Large.repo_id())?;
//!
//! let candidates = corrector.correct(
//!     "Th festeival was excelent",
//!     "",
//!     &GenerationOptions::new(),
//! )?;
//! println!("{}", candidates[0]);
//! # Ok(())
//! # }
//! # }
//! ```
//!
//! ## Hosted M2M100 checkpoints
//!
//! ```no_run
//! # #[cfg(feature = "correctors-api")]
//! # {
//! use corrigo::correction::{Corrector, GenerationOptions, M2M100Corrector};
//! use corrigo::models::AvailableCorrector;
//!
//! # fn example() -> corrigo::error::Result<()> {
//! let mut corrector =
//!     M2M100Corrector::from_pretrained(AvailableCorrector::M2m100_418M.repo_id())?;
//!
//! let metrics = corrector.evaluate(
//!     "RUSpellRU",
//!     32,
//!     "",
//!     "test",
//!     Some(100),
//!     &GenerationOptions::new(),
//! )?;
//! println!("{metrics:?}");
//! # Ok(())
//! # }
//! # }
//! ```
//!
//! ## Custom implementation
//!
//! Only the two required methods need to be written; `correct` and
//! `evaluate` come for free:
//!
//! ```
//! use corrigo::correction::{Corrector, GenerationOptions};
//! use corrigo::error::Result;
//!
//! struct UppercaseCorrector;
//!
//! impl Corrector for UppercaseCorrector {
//!     fn from_pretrained(_model_name_or_path: &str) -> Result<Self> {
//!         Ok(UppercaseCorrector)
//!     }
//!
//!     fn batch_correct(
//!         &mut self,
//!         sentences: &[String],
//!         _batch_size: usize,
//!         prefix: &str,
//!         _options: &GenerationOptions,
//!     ) -> Result<Vec<Vec<String>>> {
//!         Ok(sentences
//!             .iter()
//!             .map(|s| vec![format!("{prefix}{}", s.to_uppercase())])
//!             .collect())
//!     }
//! }
//! ```

pub mod corrector;
pub mod options;

// Candle implementation (requires feature flag)
#[cfg(feature = "correctors-candle")]
pub mod t5;

// Hosted-endpoint implementation (requires feature flag)
#[cfg(feature = "correctors-api")]
pub mod m2m100;

pub use corrector::Corrector;
pub use options::GenerationOptions;

#[cfg(feature = "correctors-candle")]
pub use t5::T5Corrector;

#[cfg(feature = "correctors-api")]
pub use m2m100::M2M100Corrector;
