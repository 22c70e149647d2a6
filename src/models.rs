//! Registry of pretrained spelling correction models.
//!
//! The registry is a closed set: each entry maps a friendly name to the
//! HuggingFace repository identifier of a published checkpoint, together
//! with the model family that decides which backend runs it. Identifiers
//! are opaque to the rest of the crate and passed through to loaders
//! unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Model family of a pretrained corrector.
///
/// The family decides how a checkpoint is executed: text-to-text models run
/// through the local T5 backend, seq2seq translation-style models through
/// the hosted-endpoint backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelFamily {
    /// Translation-style encoder-decoder (M2M100 architecture).
    Seq2Seq,
    /// Text-to-text encoder-decoder (T5 architecture).
    TextToText,
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelFamily::Seq2Seq => write!(f, "seq2seq"),
            ModelFamily::TextToText => write!(f, "text-to-text"),
        }
    }
}

/// A pretrained corrector known to the registry.
///
/// # Examples
///
/// ```
/// use corrigo::models::AvailableCorrector;
///
/// let model = AvailableCorrector::Ent5Large;
/// assert_eq!(model.repo_id(), "ai-forever/T5-large-spell");
///
/// for model in AvailableCorrector::ALL {
///     println!("{} -> {}", model.name(), model.repo_id());
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AvailableCorrector {
    /// RuM2M100 1.2B parameter checkpoint for Russian.
    #[serde(rename = "m2m100_1B")]
    M2m100_1B,
    /// RuM2M100 418M parameter checkpoint for Russian.
    #[serde(rename = "m2m100_418M")]
    M2m100_418M,
    /// FRED-T5 large checkpoint fine-tuned for Russian spelling.
    #[serde(rename = "fred_large")]
    FredLarge,
    /// English T5 large checkpoint fine-tuned for spelling.
    #[serde(rename = "ent5_large")]
    Ent5Large,
}

impl AvailableCorrector {
    /// All registry entries, in registry order.
    pub const ALL: &'static [AvailableCorrector] = &[
        AvailableCorrector::M2m100_1B,
        AvailableCorrector::M2m100_418M,
        AvailableCorrector::FredLarge,
        AvailableCorrector::Ent5Large,
    ];

    /// The friendly registry name of this entry.
    pub fn name(&self) -> &'static str {
        match self {
            AvailableCorrector::M2m100_1B => "m2m100_1B",
            AvailableCorrector::M2m100_418M => "m2m100_418M",
            AvailableCorrector::FredLarge => "fred_large",
            AvailableCorrector::Ent5Large => "ent5_large",
        }
    }

    /// The HuggingFace repository identifier of the checkpoint.
    pub fn repo_id(&self) -> &'static str {
        match self {
            AvailableCorrector::M2m100_1B => "ai-forever/RuM2M100-1.2B",
            AvailableCorrector::M2m100_418M => "ai-forever/RuM2M100-418M",
            AvailableCorrector::FredLarge => "ai-forever/FRED-T5-large-spell",
            AvailableCorrector::Ent5Large => "ai-forever/T5-large-spell",
        }
    }

    /// The model family, used to pick the backend that runs the checkpoint.
    pub fn family(&self) -> ModelFamily {
        match self {
            AvailableCorrector::M2m100_1B | AvailableCorrector::M2m100_418M => ModelFamily::Seq2Seq,
            AvailableCorrector::FredLarge | AvailableCorrector::Ent5Large => {
                ModelFamily::TextToText
            }
        }
    }

    /// Look up a registry entry by friendly name.
    ///
    /// Returns `None` for names outside the registry; callers decide whether
    /// that is an error or a fall-through to a raw repository identifier.
    pub fn from_name(name: &str) -> Option<AvailableCorrector> {
        Self::ALL.iter().copied().find(|m| m.name() == name)
    }
}

impl fmt::Display for AvailableCorrector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
