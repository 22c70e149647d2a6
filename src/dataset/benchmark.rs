//! Known spellcheck benchmarks hosted on the HuggingFace Hub.
//!
//! Benchmarks live in a single dataset repository with one directory per
//! benchmark and one CSV file per split (`<Name>/<split>.csv`), using the
//! same `source`/`correction` columns as local `data.csv` datasets.

use crate::dataset::{self, EvaluationDataset};
use crate::error::{CorrigoError, Result};
use crate::hub;

/// Dataset repository holding all benchmark splits.
pub const BENCHMARK_REPO_ID: &str = "ai-forever/spellcheck_benchmark";

/// A benchmark dataset known to the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpellcheckBenchmark {
    /// Social media and blog posts (Russian).
    RuSpellRu,
    /// Multi-domain gold annotations (Russian).
    MultidomainGold,
    /// Medical anamnesis records (Russian).
    MedSpellchecker,
    /// GitHub commit messages and code comments (Russian).
    GithubTypoCorpusRu,
}

impl SpellcheckBenchmark {
    /// All known benchmarks.
    pub const ALL: &'static [SpellcheckBenchmark] = &[
        SpellcheckBenchmark::RuSpellRu,
        SpellcheckBenchmark::MultidomainGold,
        SpellcheckBenchmark::MedSpellchecker,
        SpellcheckBenchmark::GithubTypoCorpusRu,
    ];

    /// The benchmark name as it appears in references and the repository.
    pub fn name(&self) -> &'static str {
        match self {
            SpellcheckBenchmark::RuSpellRu => "RUSpellRU",
            SpellcheckBenchmark::MultidomainGold => "MultidomainGold",
            SpellcheckBenchmark::MedSpellchecker => "MedSpellchecker",
            SpellcheckBenchmark::GithubTypoCorpusRu => "GitHubTypoCorpusRu",
        }
    }

    /// Look up a benchmark by name.
    pub fn from_name(name: &str) -> Option<SpellcheckBenchmark> {
        Self::ALL.iter().copied().find(|b| b.name() == name)
    }

    /// Repository-relative path of one split's CSV file.
    pub fn split_file(&self, split: &str) -> String {
        format!("{}/{}.csv", self.name(), split)
    }
}

impl std::fmt::Display for SpellcheckBenchmark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Download one split of a benchmark and load it.
///
/// The file lands in the shared hub cache, so repeated loads of the same
/// split do not re-download.
///
/// # Errors
///
/// Hub errors when the download fails, dataset format errors when the
/// downloaded file does not parse.
pub fn load(benchmark: SpellcheckBenchmark, split: &str) -> Result<EvaluationDataset> {
    let repo = hub::dataset_repo(BENCHMARK_REPO_ID)?;
    let file = benchmark.split_file(split);
    let local_path = repo.get(&file).map_err(|e| {
        CorrigoError::hub(format!(
            "Failed to download '{}' split '{}' ({}): {}",
            benchmark.name(),
            split,
            file,
            e
        ))
    })?;

    dataset::read_csv_dataset(&local_path)
}
