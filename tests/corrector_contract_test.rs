#[cfg(test)]
mod tests {
    use corrigo::correction::{Corrector, GenerationOptions};
    use corrigo::error::Result;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    /// Corrector with a fixed repair table; sentences outside the table
    /// pass through unchanged. Records the inputs it is handed so tests
    /// can check what reached the model.
    struct TableCorrector {
        repairs: HashMap<String, String>,
        inputs_seen: Vec<String>,
    }

    impl TableCorrector {
        fn new(repairs: &[(&str, &str)]) -> TableCorrector {
            TableCorrector {
                repairs: repairs
                    .iter()
                    .map(|(source, target)| (source.to_string(), target.to_string()))
                    .collect(),
                inputs_seen: Vec::new(),
            }
        }
    }

    impl Corrector for TableCorrector {
        fn from_pretrained(_model_name_or_path: &str) -> Result<Self> {
            Ok(TableCorrector::new(&[]))
        }

        fn batch_correct(
            &mut self,
            sentences: &[String],
            batch_size: usize,
            prefix: &str,
            options: &GenerationOptions,
        ) -> Result<Vec<Vec<String>>> {
            let num_candidates = options.num_return_sequences();
            let mut results = Vec::with_capacity(sentences.len());
            for chunk in sentences.chunks(batch_size.max(1)) {
                for sentence in chunk {
                    self.inputs_seen.push(format!("{prefix}{sentence}"));
                    let best = self
                        .repairs
                        .get(sentence.as_str())
                        .cloned()
                        .unwrap_or_else(|| sentence.clone());
                    let mut candidates = vec![best];
                    for alt in 1..num_candidates {
                        candidates.push(format!("{sentence} [alt {alt}]"));
                    }
                    results.push(candidates);
                }
            }
            Ok(results)
        }
    }

    #[test]
    fn test_correct_single_sentence() {
        // 1. Build a corrector that knows one repair
        let mut corrector = TableCorrector::new(&[("tehre is a mstake", "there is a mistake")]);

        // 2. Correct a single sentence
        let candidates = corrector
            .correct("tehre is a mstake", "", &GenerationOptions::new())
            .unwrap();

        // 3. One candidate by default, the repaired sentence
        assert_eq!(candidates, vec!["there is a mistake".to_string()]);
    }

    #[test]
    fn test_correct_returns_requested_candidates() {
        let mut corrector = TableCorrector::new(&[("speling", "spelling")]);
        let options = GenerationOptions::new().set("num_return_sequences", 3);

        let candidates = corrector.correct("speling", "", &options).unwrap();

        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0], "spelling");
    }

    #[test]
    fn test_evaluate_csv_dataset_end_to_end() {
        // 1. Write a labeled dataset in the CSV layout
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("data.csv"),
            "source,correction\n\
             tehre is a mstake,there is a mistake\n\
             the weather is nise,the weather is nice\n",
        )
        .unwrap();

        // 2. Evaluate a corrector that repairs both sentences
        let mut corrector = TableCorrector::new(&[
            ("tehre is a mstake", "there is a mistake"),
            ("the weather is nise", "the weather is nice"),
        ]);
        let metrics = corrector
            .evaluate(
                dir.path().to_str().unwrap(),
                32,
                "",
                "test",
                None,
                &GenerationOptions::new(),
            )
            .unwrap();

        // 3. Every repair matches the reference exactly
        assert_eq!(metrics["precision"], 1.0);
        assert_eq!(metrics["recall"], 1.0);
        assert_eq!(metrics["f1"], 1.0);
        assert_eq!(metrics["exact_match"], 1.0);
    }

    #[test]
    fn test_evaluate_partial_corrector() {
        // 1. Two pairs: one needs two word repairs, one needs none
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("sources.txt"), "tehre is a mstake\ngood day\n").unwrap();
        fs::write(
            dir.path().join("corrections.txt"),
            "there is a mistake\ngood day\n",
        )
        .unwrap();

        // 2. The corrector repairs only the first word
        let mut corrector = TableCorrector::new(&[("tehre is a mstake", "there is a mstake")]);
        let metrics = corrector
            .evaluate(
                dir.path().to_str().unwrap(),
                32,
                "",
                "test",
                None,
                &GenerationOptions::new(),
            )
            .unwrap();

        // 3. One true positive, one missed repair, no spurious edits
        assert_eq!(metrics["precision"], 1.0);
        assert_eq!(metrics["recall"], 0.5);
        assert!((metrics["f1"] - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(metrics["exact_match"], 0.5);
    }

    #[test]
    fn test_evaluate_prefixes_every_sentence() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("sources.txt"), "speling\ngrammer\n").unwrap();
        fs::write(dir.path().join("corrections.txt"), "spelling\ngrammar\n").unwrap();

        let mut corrector = TableCorrector::new(&[]);
        corrector
            .evaluate(
                dir.path().to_str().unwrap(),
                32,
                "grammar: ",
                "test",
                None,
                &GenerationOptions::new(),
            )
            .unwrap();

        assert_eq!(
            corrector.inputs_seen,
            vec!["grammar: speling".to_string(), "grammar: grammer".to_string()]
        );
    }
}
