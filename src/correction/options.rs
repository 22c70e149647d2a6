//! Generation options passed through to correction backends.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An open-ended set of generation parameters.
///
/// Options are name/value pairs whose semantics belong to the backend that
/// consumes them; unknown names are carried along untouched so callers can
/// address whatever knobs their model supports. The only name the core
/// itself inspects is `num_return_sequences`, which controls how many
/// candidates each input sentence produces.
///
/// Serializes transparently as a JSON object, which is also the wire form
/// the hosted-endpoint backend forwards.
///
/// # Examples
///
/// ```
/// use corrigo::correction::GenerationOptions;
///
/// let options = GenerationOptions::new()
///     .set("temperature", 0.7)
///     .set("num_return_sequences", 3);
///
/// assert_eq!(options.num_return_sequences(), 3);
/// assert_eq!(options.get_f64("temperature"), Some(0.7));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenerationOptions {
    params: BTreeMap<String, Value>,
}

impl GenerationOptions {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, replacing any previous value under the same name.
    pub fn set<K: Into<String>, V: Into<Value>>(mut self, name: K, value: V) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Look up a raw option value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    /// Look up an option as an unsigned integer.
    pub fn get_u64(&self, name: &str) -> Option<u64> {
        self.params.get(name).and_then(Value::as_u64)
    }

    /// Look up an option as a float. Integer values convert.
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.params.get(name).and_then(Value::as_f64)
    }

    /// Number of candidate sequences requested per input sentence.
    ///
    /// Missing, zero or non-integer values count as one.
    pub fn num_return_sequences(&self) -> usize {
        self.get_u64("num_return_sequences")
            .map(|n| n as usize)
            .unwrap_or(1)
            .max(1)
    }

    /// Whether any options are set.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Number of options set.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Iterate over all option pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.params.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let options = GenerationOptions::new();
        assert!(options.is_empty());
        assert_eq!(options.len(), 0);
        assert_eq!(options.get("temperature"), None);
    }

    #[test]
    fn test_set_and_get() {
        let options = GenerationOptions::new()
            .set("temperature", 0.7)
            .set("seed", 42)
            .set("do_sample", true);

        assert_eq!(options.len(), 3);
        assert_eq!(options.get_f64("temperature"), Some(0.7));
        assert_eq!(options.get_u64("seed"), Some(42));
        assert_eq!(options.get("do_sample"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_set_replaces() {
        let options = GenerationOptions::new().set("seed", 1).set("seed", 2);
        assert_eq!(options.len(), 1);
        assert_eq!(options.get_u64("seed"), Some(2));
    }

    #[test]
    fn test_num_return_sequences() {
        assert_eq!(GenerationOptions::new().num_return_sequences(), 1);
        assert_eq!(
            GenerationOptions::new()
                .set("num_return_sequences", 3)
                .num_return_sequences(),
            3
        );
        // Zero would break per-input alignment, so it counts as one.
        assert_eq!(
            GenerationOptions::new()
                .set("num_return_sequences", 0)
                .num_return_sequences(),
            1
        );
        // So does a value of the wrong type.
        assert_eq!(
            GenerationOptions::new()
                .set("num_return_sequences", "three")
                .num_return_sequences(),
            1
        );
    }

    #[test]
    fn test_integer_reads_as_float() {
        let options = GenerationOptions::new().set("temperature", 1);
        assert_eq!(options.get_f64("temperature"), Some(1.0));
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let options = GenerationOptions::new()
            .set("num_return_sequences", 2)
            .set("temperature", 0.5);
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"{"num_return_sequences":2,"temperature":0.5}"#);

        let back: GenerationOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }
}
