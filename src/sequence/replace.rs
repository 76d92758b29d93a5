//! Regex-based value rewriting

use regex::Regex;

use super::{Key, Sequence};
use crate::SequenceError;

/// Rewrites each string element through a regex and a replacement template
///
/// Keys and order pass through untouched; only values change. Capture groups
/// are available to the template as `$1`, `$2`, ... Elements the pattern
/// does not match are passed through unchanged.
#[derive(Debug)]
pub struct PatternReplacer<S: Sequence<Item = String>> {
    inner: S,
    pattern: Regex,
    replacement: String,
    rewritten: Option<String>,
}

impl<S: Sequence<Item = String>> PatternReplacer<S> {
    /// Wrap `inner`, rewriting every element `pattern` matches
    pub fn new(inner: S, pattern: Regex, replacement: impl Into<String>) -> Self {
        let mut replacer = Self {
            inner,
            pattern,
            replacement: replacement.into(),
            rewritten: None,
        };
        replacer.rewrite();
        replacer
    }

    fn rewrite(&mut self) {
        self.rewritten = match self.inner.current() {
            Ok(value) => Some(
                self.pattern
                    .replace_all(value, self.replacement.as_str())
                    .into_owned(),
            ),
            Err(_) => None,
        };
    }
}

impl<S: Sequence<Item = String>> Sequence for PatternReplacer<S> {
    type Item = String;

    fn valid(&self) -> bool {
        self.inner.valid()
    }

    fn current(&self) -> Result<&String, SequenceError> {
        self.rewritten.as_ref().ok_or(SequenceError::EmptySequence)
    }

    fn key(&self) -> Result<Key, SequenceError> {
        self.inner.key()
    }

    fn advance(&mut self) -> Result<(), SequenceError> {
        self.inner.advance()?;
        self.rewrite();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::{collect_pairs, ArraySequence};

    #[test]
    fn swaps_capture_groups() {
        let source = ArraySequence::from_values(vec![
            "test1".to_string(),
            "test2".to_string(),
            "test3".to_string(),
        ]);
        let pattern = Regex::new(r"^(test)(\d+)").unwrap();
        let mut replacer = PatternReplacer::new(source, pattern, "$2:$1");

        let values: Vec<String> = collect_pairs(&mut replacer)
            .unwrap()
            .into_iter()
            .map(|(_, value)| value)
            .collect();
        assert_eq!(values, vec!["1:test", "2:test", "3:test"]);
    }

    #[test]
    fn unmatched_values_pass_through() {
        let source = ArraySequence::from_values(vec!["other".to_string()]);
        let pattern = Regex::new(r"^(test)(\d+)").unwrap();
        let replacer = PatternReplacer::new(source, pattern, "$2:$1");
        assert_eq!(replacer.current().unwrap(), "other");
    }

    #[test]
    fn keys_are_untouched() {
        let source = ArraySequence::from_pairs(vec![("first", "test9".to_string())]);
        let pattern = Regex::new(r"^(test)(\d+)").unwrap();
        let replacer = PatternReplacer::new(source, pattern, "$2:$1");
        assert_eq!(replacer.key().unwrap(), Key::from("first"));
        assert_eq!(replacer.current().unwrap(), "9:test");
    }
}
