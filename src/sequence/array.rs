//! Array and associative-array backed sequences

use super::{Key, Sequence};
use crate::SequenceError;

/// Finite, restartable sequence over an in-memory list of keyed entries
///
/// Insertion order is iteration order. This is the one sequence type that is
/// explicitly restartable: [`ArraySequence::rewind`] resets the cursor to the
/// first element.
#[derive(Debug, Clone)]
pub struct ArraySequence<T> {
    entries: Vec<(Key, T)>,
    cursor: usize,
}

impl<T> ArraySequence<T> {
    /// Sequence over plain values, keyed by insertion index
    pub fn from_values(values: Vec<T>) -> Self {
        let entries = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| (Key::Index(index), value))
            .collect();
        Self { entries, cursor: 0 }
    }

    /// Sequence over `(name, value)` pairs, keyed by name
    pub fn from_pairs<K: Into<String>>(pairs: Vec<(K, T)>) -> Self {
        let entries = pairs
            .into_iter()
            .map(|(name, value)| (Key::Name(name.into()), value))
            .collect();
        Self { entries, cursor: 0 }
    }

    /// Sequence over already-keyed entries
    pub fn from_entries(entries: Vec<(Key, T)>) -> Self {
        Self { entries, cursor: 0 }
    }

    /// Number of entries, independent of cursor position
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the backing array holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reset the cursor to the first element
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Give up the backing entries
    pub fn into_entries(self) -> Vec<(Key, T)> {
        self.entries
    }
}

impl<T> Sequence for ArraySequence<T> {
    type Item = T;

    fn valid(&self) -> bool {
        self.cursor < self.entries.len()
    }

    fn current(&self) -> Result<&T, SequenceError> {
        self.entries
            .get(self.cursor)
            .map(|(_, value)| value)
            .ok_or(SequenceError::EmptySequence)
    }

    fn key(&self) -> Result<Key, SequenceError> {
        self.entries
            .get(self.cursor)
            .map(|(key, _)| key.clone())
            .ok_or(SequenceError::EmptySequence)
    }

    fn advance(&mut self) -> Result<(), SequenceError> {
        if self.valid() {
            self.cursor += 1;
            return Ok(());
        }
        if self.entries.is_empty() {
            Err(SequenceError::EmptySequence)
        } else {
            Err(SequenceError::ExhaustedSequence)
        }
    }
}
