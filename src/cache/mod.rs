//! One-element look-ahead buffering
//!
//! [`LookaheadCache`] lets a caller ask "is there a next element" before
//! consuming the current one. The inner cursor runs exactly one step ahead of
//! the buffered, externally visible element. The look-ahead step happens once
//! per external advance, never once per `has_next` call, so elements are
//! neither skipped nor observed twice.

use crate::sequence::{Key, Sequence};
use crate::SequenceError;

/// The buffered snapshot held by a [`LookaheadCache`]
///
/// At most one of these exists at any time per cache.
#[derive(Debug, Clone)]
pub struct CachedItem<T> {
    /// Key of the buffered element
    pub key: Key,
    /// The element itself
    pub value: T,
    /// Zero-based position in the traversal
    pub position: usize,
}

/// Wraps a sequence and buffers one element so `has_next` can be answered
/// without consuming anything
///
/// Wrapping any N-element sequence, a full traversal observes exactly N
/// elements; `has_next` is true at every position before the last and false
/// there. This holds when the inner sequence is a
/// [`FilterPipeline`](crate::FilterPipeline) too, since the pipeline parks
/// its cursor on accepted elements only.
#[derive(Debug)]
pub struct LookaheadCache<S: Sequence> {
    inner: S,
    buffered: Option<CachedItem<S::Item>>,
    // count of elements promoted into the buffer so far
    produced: usize,
}

impl<S> LookaheadCache<S>
where
    S: Sequence,
    S::Item: Clone,
{
    /// Wrap `inner`, priming the buffer from its first element
    ///
    /// After construction the inner cursor sits one step past the buffered
    /// element. An empty inner sequence yields a cache that is immediately
    /// `!valid()` - not an error here; per-operation errors surface on
    /// `current`/`has_next`/`advance`.
    pub fn new(mut inner: S) -> Result<Self, SequenceError> {
        let buffered = Self::promote(&mut inner, 0)?;
        let produced = usize::from(buffered.is_some());
        Ok(Self {
            inner,
            buffered,
            produced,
        })
    }

    // Snapshot the inner current element and step the inner cursor past it.
    fn promote(
        inner: &mut S,
        position: usize,
    ) -> Result<Option<CachedItem<S::Item>>, SequenceError> {
        if !inner.valid() {
            return Ok(None);
        }
        let item = CachedItem {
            key: inner.key()?,
            value: inner.current()?.clone(),
            position,
        };
        inner.advance()?;
        Ok(Some(item))
    }

    /// True iff a valid element exists strictly after the current one
    ///
    /// Fails with [`SequenceError::EmptySequence`] when there is no current
    /// element to look ahead from.
    pub fn has_next(&self) -> Result<bool, SequenceError> {
        if self.buffered.is_none() {
            return Err(SequenceError::EmptySequence);
        }
        Ok(self.inner.valid())
    }

    /// Zero-based position of the current element, if any
    pub fn position(&self) -> Option<usize> {
        self.buffered.as_ref().map(|item| item.position)
    }

    /// The buffered snapshot, if any
    pub fn cached(&self) -> Option<&CachedItem<S::Item>> {
        self.buffered.as_ref()
    }

    /// The wrapped sequence (its cursor sits one element ahead of `current`)
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S> Sequence for LookaheadCache<S>
where
    S: Sequence,
    S::Item: Clone,
{
    type Item = S::Item;

    fn valid(&self) -> bool {
        self.buffered.is_some()
    }

    fn current(&self) -> Result<&Self::Item, SequenceError> {
        self.buffered
            .as_ref()
            .map(|item| &item.value)
            .ok_or(SequenceError::EmptySequence)
    }

    fn key(&self) -> Result<Key, SequenceError> {
        self.buffered
            .as_ref()
            .map(|item| item.key.clone())
            .ok_or(SequenceError::EmptySequence)
    }

    fn advance(&mut self) -> Result<(), SequenceError> {
        if self.buffered.is_none() {
            return Err(if self.produced == 0 {
                SequenceError::EmptySequence
            } else {
                SequenceError::ExhaustedSequence
            });
        }
        self.buffered = Self::promote(&mut self.inner, self.produced)?;
        if self.buffered.is_some() {
            self.produced += 1;
        }
        Ok(())
    }
}
