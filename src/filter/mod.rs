//! Transparent predicate filtering
//!
//! A [`FilterPipeline`] skips rejected elements so downstream consumers only
//! ever see accepted ones. The pipeline holds no buffer of its own: after
//! construction and after every advance the inner cursor is parked on an
//! accepted element (or exhausted), and `current`/`key` read straight through
//! to it. That is what makes it safe to wrap a pipeline in a
//! [`LookaheadCache`](crate::LookaheadCache): the cache only needs
//! `valid`/`current`/`advance`, never any buffering guarantee from below.

mod predicates;

pub use predicates::{
    ExtensionFilter, FieldReject, KeyPattern, PathPattern, SkipHidden, ValuePattern,
};

use std::fmt;

use crate::sequence::{Key, Sequence};
use crate::SequenceError;

/// Decides whether an element is visible downstream
///
/// Predicates see the raw underlying element - rejected ones included - which
/// is what path-based exclusions need. Plain closures are wrapped by
/// [`predicate_fn`]; implement the trait directly when evaluation itself can
/// fail.
pub trait FilterPredicate<T> {
    /// `Ok(true)` keeps the element visible, `Ok(false)` skips it
    ///
    /// Failures must surface as [`SequenceError::PredicateEvaluation`]; a
    /// predicate that cannot be evaluated never silently accepts or rejects.
    fn accept(&self, key: &Key, item: &T) -> Result<bool, SequenceError>;
}

/// Adapter turning a plain `Fn(&Key, &T) -> bool` closure into a
/// [`FilterPredicate`]
#[derive(Clone)]
pub struct FnPredicate<F>(F);

impl<F> fmt::Debug for FnPredicate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnPredicate")
    }
}

impl<T, F> FilterPredicate<T> for FnPredicate<F>
where
    F: Fn(&Key, &T) -> bool,
{
    fn accept(&self, key: &Key, item: &T) -> Result<bool, SequenceError> {
        Ok((self.0)(key, item))
    }
}

/// Wrap an infallible closure as a predicate
pub fn predicate_fn<F>(f: F) -> FnPredicate<F> {
    FnPredicate(f)
}

type KeyMap<T> = Box<dyn Fn(&Key, &T) -> Key>;

/// Wraps a sequence and a predicate; rejected elements are skipped
/// transparently on every advance
pub struct FilterPipeline<S: Sequence, P> {
    inner: S,
    predicate: P,
    key_map: Option<KeyMap<S::Item>>,
    produced_any: bool,
}

impl<S, P> FilterPipeline<S, P>
where
    S: Sequence,
    P: FilterPredicate<S::Item>,
{
    /// Wrap `inner`, skipping ahead to the first accepted element
    pub fn new(inner: S, predicate: P) -> Result<Self, SequenceError> {
        let mut pipeline = Self {
            inner,
            predicate,
            key_map: None,
            produced_any: false,
        };
        pipeline.skip_rejected()?;
        Ok(pipeline)
    }

    /// Derive `key()` from the element instead of the raw positional key
    ///
    /// A per-instance choice, used by path-matching pipelines that want the
    /// full path as the key rather than a bare file name or index.
    pub fn with_key_map(mut self, map: impl Fn(&Key, &S::Item) -> Key + 'static) -> Self {
        self.key_map = Some(Box::new(map));
        self
    }

    /// The wrapped sequence, parked on the current accepted element
    pub fn inner(&self) -> &S {
        &self.inner
    }

    // Invariant on return: inner is on an accepted element or exhausted.
    fn skip_rejected(&mut self) -> Result<(), SequenceError> {
        while self.inner.valid() {
            let key = self.inner.key()?;
            if self.predicate.accept(&key, self.inner.current()?)? {
                self.produced_any = true;
                return Ok(());
            }
            self.inner.advance()?;
        }
        Ok(())
    }
}

impl<S, P> Sequence for FilterPipeline<S, P>
where
    S: Sequence,
    P: FilterPredicate<S::Item>,
{
    type Item = S::Item;

    fn valid(&self) -> bool {
        self.inner.valid()
    }

    fn current(&self) -> Result<&Self::Item, SequenceError> {
        self.inner.current()
    }

    fn key(&self) -> Result<Key, SequenceError> {
        let raw = self.inner.key()?;
        match &self.key_map {
            Some(map) => Ok(map(&raw, self.inner.current()?)),
            None => Ok(raw),
        }
    }

    fn advance(&mut self) -> Result<(), SequenceError> {
        if !self.inner.valid() {
            return Err(if self.produced_any {
                SequenceError::ExhaustedSequence
            } else {
                SequenceError::EmptySequence
            });
        }
        self.inner.advance()?;
        self.skip_rejected()
    }
}

impl<S, P> fmt::Debug for FilterPipeline<S, P>
where
    S: Sequence + fmt::Debug,
    P: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterPipeline")
            .field("inner", &self.inner)
            .field("predicate", &self.predicate)
            .field("key_map", &self.key_map.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::{collect_pairs, ArraySequence};

    #[test]
    fn skips_rejected_elements_in_order() {
        let source = ArraySequence::from_values(vec![1, 2, 3, 4, 5, 6]);
        let mut evens =
            FilterPipeline::new(source, predicate_fn(|_: &Key, item: &i32| item % 2 == 0))
                .unwrap();

        // the live inner cursor is parked on the first accepted element
        assert_eq!(*evens.inner().current().unwrap(), 2);

        let visible: Vec<i32> = collect_pairs(&mut evens)
            .unwrap()
            .into_iter()
            .map(|(_, item)| item)
            .collect();
        assert_eq!(visible, vec![2, 4, 6]);
    }

    #[test]
    fn all_rejected_means_never_valid() {
        let source = ArraySequence::from_values(vec![1, 3, 5]);
        let mut none =
            FilterPipeline::new(source, predicate_fn(|_: &Key, item: &i32| item % 2 == 0))
                .unwrap();
        assert!(!none.valid());
        assert!(matches!(none.advance(), Err(SequenceError::EmptySequence)));
    }

    #[test]
    fn key_map_overrides_the_raw_key() {
        let source = ArraySequence::from_values(vec!["a", "b"]);
        let mut seq = FilterPipeline::new(source, predicate_fn(|_: &Key, _: &&str| true))
            .unwrap()
            .with_key_map(|key, item| Key::Name(format!("/root/{key}/{item}")));
        assert_eq!(seq.key().unwrap(), Key::from("/root/0/a"));
        seq.advance().unwrap();
        assert_eq!(seq.key().unwrap(), Key::from("/root/1/b"));
    }

    #[test]
    fn predicate_errors_propagate_unmodified() {
        struct FailAt(usize);
        impl FilterPredicate<i32> for FailAt {
            fn accept(&self, key: &Key, _: &i32) -> Result<bool, SequenceError> {
                if *key == Key::Index(self.0) {
                    return Err(SequenceError::PredicateEvaluation {
                        key: key.to_string(),
                        reason: "unreadable element".to_string(),
                    });
                }
                Ok(true)
            }
        }

        let source = ArraySequence::from_values(vec![10, 20, 30]);
        let mut seq = FilterPipeline::new(source, FailAt(2)).unwrap();
        seq.advance().unwrap();
        let err = seq.advance().unwrap_err();
        assert!(matches!(
            err,
            SequenceError::PredicateEvaluation { ref key, .. } if key == "2"
        ));
    }

    #[test]
    fn advance_past_end_reports_exhaustion() {
        let source = ArraySequence::from_values(vec![2]);
        let mut seq =
            FilterPipeline::new(source, predicate_fn(|_: &Key, item: &i32| item % 2 == 0))
                .unwrap();
        seq.advance().unwrap();
        assert!(matches!(seq.advance(), Err(SequenceError::ExhaustedSequence)));
    }
}
