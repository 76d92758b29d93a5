//! Bounded windows and pagination

use super::{ArraySequence, Key, Sequence};
use crate::SequenceError;

/// Exposes a bounded window `[offset, offset + limit)` of an inner sequence
///
/// Seeking past the end of the inner sequence yields an empty window rather
/// than an error; that is what a paginator wants for an out-of-range page.
#[derive(Debug)]
pub struct LimitSequence<S: Sequence> {
    inner: S,
    limit: usize,
    taken: usize,
    had_elements: bool,
}

impl<S: Sequence> LimitSequence<S> {
    /// Skip `offset` elements of `inner`, then expose at most `limit`
    pub fn new(mut inner: S, offset: usize, limit: usize) -> Result<Self, SequenceError> {
        for _ in 0..offset {
            if !inner.valid() {
                break;
            }
            inner.advance()?;
        }
        let had_elements = limit > 0 && inner.valid();
        Ok(Self {
            inner,
            limit,
            taken: 0,
            had_elements,
        })
    }
}

impl<S: Sequence> Sequence for LimitSequence<S> {
    type Item = S::Item;

    fn valid(&self) -> bool {
        self.taken < self.limit && self.inner.valid()
    }

    fn current(&self) -> Result<&Self::Item, SequenceError> {
        if !self.valid() {
            return Err(SequenceError::EmptySequence);
        }
        self.inner.current()
    }

    fn key(&self) -> Result<Key, SequenceError> {
        if !self.valid() {
            return Err(SequenceError::EmptySequence);
        }
        self.inner.key()
    }

    fn advance(&mut self) -> Result<(), SequenceError> {
        if !self.valid() {
            return Err(if self.had_elements {
                SequenceError::ExhaustedSequence
            } else {
                SequenceError::EmptySequence
            });
        }
        self.taken += 1;
        if self.taken < self.limit {
            self.inner.advance()?;
        }
        Ok(())
    }
}

/// Page arithmetic over an array-backed source
///
/// `page(n)` hands back a fresh [`LimitSequence`] over a copy of the backing
/// entries, so pages are independent sequences and can be rendered in any
/// order.
#[derive(Debug, Clone)]
pub struct Paginator<T: Clone> {
    entries: Vec<(Key, T)>,
    per_page: usize,
    current_page: usize,
}

impl<T: Clone> Paginator<T> {
    /// Paginate `source` with `per_page` items per page, starting at page 1
    pub fn new(source: ArraySequence<T>, per_page: usize) -> Self {
        Self {
            entries: source.into_entries(),
            per_page: per_page.max(1),
            current_page: 1,
        }
    }

    /// Total number of pages; at least 1, even for an empty source
    pub fn total_pages(&self) -> usize {
        if self.entries.len() <= self.per_page {
            1
        } else {
            (self.entries.len() + self.per_page - 1) / self.per_page
        }
    }

    /// The page the paginator currently points at (1-based)
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Point at `page`, clamped to at least 1
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// Items per page
    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// True if a page exists after the current one
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// True if a page exists before the current one
    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    /// The window for `page` (1-based; 0 is treated as 1)
    pub fn page(&self, page: usize) -> Result<LimitSequence<ArraySequence<T>>, SequenceError> {
        let page = page.max(1);
        let offset = (page - 1) * self.per_page;
        LimitSequence::new(
            ArraySequence::from_entries(self.entries.clone()),
            offset,
            self.per_page,
        )
    }
}
