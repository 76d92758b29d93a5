//! Depth-tracked traversal over recursive elements
//!
//! The flattener owns a stack of traversal frames, one per depth level. Each
//! frame wraps its level's child sequence in a [`LookaheadCache`], which is
//! what lets `has_next` answer "is there another sibling at this depth" at
//! every open depth simultaneously.

use std::fmt;

use tracing::trace;

use super::Recursive;
use crate::cache::LookaheadCache;
use crate::sequence::{BoxedSequence, Key, Sequence};
use crate::SequenceError;

/// Order in which container elements are yielded relative to their children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Pre-order: a container before its children ("directory before its
    /// files")
    SelfFirst,
    /// Post-order: children before their container (safe deletion order,
    /// deepest first)
    ChildrenFirst,
}

// Lifecycle of a traversal. `Descending` and `Ascending` are transient
// states observed mid-advance; the flattener rests in `Iterating` or `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TraversalState {
    Descending,
    Iterating,
    Ascending,
    Done,
}

// One saved cursor per depth level.
struct Frame<T: Recursive + 'static> {
    cache: LookaheadCache<BoxedSequence<T>>,
    // whether the traversal has entered the children of this frame's
    // current element
    descended: bool,
}

impl<T: Recursive + 'static> Frame<T> {
    fn new(seq: BoxedSequence<T>) -> Result<Self, SequenceError> {
        Ok(Self {
            cache: LookaheadCache::new(seq)?,
            descended: false,
        })
    }
}

/// Depth-tracked, configurable-order traversal over the tree induced by a
/// root sequence of [`Recursive`] elements
///
/// The flattener is itself a [`Sequence`], so it composes under
/// [`FilterPipeline`](crate::FilterPipeline) and
/// [`LookaheadCache`](crate::LookaheadCache) like any other source.
pub struct RecursiveFlattener<T: Recursive + 'static> {
    frames: Vec<Frame<T>>,
    order: TraversalOrder,
    state: TraversalState,
    had_elements: bool,
}

impl<T: Recursive + 'static> RecursiveFlattener<T> {
    /// Begin a traversal over `root` in the given order
    ///
    /// The cursor lands on the first element to yield: the first root
    /// element in `SelfFirst`, its deepest-first descendant in
    /// `ChildrenFirst`. An empty root yields a flattener that is immediately
    /// `!valid()`.
    pub fn new(root: BoxedSequence<T>, order: TraversalOrder) -> Result<Self, SequenceError> {
        let frame = Frame::new(root)?;
        let had_elements = frame.cache.valid();
        let mut flattener = Self {
            frames: vec![frame],
            order,
            state: TraversalState::Iterating,
            had_elements,
        };
        if !had_elements {
            flattener.frames.clear();
            flattener.state = TraversalState::Done;
            return Ok(flattener);
        }
        if order == TraversalOrder::ChildrenFirst {
            if let Err(err) = flattener.descend_to_deepest() {
                return Err(flattener.unwind(err));
            }
        }
        Ok(flattener)
    }

    /// Current stack depth; 0 at the root level
    pub fn depth(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    /// The traversal order this flattener was built with
    pub fn order(&self) -> TraversalOrder {
        self.order
    }

    /// Whether the current element is a container, structurally
    ///
    /// True for containers with empty child sequences too; see
    /// [`Recursive::is_container`].
    pub fn has_children(&self) -> Result<bool, SequenceError> {
        Ok(self.current()?.is_container())
    }

    /// Sibling look-ahead at the current depth
    ///
    /// Answers "is there another sibling at this depth", not "is there
    /// another element anywhere in the tree".
    pub fn has_next(&self) -> Result<bool, SequenceError> {
        self.has_next_at(self.depth())
    }

    /// Sibling look-ahead at any open depth, `0..=depth()`
    ///
    /// Every open level keeps its own look-ahead cache, so ancestors can be
    /// queried mid-traversal - a tree renderer uses this to decide between
    /// continuation and blank indent guides.
    pub fn has_next_at(&self, depth: usize) -> Result<bool, SequenceError> {
        self.frames
            .get(depth)
            .ok_or(SequenceError::EmptySequence)?
            .cache
            .has_next()
    }

    // Push a frame for the current element's children. Returns false when
    // the element is a leaf or an empty container.
    fn try_descend(&mut self) -> Result<bool, SequenceError> {
        let child_seq = {
            let node = self.current()?;
            if !node.is_container() {
                return Ok(false);
            }
            node.children()?
        };
        let frame = Frame::new(child_seq)?;
        if !frame.cache.valid() {
            // empty container: iterates like a leaf
            return Ok(false);
        }
        self.state = TraversalState::Descending;
        if let Some(top) = self.frames.last_mut() {
            top.descended = true;
        }
        trace!(depth = self.frames.len(), "descending");
        self.frames.push(frame);
        Ok(true)
    }

    fn descend_to_deepest(&mut self) -> Result<(), SequenceError> {
        while self.try_descend()? {}
        self.state = TraversalState::Iterating;
        Ok(())
    }

    // Move past the current element within the top frame.
    fn step_top(&mut self) -> Result<(), SequenceError> {
        if let Some(top) = self.frames.last_mut() {
            top.cache.advance()?;
            top.descended = false;
        }
        Ok(())
    }

    // Abort: pop every frame so partially-read child sequences are released.
    fn unwind(&mut self, err: SequenceError) -> SequenceError {
        self.frames.clear();
        self.state = TraversalState::Done;
        err
    }

    fn advance_inner(&mut self) -> Result<(), SequenceError> {
        if self.state == TraversalState::Done || !self.valid() {
            return Err(if self.had_elements {
                SequenceError::ExhaustedSequence
            } else {
                SequenceError::EmptySequence
            });
        }

        // Pre-order yields a container before its children, so the step
        // right after yielding one goes down, not sideways.
        if self.order == TraversalOrder::SelfFirst {
            let already_descended = self.frames.last().map_or(false, |top| top.descended);
            if !already_descended && self.try_descend()? {
                return Ok(());
            }
        }

        self.step_top()?;

        loop {
            if self.frames.last().map_or(false, |top| top.cache.valid()) {
                break;
            }
            // frame exhausted: resume the parent frame
            self.state = TraversalState::Ascending;
            self.frames.pop();
            trace!(depth = self.frames.len(), "ascending");
            if self.frames.is_empty() {
                self.state = TraversalState::Done;
                return Ok(());
            }
            match self.order {
                // post-order: the parent element's children are done, so
                // the parent itself is the next element to yield
                TraversalOrder::ChildrenFirst => {
                    self.state = TraversalState::Iterating;
                    return Ok(());
                }
                // pre-order: the parent element was yielded on the way down
                TraversalOrder::SelfFirst => self.step_top()?,
            }
        }

        self.state = TraversalState::Iterating;
        if self.order == TraversalOrder::ChildrenFirst {
            self.descend_to_deepest()?;
        }
        Ok(())
    }
}

impl<T: Recursive + 'static> Sequence for RecursiveFlattener<T> {
    type Item = T;

    fn valid(&self) -> bool {
        self.frames.last().map_or(false, |top| top.cache.valid())
    }

    fn current(&self) -> Result<&T, SequenceError> {
        self.frames
            .last()
            .ok_or(SequenceError::EmptySequence)?
            .cache
            .current()
    }

    fn key(&self) -> Result<Key, SequenceError> {
        self.frames
            .last()
            .ok_or(SequenceError::EmptySequence)?
            .cache
            .key()
    }

    fn advance(&mut self) -> Result<(), SequenceError> {
        match self.advance_inner() {
            Ok(()) => Ok(()),
            // leave the flattener terminally done; the error itself is the
            // caller's signal to abort
            Err(err) => Err(self.unwind(err)),
        }
    }
}

impl<T: Recursive + 'static> fmt::Debug for RecursiveFlattener<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecursiveFlattener")
            .field("depth", &self.depth())
            .field("order", &self.order)
            .field("state", &self.state)
            .finish()
    }
}
