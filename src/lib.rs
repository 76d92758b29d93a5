//! # Composable lazy sequence pipelines
//!
//! `sprig` implements pull-based sequences that stack into pipelines:
//!
//! 1. **Sources**: array/assoc-backed ([`ArraySequence`]), filesystem-backed
//!    ([`walk`]), or tree-shaped ([`TreeNode`])
//! 2. **Filtering**: transparent predicate skipping ([`FilterPipeline`])
//! 3. **Flattening**: depth-tracked pre/post-order tree traversal
//!    ([`RecursiveFlattener`])
//! 4. **Look-ahead**: one-element buffering ([`LookaheadCache`]) so a caller
//!    can ask "is there a next element" before consuming the current one
//!
//! The outermost wrapper of a pipeline is typically a [`LookaheadCache`]. The
//! recursive flattener applies one per depth level internally, which is what
//! makes "last sibling at this depth" rendering decisions possible.
//!
//! ## Usage example
//!
//! ```
//! use sprig::{ArraySequence, LookaheadCache, Sequence};
//!
//! let nav = ArraySequence::from_pairs(vec![
//!     ("Home", "/home"),
//!     ("Products", "/products"),
//!     ("Company", "/company"),
//! ]);
//!
//! let mut it = LookaheadCache::new(nav)?;
//! while it.valid() {
//!     let marker = if it.has_next()? { "" } else { " (last)" };
//!     println!("{} -> {}{}", it.key()?, it.current()?, marker);
//!     it.advance()?;
//! }
//! # Ok::<(), sprig::SequenceError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

// Core modules - leaves first, each wrapper owns exactly one inner sequence
pub mod sequence; // the pull-based Sequence capability and array-backed sources
pub mod cache;    // one-element look-ahead buffering
pub mod filter;   // transparent predicate filtering
pub mod tree;     // recursive elements and depth-tracked flattening
pub mod walk;     // filesystem-backed tree source
pub mod event;    // publish/subscribe event dispatch
pub mod render;   // list and tree rendering sinks

// Re-exports for convenience
pub use cache::{CachedItem, LookaheadCache};
pub use event::{Event, EventDispatcher, Observer};
pub use filter::{FilterPipeline, FilterPredicate};
pub use sequence::{ArraySequence, BoxedSequence, Key, LimitSequence, Paginator, Sequence};
pub use tree::{Recursive, RecursiveFlattener, TraversalOrder, TreeNode};

use thiserror::Error;

/// Errors surfaced by sequence operations
///
/// Every variant propagates to the immediate caller unmodified; no wrapper
/// retries or swallows. A caller driving a full traversal should treat any of
/// these as "abort and report" - the pull model holds no buffered work to
/// roll back, so whatever was rendered before the error is still valid.
#[derive(Error, Debug)]
pub enum SequenceError {
    /// Operation attempted on an empty or never-started sequence
    #[error("sequence has no current element")]
    EmptySequence,

    /// Advance attempted past the end of a sequence that had elements
    #[error("advance past the end of the sequence")]
    ExhaustedSequence,

    /// A filter predicate could not be evaluated for an element
    #[error("predicate evaluation failed at `{key}`: {reason}")]
    PredicateEvaluation {
        /// Key of the element the predicate was applied to
        key: String,
        /// What went wrong
        reason: String,
    },

    /// A child sequence could not be accessed during recursive descent
    #[error("traversal failed at `{key}`")]
    Traversal {
        /// Key or path at which the descent failed
        key: String,
        /// Underlying access error
        #[source]
        source: std::io::Error,
    },
}
