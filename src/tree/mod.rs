//! Tree-shaped elements and depth-tracked flattening
//!
//! A tree here is induced, not stored: any element implementing
//! [`Recursive`] can expose a child sequence of its own type, and
//! [`RecursiveFlattener`] walks the induced tree with an explicit frame
//! stack. Depth is a property of the traversal path, never of the node.

mod flatten;

pub use flatten::{RecursiveFlattener, TraversalOrder};

use crate::sequence::{ArraySequence, BoxedSequence, Key};
use crate::SequenceError;

/// An element that may expose children of its own type
pub trait Recursive: Clone {
    /// Structural kind: true for container elements, even ones with no
    /// children
    ///
    /// An empty container iterates like a leaf but still reports true here,
    /// so a renderer can tell "directory" from "file". This is a deliberate
    /// choice; the alternative ("has at least one child") is reported by the
    /// traversal itself descending or not.
    fn is_container(&self) -> bool;

    /// The element's own child sequence
    ///
    /// Leaves return an empty sequence. Access failures (an unreadable
    /// directory, say) surface as [`SequenceError::Traversal`] tagged with
    /// the key at which the descent failed.
    fn children(&self) -> Result<BoxedSequence<Self>, SequenceError>;
}

/// In-memory tree node: a leaf value or a branch with ordered children
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode<T> {
    /// Terminal node
    Leaf {
        /// Identity within the sibling list
        key: Key,
        /// Payload
        value: T,
    },
    /// Container node with an ordered child list
    Branch {
        /// Identity within the sibling list
        key: Key,
        /// Payload
        value: T,
        /// Ordered children; may be empty, the node is a container either way
        children: Vec<TreeNode<T>>,
    },
}

impl<T> TreeNode<T> {
    /// Leaf constructor
    pub fn leaf(key: impl Into<Key>, value: T) -> Self {
        TreeNode::Leaf {
            key: key.into(),
            value,
        }
    }

    /// Branch constructor
    pub fn branch(key: impl Into<Key>, value: T, children: Vec<TreeNode<T>>) -> Self {
        TreeNode::Branch {
            key: key.into(),
            value,
            children,
        }
    }

    /// The node's identity within its sibling list
    pub fn key(&self) -> &Key {
        match self {
            TreeNode::Leaf { key, .. } | TreeNode::Branch { key, .. } => key,
        }
    }

    /// The node's payload
    pub fn value(&self) -> &T {
        match self {
            TreeNode::Leaf { value, .. } | TreeNode::Branch { value, .. } => value,
        }
    }

    /// Number of direct children (0 for leaves and empty branches)
    pub fn child_count(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Branch { children, .. } => children.len(),
        }
    }
}

impl<T: Clone + 'static> Recursive for TreeNode<T> {
    fn is_container(&self) -> bool {
        matches!(self, TreeNode::Branch { .. })
    }

    fn children(&self) -> Result<BoxedSequence<Self>, SequenceError> {
        let entries = match self {
            TreeNode::Leaf { .. } => Vec::new(),
            TreeNode::Branch { children, .. } => children
                .iter()
                .map(|child| (child.key().clone(), child.clone()))
                .collect(),
        };
        Ok(Box::new(ArraySequence::from_entries(entries)))
    }
}

/// Root sequence over a sibling list, ready to feed a flattener
pub fn siblings<T: Clone + 'static>(nodes: Vec<TreeNode<T>>) -> BoxedSequence<TreeNode<T>> {
    let entries = nodes
        .into_iter()
        .map(|node| (node.key().clone(), node))
        .collect();
    Box::new(ArraySequence::from_entries(entries))
}
