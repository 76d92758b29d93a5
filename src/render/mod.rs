//! List and tree rendering sinks
//!
//! The sequence machinery produces ordered values; these helpers turn them
//! into the two output shapes the demos need - HTML navigation lists and
//! plain-text directory trees. Values are emitted verbatim; escaping is the
//! caller's concern.

use std::fmt::Display;

use crate::cache::LookaheadCache;
use crate::sequence::Sequence;
use crate::tree::{siblings, Recursive, RecursiveFlattener, TraversalOrder, TreeNode};
use crate::SequenceError;

/// Builds `<ul>`/`<li>` navigation lists with a `class="last"` marker on the
/// final item of every level
#[derive(Debug, Clone)]
pub struct NavBuilder {
    list_id: String,
}

impl NavBuilder {
    /// Nav builder emitting `<ul id="...">` as the outer wrapper
    pub fn new(list_id: impl Into<String>) -> Self {
        Self {
            list_id: list_id.into(),
        }
    }

    /// Flat list from a sequence of `(name, url)` pairs
    ///
    /// Returns an empty string for an empty source: no items, no wrapper.
    pub fn flat<S>(&self, source: S) -> Result<String, SequenceError>
    where
        S: Sequence<Item = String>,
    {
        let mut it = LookaheadCache::new(source)?;
        if !it.valid() {
            return Ok(String::new());
        }

        let mut out = format!("<ul id=\"{}\">\n", self.list_id);
        while it.valid() {
            let class = if it.has_next()? { "" } else { " class=\"last\"" };
            out.push_str(&format!(
                "<li{}><a href=\"{}\">{}</a></li>\n",
                class,
                it.current()?,
                it.key()?
            ));
            it.advance()?;
        }
        out.push_str("</ul>");
        Ok(out)
    }

    /// Nested list from a tree, self-first, closing levels as depth drops
    ///
    /// A sublist opens only where descent will actually happen, so an empty
    /// branch renders like a leaf rather than as a dangling `<ul>`.
    pub fn nested<T>(&self, roots: Vec<TreeNode<T>>) -> Result<String, SequenceError>
    where
        T: Clone + Display + 'static,
    {
        let mut it = RecursiveFlattener::new(siblings(roots), TraversalOrder::SelfFirst)?;
        if !it.valid() {
            return Ok(String::new());
        }

        let mut out = format!("<ul id=\"{}\">\n", self.list_id);
        let mut depth = 0;
        while it.valid() {
            let current_depth = it.depth();
            if current_depth < depth {
                out.push_str(&"</ul></li>".repeat(depth - current_depth));
                out.push('\n');
            }

            let class = if it.has_next()? { "" } else { " class=\"last\"" };
            let name = it.key()?;
            let url = it.current()?.value().to_string();
            out.push_str(&format!("<li{class}><a href=\"{url}\">{name}</a>"));

            if it.current()?.child_count() > 0 {
                out.push_str("<ul>\n");
            } else {
                out.push_str("</li>\n");
            }

            depth = current_depth;
            it.advance()?;
        }

        if depth > 0 {
            out.push_str(&"</ul></li>".repeat(depth));
            out.push('\n');
        }
        out.push_str("</ul>");
        Ok(out)
    }
}

/// Plain-text tree with box-drawing connectors
///
/// Per-level sibling look-ahead picks `├──` against `└──` for the current
/// element and decides whether ancestor columns show a continuation guide.
pub fn render_tree<T, F>(
    it: &mut RecursiveFlattener<T>,
    label: F,
) -> Result<String, SequenceError>
where
    T: Recursive + 'static,
    F: Fn(&T) -> String,
{
    let mut out = String::new();
    while it.valid() {
        let depth = it.depth();
        for level in 0..depth {
            out.push_str(if it.has_next_at(level)? {
                "│   "
            } else {
                "    "
            });
        }
        out.push_str(if it.has_next()? { "├── " } else { "└── " });
        out.push_str(&label(it.current()?));
        out.push('\n');
        it.advance()?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::ArraySequence;

    fn flat_nav() -> ArraySequence<String> {
        ArraySequence::from_pairs(vec![
            ("Home", "/home".to_string()),
            ("Products", "/products".to_string()),
            ("Company", "/company".to_string()),
        ])
    }

    #[test]
    fn flat_marks_only_the_last_item() {
        let html = NavBuilder::new("nav").flat(flat_nav()).unwrap();
        assert_eq!(
            html,
            "<ul id=\"nav\">\n\
             <li><a href=\"/home\">Home</a></li>\n\
             <li><a href=\"/products\">Products</a></li>\n\
             <li class=\"last\"><a href=\"/company\">Company</a></li>\n\
             </ul>"
        );
    }

    #[test]
    fn flat_empty_source_renders_nothing() {
        let html = NavBuilder::new("nav")
            .flat(ArraySequence::<String>::from_values(Vec::new()))
            .unwrap();
        assert!(html.is_empty());
    }

    #[test]
    fn nested_closes_levels_as_depth_drops() {
        let roots = vec![
            TreeNode::branch(
                "Products",
                "#".to_string(),
                vec![
                    TreeNode::leaf("Product 1", "/products/1".to_string()),
                    TreeNode::leaf("Product 2", "/products/2".to_string()),
                ],
            ),
            TreeNode::leaf("Company", "/company".to_string()),
        ];
        let html = NavBuilder::new("nav").nested(roots).unwrap();
        assert_eq!(
            html,
            "<ul id=\"nav\">\n\
             <li><a href=\"#\">Products</a><ul>\n\
             <li><a href=\"/products/1\">Product 1</a></li>\n\
             <li class=\"last\"><a href=\"/products/2\">Product 2</a></li>\n\
             </ul></li>\n\
             <li class=\"last\"><a href=\"/company\">Company</a></li>\n\
             </ul>"
        );
    }

    #[test]
    fn nested_empty_branch_renders_like_a_leaf() {
        let roots = vec![
            TreeNode::branch("Hollow", "#".to_string(), Vec::new()),
            TreeNode::leaf("Tail", "/tail".to_string()),
        ];
        let html = NavBuilder::new("nav").nested(roots).unwrap();
        assert!(html.contains("<li><a href=\"#\">Hollow</a></li>"));
        assert!(!html.contains("<ul>\n</ul>"));
    }

    #[test]
    fn tree_connectors_follow_sibling_lookahead() {
        let roots = vec![
            TreeNode::branch(
                "sub",
                String::new(),
                vec![TreeNode::leaf("inner", String::new())],
            ),
            TreeNode::leaf("tail", String::new()),
        ];
        let mut it =
            RecursiveFlattener::new(siblings(roots), TraversalOrder::SelfFirst).unwrap();
        let text = render_tree(&mut it, |node| node.key().to_string()).unwrap();
        assert_eq!(text, "├── sub\n│   └── inner\n└── tail\n");
    }
}
