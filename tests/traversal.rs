//! Recursive flattening: ordering, depths, abort semantics, filesystem use

use std::collections::BTreeMap;
use std::fs;
use std::io;

use sprig::sequence::{ArraySequence, BoxedSequence};
use sprig::tree::{siblings, Recursive, RecursiveFlattener, TraversalOrder};
use sprig::walk::{self, DirEntry};
use sprig::{Key, Sequence, SequenceError};

use test_helpers::{deep_nav, nested_tree};

fn drain<T: Recursive + 'static>(it: &mut RecursiveFlattener<T>) -> Vec<(String, usize)> {
    let mut out = Vec::new();
    while it.valid() {
        out.push((it.key().unwrap().to_string(), it.depth()));
        it.advance().unwrap();
    }
    out
}

#[test]
fn self_first_scenario_keys_and_depths() {
    let mut it = RecursiveFlattener::new(siblings(nested_tree()), TraversalOrder::SelfFirst)
        .unwrap();

    let mut rows = Vec::new();
    while it.valid() {
        rows.push((
            it.key().unwrap().to_string(),
            it.depth(),
            it.has_children().unwrap(),
        ));
        it.advance().unwrap();
    }

    assert_eq!(
        rows,
        vec![
            ("A".to_string(), 0, true),
            ("B".to_string(), 1, false),
            ("C".to_string(), 1, false),
            ("D".to_string(), 0, false),
        ]
    );
}

#[test]
fn self_first_grouping_by_depth_reproduces_sibling_lists() {
    let mut it =
        RecursiveFlattener::new(siblings(deep_nav()), TraversalOrder::SelfFirst).unwrap();
    let rows = drain(&mut it);

    let mut by_depth: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for (key, depth) in rows {
        by_depth.entry(depth).or_default().push(key);
    }

    assert_eq!(by_depth[&0], vec!["Home", "Fake", "Company"]);
    assert_eq!(by_depth[&1], vec!["Double Fake", "Triple Fake"]);
    assert_eq!(by_depth[&2], vec!["Nested Double Fake", "Doubly Nested"]);
}

#[test]
fn children_first_yields_every_container_after_its_descendants() {
    let mut it =
        RecursiveFlattener::new(siblings(deep_nav()), TraversalOrder::ChildrenFirst).unwrap();
    let keys: Vec<String> = drain(&mut it).into_iter().map(|(key, _)| key).collect();

    let position = |name: &str| keys.iter().position(|key| key == name).unwrap();
    assert!(position("Fake") > position("Double Fake"));
    assert!(position("Fake") > position("Triple Fake"));
    assert!(position("Fake") > position("Nested Double Fake"));
    assert!(position("Double Fake") > position("Nested Double Fake"));
    assert!(position("Double Fake") > position("Doubly Nested"));
    assert_eq!(keys.len(), 7);
}

// A container whose children cannot be accessed: the traversal must abort,
// not retry, and must report the key it failed at.
#[derive(Debug, Clone)]
enum Flaky {
    Leaf(&'static str),
    Bad(&'static str),
}

impl Flaky {
    fn name(&self) -> &'static str {
        match self {
            Flaky::Leaf(name) | Flaky::Bad(name) => name,
        }
    }
}

impl Recursive for Flaky {
    fn is_container(&self) -> bool {
        matches!(self, Flaky::Bad(_))
    }

    fn children(&self) -> Result<BoxedSequence<Self>, SequenceError> {
        Err(SequenceError::Traversal {
            key: self.name().to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        })
    }
}

fn flaky_roots(nodes: Vec<Flaky>) -> BoxedSequence<Flaky> {
    Box::new(ArraySequence::from_entries(
        nodes
            .into_iter()
            .map(|node| (Key::Name(node.name().to_string()), node))
            .collect(),
    ))
}

#[test]
fn child_access_failure_aborts_and_unwinds() {
    let roots = flaky_roots(vec![Flaky::Leaf("ok"), Flaky::Bad("locked"), Flaky::Leaf("rest")]);
    let mut it = RecursiveFlattener::new(roots, TraversalOrder::SelfFirst).unwrap();

    // first element is fine
    assert_eq!(it.key().unwrap().to_string(), "ok");
    it.advance().unwrap();
    assert_eq!(it.key().unwrap().to_string(), "locked");

    // descending into "locked" fails; the stack unwinds and stays down
    let err = it.advance().unwrap_err();
    assert!(matches!(
        err,
        SequenceError::Traversal { ref key, .. } if key == "locked"
    ));
    assert!(!it.valid());
    assert!(matches!(it.advance(), Err(SequenceError::ExhaustedSequence)));
}

#[test]
fn children_first_is_a_safe_deletion_order() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("a/b")).unwrap();
    fs::File::create(dir.path().join("a/one.txt")).unwrap();
    fs::File::create(dir.path().join("a/b/two.txt")).unwrap();
    fs::File::create(dir.path().join("top.txt")).unwrap();

    let mut it = walk::walk(dir.path(), TraversalOrder::ChildrenFirst).unwrap();
    while it.valid() {
        let entry: &DirEntry = it.current().unwrap();
        if entry.is_directory {
            // children-first guarantees the directory is already empty
            fs::remove_dir(&entry.path).unwrap();
        } else {
            fs::remove_file(&entry.path).unwrap();
        }
        it.advance().unwrap();
    }

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn flattener_composes_under_a_filter() {
    let it =
        RecursiveFlattener::new(siblings(nested_tree()), TraversalOrder::SelfFirst).unwrap();
    let mut leaves_only = sprig::FilterPipeline::new(
        it,
        sprig::filter::predicate_fn(|_: &Key, node: &sprig::TreeNode<i32>| !node.is_container()),
    )
    .unwrap();

    let mut keys = Vec::new();
    while leaves_only.valid() {
        keys.push(leaves_only.key().unwrap().to_string());
        leaves_only.advance().unwrap();
    }
    assert_eq!(keys, vec!["B", "C", "D"]);
}
