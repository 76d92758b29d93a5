//! Walks a directory (default: the current one) and draws it as a tree,
//! using per-level sibling look-ahead for the connector glyphs.

use std::env;
use std::path::PathBuf;

use sprig::render::render_tree;
use sprig::walk;
use sprig::TraversalOrder;

fn main() -> anyhow::Result<()> {
    let path = env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("."), PathBuf::from);

    let mut it = walk::walk(&path, TraversalOrder::SelfFirst)?;
    println!("{}", path.display());
    print!("{}", render_tree(&mut it, |entry| entry.name.clone())?);
    Ok(())
}
