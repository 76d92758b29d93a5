use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use regex::Regex;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use sprig::filter::{ExtensionFilter, PathPattern};
use sprig::render::{render_tree, NavBuilder};
use sprig::sequence::{ArraySequence, Paginator};
use sprig::tree::TreeNode;
use sprig::walk::{self, DirEntry};
use sprig::{FilterPipeline, Sequence, TraversalOrder};

#[derive(Parser, Debug)]
#[command(
    name = "sprig",
    about = "Lazy sequence pipelines over arrays, trees, and directories"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a recursive directory tree
    Tree {
        /// Directory to walk
        path: PathBuf,
        /// Yield directories after their contents (deletion-safe order)
        #[arg(long)]
        children_first: bool,
        /// Emit one JSON record per entry instead of a drawn tree
        #[arg(long)]
        json: bool,
    },
    /// Recursively find entries matching a pattern or extension
    Find {
        /// Directory to search
        path: PathBuf,
        /// Regex matched against the full path
        #[arg(long)]
        pattern: Option<String>,
        /// File extension to keep (directories always pass)
        #[arg(long)]
        ext: Option<String>,
        /// Treat --ext as a blacklist instead of a whitelist
        #[arg(long)]
        invert: bool,
    },
    /// Render a nested JSON object as an HTML navigation list
    Nav {
        /// JSON file holding an object of name -> url or nested object
        file: PathBuf,
        /// id attribute for the outer list
        #[arg(long, default_value = "nav")]
        id: String,
    },
    /// Paginate the lines of a file
    Page {
        /// File to page through
        file: PathBuf,
        /// Page to display (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Lines per page
        #[arg(long, default_value_t = 10)]
        per_page: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Tree {
            path,
            children_first,
            json,
        } => run_tree(path, children_first, json),
        Commands::Find {
            path,
            pattern,
            ext,
            invert,
        } => run_find(path, pattern, ext, invert),
        Commands::Nav { file, id } => run_nav(file, id),
        Commands::Page {
            file,
            page,
            per_page,
        } => run_page(file, page, per_page),
    }
}

#[derive(Serialize)]
struct TreeRecord {
    depth: usize,
    key: String,
    path: String,
    directory: bool,
}

fn run_tree(path: PathBuf, children_first: bool, json: bool) -> Result<()> {
    let order = if children_first {
        TraversalOrder::ChildrenFirst
    } else {
        TraversalOrder::SelfFirst
    };
    let mut it = walk::walk(&path, order)
        .with_context(|| format!("failed to walk {}", path.display()))?;

    if json {
        while it.valid() {
            let entry = it.current()?;
            let record = TreeRecord {
                depth: it.depth(),
                key: it.key()?.to_string(),
                path: entry.path.display().to_string(),
                directory: entry.is_directory,
            };
            println!("{}", serde_json::to_string(&record)?);
            it.advance()?;
        }
    } else {
        print!("{}", render_tree(&mut it, |entry| entry.name.clone())?);
    }
    Ok(())
}

fn run_find(
    path: PathBuf,
    pattern: Option<String>,
    ext: Option<String>,
    invert: bool,
) -> Result<()> {
    let it = walk::walk(&path, TraversalOrder::SelfFirst)
        .with_context(|| format!("failed to walk {}", path.display()))?;

    // stack the requested filters; each wraps the previous stage
    let mut seq: Box<dyn Sequence<Item = DirEntry>> = Box::new(it);
    if let Some(ext) = ext {
        let filter = if invert {
            ExtensionFilter::blacklist([ext])
        } else {
            ExtensionFilter::whitelist([ext])
        };
        seq = Box::new(FilterPipeline::new(seq, filter)?);
    }
    if let Some(pattern) = pattern {
        let regex = Regex::new(&pattern).context("invalid --pattern regex")?;
        seq = Box::new(FilterPipeline::new(seq, PathPattern::new(regex))?);
    }

    while seq.valid() {
        println!("{}", seq.current()?.path.display());
        seq.advance()?;
    }
    Ok(())
}

fn run_nav(file: PathBuf, id: String) -> Result<()> {
    let raw = fs::read_to_string(&file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;
    let object = value
        .as_object()
        .context("nav file must hold a JSON object at the top level")?;

    let html = NavBuilder::new(id).nested(nav_nodes(object))?;
    println!("{html}");
    Ok(())
}

// Nested objects become branches, everything else a leaf with its value as
// the link target. Branches link to "#" - sections are not pages.
fn nav_nodes(object: &serde_json::Map<String, serde_json::Value>) -> Vec<TreeNode<String>> {
    object
        .iter()
        .map(|(name, value)| match value {
            serde_json::Value::Object(children) => {
                TreeNode::branch(name.as_str(), "#".to_string(), nav_nodes(children))
            }
            serde_json::Value::String(url) => TreeNode::leaf(name.as_str(), url.clone()),
            other => TreeNode::leaf(name.as_str(), other.to_string()),
        })
        .collect()
}

fn run_page(file: PathBuf, page: usize, per_page: usize) -> Result<()> {
    let raw = fs::read_to_string(&file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let lines: Vec<String> = raw.lines().map(str::to_string).collect();

    let mut paginator = Paginator::new(ArraySequence::from_values(lines), per_page);
    paginator.set_page(page);

    let mut window = paginator.page(page)?;
    while window.valid() {
        println!("{:>6}  {}", window.key()?.to_string(), window.current()?);
        window.advance()?;
    }

    println!(
        "-- page {} of {} --",
        paginator.current_page(),
        paginator.total_pages()
    );
    if paginator.has_next_page() {
        println!("   (next: --page {})", paginator.current_page() + 1);
    }
    Ok(())
}
