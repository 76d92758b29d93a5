//! Filesystem-backed tree source
//!
//! Adapts `std::fs` directory listings to the [`Recursive`] capability: each
//! level is read eagerly when descended into, sorted by name, and keyed by
//! file name, so traversal output is deterministic regardless of readdir
//! order. Directory handles are released as soon as a level has been read;
//! nothing outlives the traversal that needed it.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::sequence::{ArraySequence, BoxedSequence, Key};
use crate::tree::{Recursive, RecursiveFlattener, TraversalOrder};
use crate::SequenceError;

/// One filesystem entry, as seen by the walker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File name (final path component)
    pub name: String,
    /// Full path to the entry
    pub path: PathBuf,
    /// True for directories, including symlinks that point at one
    pub is_directory: bool,
    /// True if the entry itself is a symbolic link
    pub is_symlink: bool,
}

impl DirEntry {
    /// Extension of the entry name, if any
    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|ext| ext.to_str())
    }
}

impl Recursive for DirEntry {
    // Symlinked directories are listed but never descended into; a symlink
    // cycle would otherwise keep the traversal alive forever.
    fn is_container(&self) -> bool {
        self.is_directory && !self.is_symlink
    }

    fn children(&self) -> Result<BoxedSequence<Self>, SequenceError> {
        if !self.is_container() {
            return Ok(Box::new(ArraySequence::from_entries(Vec::new())));
        }
        Ok(Box::new(read_level(&self.path)?))
    }
}

/// Read one directory level, sorted by name and keyed by file name
pub fn read_level(dir: &Path) -> Result<ArraySequence<DirEntry>, SequenceError> {
    let traversal_error = |source: std::io::Error| SequenceError::Traversal {
        key: dir.display().to_string(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(traversal_error)? {
        let entry = entry.map_err(traversal_error)?;
        let file_type = entry.file_type().map_err(traversal_error)?;
        let path = entry.path();
        entries.push(DirEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_directory: file_type.is_dir() || (file_type.is_symlink() && path.is_dir()),
            is_symlink: file_type.is_symlink(),
            path,
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    debug!(dir = %dir.display(), entries = entries.len(), "read directory level");

    Ok(ArraySequence::from_entries(
        entries
            .into_iter()
            .map(|entry| (Key::Name(entry.name.clone()), entry))
            .collect(),
    ))
}

/// Recursive traversal rooted at the entries of `path`
pub fn walk(
    path: &Path,
    order: TraversalOrder,
) -> Result<RecursiveFlattener<DirEntry>, SequenceError> {
    let root = read_level(path)?;
    RecursiveFlattener::new(Box::new(root), order)
}
