//! Stock predicates for the common filtering jobs
//!
//! Everything here is construction-time configuration plus a pure `accept`;
//! predicates hold no cursor state of their own.

use std::collections::HashMap;

use regex::Regex;

use super::FilterPredicate;
use crate::sequence::Key;
use crate::walk::DirEntry;
use crate::SequenceError;

/// Skips entries whose name starts with a dot
///
/// The filesystem analogue of dropping `.`/`..`: hidden files and hidden
/// directories are rejected before downstream stages see them.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipHidden;

impl FilterPredicate<DirEntry> for SkipHidden {
    fn accept(&self, _key: &Key, entry: &DirEntry) -> Result<bool, SequenceError> {
        Ok(!entry.name.starts_with('.'))
    }
}

/// Keeps or drops files by extension
///
/// Directories always pass through, so an extension whitelist does not cut
/// off recursion into subtrees.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    extensions: Vec<String>,
    whitelisted: bool,
}

impl ExtensionFilter {
    /// Only let files carrying one of `extensions` through
    pub fn whitelist<I, E>(extensions: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
            whitelisted: true,
        }
    }

    /// Drop files carrying one of `extensions`
    pub fn blacklist<I, E>(extensions: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
            whitelisted: false,
        }
    }
}

impl FilterPredicate<DirEntry> for ExtensionFilter {
    fn accept(&self, _key: &Key, entry: &DirEntry) -> Result<bool, SequenceError> {
        if entry.is_directory {
            return Ok(true);
        }
        let matched = entry
            .extension()
            .map_or(false, |ext| self.extensions.iter().any(|candidate| candidate == ext));
        Ok(if self.whitelisted { matched } else { !matched })
    }
}

/// Regex filter on the element key
#[derive(Debug, Clone)]
pub struct KeyPattern {
    pattern: Regex,
}

impl KeyPattern {
    /// Keep elements whose key matches `pattern`
    pub fn new(pattern: Regex) -> Self {
        Self { pattern }
    }
}

impl<T> FilterPredicate<T> for KeyPattern {
    fn accept(&self, key: &Key, _item: &T) -> Result<bool, SequenceError> {
        Ok(self.pattern.is_match(&key.to_string()))
    }
}

/// Regex filter on string-like element values
#[derive(Debug, Clone)]
pub struct ValuePattern {
    pattern: Regex,
}

impl ValuePattern {
    /// Keep elements whose value matches `pattern`
    pub fn new(pattern: Regex) -> Self {
        Self { pattern }
    }
}

impl<T: AsRef<str>> FilterPredicate<T> for ValuePattern {
    fn accept(&self, _key: &Key, item: &T) -> Result<bool, SequenceError> {
        Ok(self.pattern.is_match(item.as_ref()))
    }
}

/// Regex filter on the full path of a directory entry
///
/// Unlike [`KeyPattern`] this sees the whole path, not just the file name,
/// so patterns can anchor on parent directories.
#[derive(Debug, Clone)]
pub struct PathPattern {
    pattern: Regex,
}

impl PathPattern {
    /// Keep entries whose full path matches `pattern`
    pub fn new(pattern: Regex) -> Self {
        Self { pattern }
    }
}

impl FilterPredicate<DirEntry> for PathPattern {
    fn accept(&self, key: &Key, entry: &DirEntry) -> Result<bool, SequenceError> {
        let path = entry
            .path
            .to_str()
            .ok_or_else(|| SequenceError::PredicateEvaluation {
                key: key.to_string(),
                reason: "path is not valid UTF-8".to_string(),
            })?;
        Ok(self.pattern.is_match(path))
    }
}

/// Rejects records whose `field` equals `value`, ASCII case-insensitively
///
/// Records missing the field are kept.
#[derive(Debug, Clone)]
pub struct FieldReject {
    field: String,
    value: String,
}

impl FieldReject {
    /// Reject records where `field` holds `value`
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl FilterPredicate<HashMap<String, String>> for FieldReject {
    fn accept(&self, _key: &Key, record: &HashMap<String, String>) -> Result<bool, SequenceError> {
        Ok(record
            .get(&self.field)
            .map_or(true, |held| !held.eq_ignore_ascii_case(&self.value)))
    }
}
