//! Per-operation state: resolved uploads and prior file paths.

use std::collections::HashMap;
use std::sync::Arc;

use super::upload::UploadedFile;

/// Upload resolutions for one record operation.
///
/// Absence is cached too: once an attribute has been looked up it is never
/// looked up again within the same operation.
#[derive(Debug, Default)]
pub struct ResolvedFileCache {
    entries: HashMap<String, Option<Arc<UploadedFile>>>,
}

impl ResolvedFileCache {
    /// `None` when the attribute has not been resolved yet,
    /// `Some(None)` when it was resolved to "no upload".
    pub fn get(&self, attribute: &str) -> Option<&Option<Arc<UploadedFile>>> {
        self.entries.get(attribute)
    }

    pub fn insert(&mut self, attribute: &str, file: Option<Arc<UploadedFile>>) {
        self.entries.insert(attribute.to_string(), file);
    }
}

/// Stored paths of tracked attributes, captured before a destructive change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorFileSnapshot {
    paths: HashMap<String, String>,
}

impl PriorFileSnapshot {
    /// Record the previous value of an attribute. Empty values are not kept.
    pub fn insert(&mut self, attribute: &str, previous: Option<String>) {
        match previous {
            Some(path) if !path.is_empty() => {
                self.paths.insert(attribute.to_string(), path);
            }
            _ => {
                self.paths.remove(attribute);
            }
        }
    }

    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.paths.get(attribute).map(String::as_str)
    }
}
