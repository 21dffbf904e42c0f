//! Store settings as loaded from configuration files.
//!
//! Settings are plain data. Path aliases such as `@runtime` are expanded once,
//! when the settings are turned into a `StoreConfig`; nothing downstream
//! looks an alias up again.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::ConfigError;

pub const DEFAULT_BASE_DIRECTORY: &str = "@runtime/upload";
pub const DEFAULT_ATTRIBUTE: &str = "file";
pub const DEFAULT_SHARD_DEPTH: u32 = 1;

/// Recognized store options. Every field has a default, so `{}` is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSettings {
    /// Root of the upload tree. May start with a path alias.
    pub base_directory: String,

    /// Attributes that receive uploads, processed in this order.
    pub tracked_attributes: Vec<String>,

    /// Number of hash-derived subdirectory levels.
    pub shard_depth: u32,

    /// Persist uploads in `on_before_save`.
    pub auto_persist: bool,

    /// Delete superseded files after update and delete.
    pub auto_cleanup: bool,

    /// Record method to call instead of the default byte write.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persist_method: Option<String>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            base_directory: DEFAULT_BASE_DIRECTORY.to_string(),
            tracked_attributes: vec![DEFAULT_ATTRIBUTE.to_string()],
            shard_depth: DEFAULT_SHARD_DEPTH,
            auto_persist: true,
            auto_cleanup: true,
            persist_method: None,
        }
    }
}

impl StoreSettings {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

/// Symbolic directory names (`@runtime`, `@tmp`, ...).
///
/// A path is resolved by replacing its leading `@alias` segment with the
/// registered directory. Paths without a leading `@` are returned unchanged.
#[derive(Debug, Clone)]
pub struct PathAliases {
    aliases: HashMap<String, PathBuf>,
}

impl PathAliases {
    /// No aliases at all.
    pub fn empty() -> Self {
        Self {
            aliases: HashMap::new(),
        }
    }

    /// Register (or replace) an alias. The leading `@` is optional.
    pub fn with(mut self, alias: &str, path: impl Into<PathBuf>) -> Self {
        self.set(alias, path);
        self
    }

    pub fn set(&mut self, alias: &str, path: impl Into<PathBuf>) {
        let alias = if alias.starts_with('@') {
            alias.to_string()
        } else {
            format!("@{alias}")
        };
        self.aliases.insert(alias, path.into());
    }

    pub fn get(&self, alias: &str) -> Option<&Path> {
        self.aliases.get(alias).map(PathBuf::as_path)
    }

    pub fn resolve(&self, path: &str) -> Result<PathBuf, ConfigError> {
        if !path.starts_with('@') {
            return Ok(PathBuf::from(path));
        }

        let (alias, rest) = match path.find(['/', '\\']) {
            Some(idx) => (&path[..idx], &path[idx + 1..]),
            None => (path, ""),
        };
        let root = self
            .get(alias)
            .ok_or_else(|| ConfigError::UnknownAlias(alias.to_string()))?;

        if rest.is_empty() {
            Ok(root.to_path_buf())
        } else {
            Ok(root.join(rest))
        }
    }
}

impl Default for PathAliases {
    /// `@tmp` is the system temp directory, `@runtime` a `stowage-runtime`
    /// directory inside it.
    fn default() -> Self {
        let tmp = std::env::temp_dir();
        Self::empty()
            .with("@runtime", tmp.join("stowage-runtime"))
            .with("@tmp", tmp)
    }
}
