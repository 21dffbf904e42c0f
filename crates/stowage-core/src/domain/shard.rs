//! Sharded directory layout.
//!
//! Files are spread over nested subdirectories keyed by the MD5 of their file
//! name, two hex characters per level:
//!
//! ```text
//! base/72/photo.jpg          depth 1, md5("photo.jpg") = 72acded3...
//! base/72/ac/photo.jpg       depth 2
//! ```
//!
//! The layout depends on the file name only, never on content, record
//! identity or time, so an existing tree stays addressable.

use std::path::{Path, PathBuf};

use md5::{Digest, Md5};

/// Hex characters consumed per directory level.
pub const SEGMENT_LEN: usize = 2;

/// Length of the rendered hash (128-bit MD5).
pub const HASH_HEX_LEN: usize = 32;

/// Deepest layout the hash can address. Deeper settings are capped here.
pub const MAX_SHARD_DEPTH: u32 = (HASH_HEX_LEN / SEGMENT_LEN) as u32;

/// Lowercase hex MD5 of a file name.
pub fn filename_hash(filename: &str) -> String {
    hex::encode(Md5::digest(filename.as_bytes()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardLayout {
    base_directory: PathBuf,
    depth: u32,
}

impl ShardLayout {
    pub fn new(base_directory: impl Into<PathBuf>, depth: u32) -> Self {
        Self {
            base_directory: base_directory.into(),
            depth,
        }
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Configured depth.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Number of shard levels actually produced.
    pub fn effective_depth(&self) -> u32 {
        self.depth.min(MAX_SHARD_DEPTH)
    }

    /// Directory a file with this name is stored in.
    pub fn path_for(&self, filename: &str) -> PathBuf {
        let mut path = self.base_directory.clone();
        if self.depth == 0 {
            return path;
        }

        let hash = filename_hash(filename);
        for level in 0..self.effective_depth() as usize {
            let start = level * SEGMENT_LEN;
            path.push(&hash[start..start + SEGMENT_LEN]);
        }
        path
    }
}
