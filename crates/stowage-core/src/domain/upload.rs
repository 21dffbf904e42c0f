//! Uploaded file payloads.
//!
//! An `UploadedFile` is produced per request by the upload-handling layer
//! (multipart parser, form handler, ...). The store reads it during one record
//! operation and never owns it beyond that.

use std::fs::{self, File};
use std::io::{self, Cursor, Read};
use std::path::PathBuf;

/// Where the uploaded bytes currently live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByteSource {
    /// Bytes already buffered in memory.
    Memory(Vec<u8>),

    /// Spool file written by the upload layer (e.g. a multipart temp file).
    /// The file is read, never moved or deleted.
    TempFile(PathBuf),
}

impl ByteSource {
    /// Open a reader over the payload bytes.
    pub fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        match self {
            ByteSource::Memory(bytes) => Ok(Box::new(Cursor::new(bytes.as_slice()))),
            ByteSource::TempFile(path) => Ok(Box::new(File::open(path)?)),
        }
    }

    /// Size of the payload in bytes.
    pub fn size(&self) -> io::Result<u64> {
        match self {
            ByteSource::Memory(bytes) => Ok(bytes.len() as u64),
            ByteSource::TempFile(path) => Ok(fs::metadata(path)?.len()),
        }
    }
}

/// A file received from a client, bound to one record attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    base_name: String,
    extension: String,
    source: ByteSource,
}

impl UploadedFile {
    pub fn new(
        base_name: impl Into<String>,
        extension: impl Into<String>,
        source: ByteSource,
    ) -> Self {
        Self {
            base_name: base_name.into(),
            extension: extension.into(),
            source,
        }
    }

    /// Build a payload from the name the client sent.
    ///
    /// Any directory part is dropped. The base name is everything before the
    /// last dot, the extension everything after it, lowercased. A name without
    /// a dot has an empty extension.
    pub fn from_client_name(name: &str, source: ByteSource) -> Self {
        let file_name = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(name);
        let (base_name, extension) = match file_name.rfind('.') {
            Some(idx) => (&file_name[..idx], file_name[idx + 1..].to_lowercase()),
            None => (file_name, String::new()),
        };
        Self::new(base_name, extension, source)
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn source(&self) -> &ByteSource {
        &self.source
    }

    /// Name the file is stored under: `base_name.extension`.
    ///
    /// No sanitisation happens here; two uploads with the same name land on
    /// the same path and the later one overwrites.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.base_name, self.extension)
    }
}
