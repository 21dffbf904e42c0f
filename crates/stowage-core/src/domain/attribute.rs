//! Attribute values as seen by the upload store.

use std::sync::Arc;

use super::upload::UploadedFile;

/// The value of a tracked record attribute.
///
/// Between validation and save an attribute may transiently hold the uploaded
/// payload itself; once persisted it holds the stored path.
#[derive(Debug, Clone, Default)]
pub enum AttributeValue {
    #[default]
    Null,

    /// Path of a stored file.
    Path(String),

    /// An upload not yet written to its final location.
    Upload(Arc<UploadedFile>),
}

impl AttributeValue {
    pub fn as_path(&self) -> Option<&str> {
        match self {
            AttributeValue::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn as_upload(&self) -> Option<&Arc<UploadedFile>> {
        match self {
            AttributeValue::Upload(file) => Some(file),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }
}

// Uploads compare by identity: the same payload instance, not equal bytes.
impl PartialEq for AttributeValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AttributeValue::Null, AttributeValue::Null) => true,
            (AttributeValue::Path(a), AttributeValue::Path(b)) => a == b,
            (AttributeValue::Upload(a), AttributeValue::Upload(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(path: &str) -> Self {
        AttributeValue::Path(path.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(path: String) -> Self {
        AttributeValue::Path(path)
    }
}

impl From<Arc<UploadedFile>> for AttributeValue {
    fn from(file: Arc<UploadedFile>) -> Self {
        AttributeValue::Upload(file)
    }
}
