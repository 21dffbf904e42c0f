//! MemoryRecord - テスト・デモ用のインメモリレコード
//!
//! # 学習ポイント
//! - 「保存済みの値」（old attributes）と現在値の分離
//! - commit / delete によるライフサイクルの再現

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::domain::{AttributeValue, UploadedFile};
use crate::ports::Record;

type RecordMethod = Arc<dyn Fn(&str, &UploadedFile, &Path) -> bool + Send + Sync>;

/// MemoryRecord はホストの ORM レコードを模したもの
///
/// # 状態
/// - `attributes`: 現在値（未確定の変更を含む）
/// - `old_attributes`: 最後に commit された値（新規レコードでは `None`）
///
/// # 使用例
/// ```ignore
/// let mut record = MemoryRecord::new("Photo");
/// // ... insert cycle ...
/// record.commit();
/// ```
#[derive(Clone, Default)]
pub struct MemoryRecord {
    form_name: String,
    attributes: HashMap<String, AttributeValue>,
    old_attributes: Option<HashMap<String, String>>,
    errors: HashMap<String, Vec<String>>,
    methods: HashMap<String, RecordMethod>,
}

impl MemoryRecord {
    /// A record that has not been inserted yet.
    pub fn new(form_name: impl Into<String>) -> Self {
        Self {
            form_name: form_name.into(),
            ..Self::default()
        }
    }

    /// A record loaded from storage with the given stored paths.
    pub fn persisted<I, K, V>(form_name: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::new(form_name);
        for (name, path) in paths {
            record
                .attributes
                .insert(name.into(), AttributeValue::Path(path.into()));
        }
        record.commit();
        record
    }

    /// Register a method callable through `PersistCallback::record_method`.
    pub fn with_method<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str, &UploadedFile, &Path) -> bool + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Arc::new(f));
        self
    }

    /// Stored path of an attribute, if it currently holds one.
    pub fn path(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(AttributeValue::as_path)
    }

    /// Mark the current values as persisted.
    ///
    /// Only stored paths are kept; uploads that were never turned into a path
    /// do not survive a commit.
    pub fn commit(&mut self) {
        let stored = self
            .attributes
            .iter()
            .filter_map(|(name, value)| Some((name.clone(), value.as_path()?.to_string())))
            .collect();
        self.old_attributes = Some(stored);
    }

    /// Forget the persisted state, as after a delete.
    pub fn delete(&mut self) {
        self.old_attributes = None;
    }

    pub fn errors(&self, attribute: &str) -> &[String] {
        self.errors.get(attribute).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_errors(&self) -> bool {
        self.errors.values().any(|messages| !messages.is_empty())
    }
}

impl Record for MemoryRecord {
    fn form_name(&self) -> &str {
        &self.form_name
    }

    fn is_new(&self) -> bool {
        self.old_attributes.is_none()
    }

    fn attribute(&self, name: &str) -> AttributeValue {
        self.attributes.get(name).cloned().unwrap_or_default()
    }

    fn set_attribute(&mut self, name: &str, value: AttributeValue) {
        self.attributes.insert(name.to_string(), value);
    }

    fn old_attribute(&self, name: &str) -> Option<String> {
        self.old_attributes.as_ref()?.get(name).cloned()
    }

    fn add_error(&mut self, attribute: &str, message: String) {
        self.errors
            .entry(attribute.to_string())
            .or_default()
            .push(message);
    }

    fn call_method(
        &mut self,
        method: &str,
        attribute: &str,
        file: &UploadedFile,
        path: &Path,
    ) -> Option<bool> {
        let method = self.methods.get(method)?;
        Some(method(attribute, file, path))
    }
}
