//! MemoryUploadSource - フォームフィールド名で payload を引く UploadSource
//!
//! multipart のパース結果（フィールド名 → ファイル）をそのまま保持する想定です。

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::UploadedFile;
use crate::ports::{Record, UploadSource, input_name};

/// MemoryUploadSource は 1 リクエスト分のアップロードを保持
///
/// # 実装詳細
/// - キーは `input_name(form_name, attribute)`（例: `Photo[file]`）
/// - `lookups()` で問い合わせ回数を確認できる（キャッシュの検証用）
#[derive(Debug, Default)]
pub struct MemoryUploadSource {
    files: HashMap<String, Arc<UploadedFile>>,
    lookups: AtomicUsize,
}

impl MemoryUploadSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an upload under a form field name such as `Photo[file]`.
    pub fn insert(&mut self, field: impl Into<String>, file: UploadedFile) -> Arc<UploadedFile> {
        let file = Arc::new(file);
        self.files.insert(field.into(), file.clone());
        file
    }

    pub fn with_file(mut self, field: impl Into<String>, file: UploadedFile) -> Self {
        self.insert(field, file);
        self
    }

    /// Number of `payload_for` calls so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

impl UploadSource for MemoryUploadSource {
    fn payload_for(&self, record: &dyn Record, attribute: &str) -> Option<Arc<UploadedFile>> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.files
            .get(&input_name(record.form_name(), attribute))
            .cloned()
    }
}
