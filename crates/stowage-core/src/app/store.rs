//! FileUploadStore - アップロードの保存と旧ファイルの後始末
//!
//! # フロー（1 レコード操作 = 1 UploadCycle）
//! 1. `on_before_validate`: upload を解決し、属性に payload を載せる
//! 2. `on_before_save`: （更新時）旧パスを snapshot → persist。失敗なら `false`
//! 3. `on_before_delete`: 旧パスを snapshot
//! 4. `on_after_commit`: snapshot と現在値を比べ、置き換わったファイルを削除
//!
//! # 学習ポイント
//! - 操作ごとの状態（cache, snapshot）は `UploadCycle` が排他的に所有
//! - store 本体は不変（設定と ports のみ）なので複数操作で共有できる

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use super::config::StoreConfig;
use crate::domain::{
    AttributeValue, PersistOutcome, PriorFileSnapshot, ResolvedFileCache, ShardLayout,
    UploadedFile,
};
use crate::impls::LocalFileSystem;
use crate::ports::{FileSystem, Record, UploadSource};

/// FileUploadStore は設定と ports を保持する
///
/// # 使用例
/// ```ignore
/// let store = FileUploadStore::new(config, Arc::new(uploads));
///
/// let mut cycle = store.begin();
/// cycle.on_before_validate(&mut record);
/// if cycle.on_before_save(&mut record) {
///     db.save(&record)?;
///     cycle.on_after_commit(&record);
/// }
/// ```
pub struct FileUploadStore {
    config: StoreConfig,
    layout: ShardLayout,
    uploads: Arc<dyn UploadSource>,
    fs: Arc<dyn FileSystem>,
}

impl FileUploadStore {
    /// Store writing to the local disk.
    pub fn new(config: StoreConfig, uploads: Arc<dyn UploadSource>) -> Self {
        Self::with_file_system(config, uploads, Arc::new(LocalFileSystem::new()))
    }

    pub fn with_file_system(
        config: StoreConfig,
        uploads: Arc<dyn UploadSource>,
        fs: Arc<dyn FileSystem>,
    ) -> Self {
        let layout = config.layout();
        Self {
            config,
            layout,
            uploads,
            fs,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Directory a file with this name is stored in.
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.layout.path_for(filename)
    }

    /// Start the state for one record operation.
    pub fn begin(&self) -> UploadCycle<'_> {
        UploadCycle {
            store: self,
            resolved: ResolvedFileCache::default(),
            snapshot: None,
            deleting: false,
        }
    }
}

/// UploadCycle は 1 回のレコード操作（insert / update / delete）の状態
///
/// # 状態
/// - `resolved`: attribute → payload（不在も含めてキャッシュ）
/// - `snapshot`: `None` = NoSnapshot, `Some` = SnapshotHeld
/// - `deleting`: 削除操作中（commit 後の現在値を「無し」とみなす）
///
/// # Thread Safety
/// - 1 操作に閉じて使う前提（`&mut self`）。同じレコードへの並行操作はホストが直列化する
pub struct UploadCycle<'s> {
    store: &'s FileUploadStore,
    resolved: ResolvedFileCache,
    snapshot: Option<PriorFileSnapshot>,
    deleting: bool,
}

impl UploadCycle<'_> {
    /// Upload bound to `attribute`, or `None` when nothing was uploaded.
    ///
    /// The first answer per attribute is cached for the rest of the cycle,
    /// absence included.
    pub fn resolve(&mut self, record: &dyn Record, attribute: &str) -> Option<Arc<UploadedFile>> {
        if let Some(cached) = self.resolved.get(attribute) {
            return cached.clone();
        }

        let file = match record.attribute(attribute) {
            AttributeValue::Upload(file) => Some(file),
            _ => self.store.uploads.payload_for(record, attribute),
        };
        self.resolved.insert(attribute, file.clone());
        file
    }

    /// Write every resolved upload and point its attribute at the stored path.
    ///
    /// The result is the outcome of the last attribute that had an upload,
    /// not a combination of all of them. `Noop` when none had one.
    pub fn persist(&mut self, record: &mut dyn Record) -> PersistOutcome {
        let store = self.store;
        let mut outcome = PersistOutcome::Noop;

        for attribute in store.config.tracked_attributes() {
            let Some(file) = self.resolve(&*record, attribute) else {
                continue;
            };
            outcome = self.persist_attribute(record, attribute, &file);
        }
        outcome
    }

    fn persist_attribute(
        &self,
        record: &mut dyn Record,
        attribute: &str,
        file: &UploadedFile,
    ) -> PersistOutcome {
        let filename = file.file_name();
        let directory = self.store.layout.path_for(&filename);

        if let Err(err) = self.store.fs.ensure_dir(&directory) {
            warn!(
                %attribute,
                path = %directory.display(),
                error = %err,
                "cannot create upload directory"
            );
            record.add_error(
                attribute,
                format!("cannot create directory {}: {err}", directory.display()),
            );
            return PersistOutcome::Failure;
        }

        // The record sees the final path before the bytes are written, so
        // callbacks and validators can use it.
        let destination = directory.join(&filename);
        record.set_attribute(
            attribute,
            AttributeValue::Path(destination.to_string_lossy().into_owned()),
        );

        let saved = match self.store.config.persist_callback() {
            Some(callback) => callback.call(&mut *record, attribute, file, &destination),
            None => match self.store.fs.save_upload(file, &destination) {
                Ok(()) => true,
                Err(err) => {
                    warn!(
                        %attribute,
                        path = %destination.display(),
                        error = %err,
                        "cannot write upload"
                    );
                    false
                }
            },
        };

        let outcome = PersistOutcome::from_saved(saved);
        if outcome.rejects_save() {
            record.add_error(
                attribute,
                format!("failed to save uploaded file to {}", destination.display()),
            );
        }
        debug!(%attribute, path = %destination.display(), ?outcome, "persisted upload");
        outcome
    }

    /// Remember the stored paths before they are overwritten or deleted.
    ///
    /// Only the first capture of a cycle counts; later calls are ignored until
    /// `cleanup_snapshot` releases the snapshot.
    pub fn capture_snapshot(&mut self, record: &dyn Record) {
        if self.snapshot.is_some() {
            debug!("prior file snapshot already held");
            return;
        }

        let mut snapshot = PriorFileSnapshot::default();
        for attribute in self.store.config.tracked_attributes() {
            snapshot.insert(attribute, record.old_attribute(attribute));
        }
        self.snapshot = Some(snapshot);
    }

    /// Delete snapshotted files the record no longer points at.
    ///
    /// Best effort: a file that is already gone or cannot be removed is
    /// skipped silently.
    pub fn cleanup_snapshot(&mut self, record: &dyn Record) {
        let Some(snapshot) = self.snapshot.take() else {
            return;
        };

        for attribute in self.store.config.tracked_attributes() {
            let Some(previous) = snapshot.get(attribute) else {
                continue;
            };
            let current = if self.deleting {
                None
            } else {
                record.attribute(attribute).as_path().map(str::to_string)
            };
            if current.as_deref() == Some(previous) {
                continue;
            }
            if self.store.fs.remove_file(Path::new(previous)).is_ok() {
                debug!(%attribute, path = %previous, "removed superseded upload");
            }
        }
        self.deleting = false;
    }

    /// Treat the record as deleted for the next cleanup.
    pub fn mark_deleted(&mut self) {
        self.deleting = true;
    }

    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn snapshot(&self) -> Option<&PriorFileSnapshot> {
        self.snapshot.as_ref()
    }

    /// Put resolved uploads on the record so validators can inspect them.
    ///
    /// Attributes without an upload keep their current value.
    pub fn on_before_validate(&mut self, record: &mut dyn Record) {
        let store = self.store;
        for attribute in store.config.tracked_attributes() {
            if let Some(file) = self.resolve(&*record, attribute) {
                record.set_attribute(attribute, AttributeValue::Upload(file));
            }
        }
    }

    /// Returns `false` when the save must be rejected.
    pub fn on_before_save(&mut self, record: &mut dyn Record) -> bool {
        let store = self.store;
        let config = &store.config;
        if config.auto_cleanup() && !record.is_new() {
            self.capture_snapshot(&*record);
        }
        if config.auto_persist() {
            return !self.persist(record).rejects_save();
        }
        true
    }

    pub fn on_before_delete(&mut self, record: &dyn Record) {
        if self.store.config.auto_cleanup() {
            self.capture_snapshot(record);
        }
        self.mark_deleted();
    }

    /// Called once the update or delete has been committed.
    pub fn on_after_commit(&mut self, record: &dyn Record) {
        if self.store.config.auto_cleanup() {
            self.cleanup_snapshot(record);
        }
    }
}
