//! PersistCallback - デフォルトの書き込みを置き換える保存処理
//!
//! 設定では「関数」と「レコードのメソッド名」の 2 通りで指定できますが、
//! 設定時にどちらも同じ呼び出し可能な型に畳み込みます。persist の時点では区別しません。

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::warn;

use super::record::Record;
use crate::domain::UploadedFile;

type PersistFn = dyn Fn(&mut dyn Record, &str, &UploadedFile, &Path) -> bool + Send + Sync;

/// PersistCallback は (record, attribute, file, destination) を受け取り成否を返す
///
/// # 使用例
/// ```ignore
/// let callback = PersistCallback::new(|record, attribute, file, path| {
///     blob_store.put(path, file).is_ok()
/// });
/// let config = StoreConfig::new("/data/u").with_persist_callback(callback);
/// ```
#[derive(Clone)]
pub struct PersistCallback {
    inner: Arc<PersistFn>,
}

impl PersistCallback {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut dyn Record, &str, &UploadedFile, &Path) -> bool + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Callback that dispatches to `Record::call_method(method, ...)`.
    ///
    /// A record without that method counts as a failed save.
    pub fn record_method(method: impl Into<String>) -> Self {
        let method = method.into();
        Self::new(move |record, attribute, file, path| {
            match record.call_method(&method, attribute, file, path) {
                Some(saved) => saved,
                None => {
                    warn!(%method, %attribute, "record has no persist method");
                    false
                }
            }
        })
    }

    pub fn call(
        &self,
        record: &mut dyn Record,
        attribute: &str,
        file: &UploadedFile,
        destination: &Path,
    ) -> bool {
        (self.inner)(record, attribute, file, destination)
    }
}

impl fmt::Debug for PersistCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistCallback").finish_non_exhaustive()
    }
}
