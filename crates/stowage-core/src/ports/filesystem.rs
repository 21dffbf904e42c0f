//! FileSystem port - ファイルシステム操作の抽象化
//!
//! # 実装
//! - **LocalFileSystem**: std::fs ベース（本番用）
//! - テストでは失敗を注入する実装に差し替え可能

use std::io;
use std::path::Path;

use crate::domain::UploadedFile;

/// FileSystem は upload store が使うファイル操作
///
/// # 設計原則
/// - すべて blocking（timeout・キャンセルなし）
/// - `ensure_dir` は冪等（既に存在してもエラーにしない）
/// - 失敗の扱い（Failure にする / 無視する）は呼び出し側が決める
pub trait FileSystem: Send + Sync {
    /// Create `path` and any missing parents.
    fn ensure_dir(&self, path: &Path) -> io::Result<()>;

    /// Write the payload bytes to `destination`, replacing any existing file.
    fn save_upload(&self, file: &UploadedFile, destination: &Path) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;
}
