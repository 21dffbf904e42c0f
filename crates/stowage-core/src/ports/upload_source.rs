//! UploadSource port - アップロードされたファイルの取得
//!
//! multipart パーサやフォーム処理など、リクエストごとの upload 層を抽象化します。

use std::sync::Arc;

use super::record::Record;
use crate::domain::UploadedFile;

/// UploadSource は (record, attribute) に対応する payload を返す
///
/// # 設計原則
/// - ファイルが無いことはエラーではない（`None` を返す）
/// - 同じ payload を何度でも返せる（消費しない）
///
/// # Thread Safety
/// - `Send + Sync` を要求（store を複数スレッドから共有できる）
pub trait UploadSource: Send + Sync {
    fn payload_for(&self, record: &dyn Record, attribute: &str) -> Option<Arc<UploadedFile>>;
}

/// Form field name an upload for `attribute` arrives under.
///
/// `"Photo[file]"` for a record with form name `Photo`, or just `"file"`
/// when the form name is empty.
pub fn input_name(form_name: &str, attribute: &str) -> String {
    if form_name.is_empty() {
        attribute.to_string()
    } else {
        format!("{form_name}[{attribute}]")
    }
}
