//! Record port - ホスト側のレコード（モデル）の抽象化
//!
//! upload store はレコードの属性を直接触らず、この trait 経由で読み書きします。
//! ORM ごとのイベント配線はホスト側の責務です。

use std::path::Path;

use crate::domain::{AttributeValue, UploadedFile};

/// Record は upload store から見たレコード
///
/// # 必要な機能
/// - 属性の読み書き（`attribute` / `set_attribute`）
/// - 保存済みの値（`old_attribute`）: 未確定の変更が入る前の値
/// - 検証エラーの通知（`add_error`）
///
/// # Object Safety
/// - `&mut dyn Record` として persist callback に渡すため、ジェネリックメソッドは持たない
pub trait Record {
    /// Form name used to key uploads (e.g. `"Photo"` for `Photo[file]`).
    fn form_name(&self) -> &str;

    /// `true` until the record has been inserted.
    fn is_new(&self) -> bool;

    /// Current value; `AttributeValue::Null` when unset.
    fn attribute(&self, name: &str) -> AttributeValue;

    fn set_attribute(&mut self, name: &str, value: AttributeValue);

    /// Stored path as last persisted, before any pending change.
    fn old_attribute(&self, name: &str) -> Option<String>;

    /// Attach a validation error to an attribute.
    fn add_error(&mut self, attribute: &str, message: String);

    /// Call a record-defined persist method by name.
    ///
    /// Returns `None` when the record has no such method.
    fn call_method(
        &mut self,
        _method: &str,
        _attribute: &str,
        _file: &UploadedFile,
        _path: &Path,
    ) -> Option<bool> {
        None
    }
}
