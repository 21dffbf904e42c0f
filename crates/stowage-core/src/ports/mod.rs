//! Ports - 抽象化レイヤー
//!
//! upload store が依存する外部システム（ホストのレコード、upload 層、ファイルシステム）
//! へのインターフェースを定義します。実装は `impls` またはホスト側に置きます。

pub mod callback;
pub mod filesystem;
pub mod record;
pub mod upload_source;

// 主要な trait を再エクスポート
pub use self::callback::PersistCallback;
pub use self::filesystem::FileSystem;
pub use self::record::Record;
pub use self::upload_source::{UploadSource, input_name};
