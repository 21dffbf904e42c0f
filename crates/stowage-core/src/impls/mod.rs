//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **LocalFileSystem**: ローカルディスク（本番用）
//! - **MemoryRecord**: インメモリのレコード（テスト・デモ用）
//! - **MemoryUploadSource**: フィールド名で引く upload 層（テスト・デモ用）
//!
//! 実際の ORM レコードや multipart パーサとの接続はホスト側で ports を実装します。

pub mod local_fs;
pub mod memory_record;
pub mod memory_upload;

// 主要な型を再エクスポート
pub use self::local_fs::LocalFileSystem;
pub use self::memory_record::MemoryRecord;
pub use self::memory_upload::MemoryUploadSource;
