//! App - アプリケーション層
//!
//! ports を組み合わせて upload store のライフサイクルを実装します。
//!
//! # 主要コンポーネント
//! - **StoreConfig**: 解決済みの設定（alias 展開・callback 束縛済み）
//! - **FileUploadStore**: 設定と ports を保持する本体
//! - **UploadCycle**: 1 レコード操作分の状態とライフサイクル hook

pub mod config;
pub mod store;

// 主要な型を再エクスポート
pub use self::config::StoreConfig;
pub use self::store::{FileUploadStore, UploadCycle};
