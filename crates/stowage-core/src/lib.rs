//! stowage-core
//!
//! Upload storage for record lifecycles: uploaded files are written into a
//! hash-sharded directory tree, the record attribute is rewritten to the
//! stored path, and superseded files are removed after update and delete.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（upload, attribute, shard, settings, outcome, snapshot, errors）
//! - **ports**: 抽象化レイヤー（Record, UploadSource, FileSystem, PersistCallback）
//! - **app**: アプリケーションロジック（StoreConfig, FileUploadStore, UploadCycle）
//! - **impls**: 実装（LocalFileSystem, MemoryRecord, MemoryUploadSource）

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::{FileUploadStore, StoreConfig, UploadCycle};
pub use domain::{
    AttributeValue, ByteSource, ConfigError, PathAliases, PersistOutcome, ShardLayout,
    StoreSettings, UploadedFile,
};
pub use ports::{FileSystem, PersistCallback, Record, UploadSource};
