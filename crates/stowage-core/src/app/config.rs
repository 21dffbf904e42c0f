//! StoreConfig - 解決済みの設定
//!
//! `StoreSettings`（シリアライズ可能な生の設定）から alias を展開し、
//! persist callback を 1 つの型に畳み込んだもの。実行時に再解決はしません。

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::domain::settings::{DEFAULT_ATTRIBUTE, DEFAULT_SHARD_DEPTH};
use crate::domain::{ConfigError, MAX_SHARD_DEPTH, PathAliases, ShardLayout, StoreSettings};
use crate::ports::PersistCallback;

/// StoreConfig は FileUploadStore の設定
///
/// # 使用例
/// ```ignore
/// let config = StoreConfig::new("/data/u")
///     .with_attributes(["avatar", "cover"])
///     .with_shard_depth(2);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    base_directory: PathBuf,
    tracked_attributes: Vec<String>,
    shard_depth: u32,
    auto_persist: bool,
    auto_cleanup: bool,
    persist_callback: Option<PersistCallback>,
}

impl StoreConfig {
    /// Defaults: attribute `file`, depth 1, auto persist and cleanup on.
    pub fn new(base_directory: impl Into<PathBuf>) -> Self {
        Self {
            base_directory: base_directory.into(),
            tracked_attributes: vec![DEFAULT_ATTRIBUTE.to_string()],
            shard_depth: DEFAULT_SHARD_DEPTH,
            auto_persist: true,
            auto_cleanup: true,
            persist_callback: None,
        }
    }

    /// Resolve settings: expand aliases, bind the persist method.
    pub fn from_settings(
        settings: &StoreSettings,
        aliases: &PathAliases,
    ) -> Result<Self, ConfigError> {
        let base_directory = aliases.resolve(&settings.base_directory)?;

        let mut config = Self::new(base_directory)
            .with_attributes(&settings.tracked_attributes)
            .with_shard_depth(settings.shard_depth)
            .with_auto_persist(settings.auto_persist)
            .with_auto_cleanup(settings.auto_cleanup);

        if let Some(method) = &settings.persist_method {
            if method.is_empty() {
                return Err(ConfigError::EmptyPersistMethod);
            }
            config = config.with_persist_callback(PersistCallback::record_method(method.clone()));
        }
        Ok(config)
    }

    /// Replace the tracked attributes. Order is kept, repeats are dropped.
    pub fn with_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tracked_attributes.clear();
        for attribute in attributes {
            let attribute = attribute.as_ref();
            if self.tracked_attributes.iter().any(|a| a == attribute) {
                continue;
            }
            self.tracked_attributes.push(attribute.to_string());
        }
        self
    }

    pub fn with_base_directory(mut self, base_directory: impl Into<PathBuf>) -> Self {
        self.base_directory = base_directory.into();
        self
    }

    pub fn with_shard_depth(mut self, depth: u32) -> Self {
        if depth > MAX_SHARD_DEPTH {
            warn!(
                depth,
                max = MAX_SHARD_DEPTH,
                "shard depth exceeds hash length; extra levels are ignored"
            );
        }
        self.shard_depth = depth;
        self
    }

    pub fn with_auto_persist(mut self, enabled: bool) -> Self {
        self.auto_persist = enabled;
        self
    }

    pub fn with_auto_cleanup(mut self, enabled: bool) -> Self {
        self.auto_cleanup = enabled;
        self
    }

    pub fn with_persist_callback(mut self, callback: PersistCallback) -> Self {
        self.persist_callback = Some(callback);
        self
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn tracked_attributes(&self) -> &[String] {
        &self.tracked_attributes
    }

    pub fn shard_depth(&self) -> u32 {
        self.shard_depth
    }

    pub fn auto_persist(&self) -> bool {
        self.auto_persist
    }

    pub fn auto_cleanup(&self) -> bool {
        self.auto_cleanup
    }

    pub fn persist_callback(&self) -> Option<&PersistCallback> {
        self.persist_callback.as_ref()
    }

    pub fn layout(&self) -> ShardLayout {
        ShardLayout::new(self.base_directory.clone(), self.shard_depth)
    }
}
