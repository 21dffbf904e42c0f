//! Domain model (uploads, attribute values, shard layout, settings, outcomes).

pub mod attribute;
pub mod errors;
pub mod outcome;
pub mod settings;
pub mod shard;
pub mod snapshot;
pub mod upload;

pub use attribute::AttributeValue;
pub use errors::ConfigError;
pub use outcome::PersistOutcome;
pub use settings::{PathAliases, StoreSettings};
pub use shard::{MAX_SHARD_DEPTH, ShardLayout, filename_hash};
pub use snapshot::{PriorFileSnapshot, ResolvedFileCache};
pub use upload::{ByteSource, UploadedFile};
