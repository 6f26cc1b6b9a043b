//! Cache Module
//!
//! Size- and age-bounded LRU container, plus the string store served over
//! HTTP.

mod clock;
mod entry;
mod listener;
mod lru;
mod ring;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::Value;
pub use listener::{EvictionListener, NoListener};
pub use lru::Lru;
pub use ring::Iter;
pub use stats::{CacheStats, EvictionLog};
pub use store::{CacheStore, StoredValue};

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
