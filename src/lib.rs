//! Sized LRU - size- and age-bounded least-recently-used cache
//!
//! The core is [`cache::Lru`], a single-threaded container that evicts
//! least recently used entries once their summed weight exceeds a limit or
//! once they have gone untouched for too long. The rest of the crate serves
//! a string store built on it over HTTP, and [`framing`] provides
//! length-prefixed chunk buffers.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod framing;
pub mod models;

pub use api::AppState;
pub use cache::{Lru, Value};
pub use config::Config;
