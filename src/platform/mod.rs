//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, in-memory elsewhere)
//!
//! Audio capabilities live in `crate::audio`.

pub mod storage;

pub use storage::{KeyValueStore, MemoryStorage};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
