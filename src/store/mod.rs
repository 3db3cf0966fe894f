//! Durable key-value storage
//!
//! Collections persist themselves as a single string value per key.
//! Absence of a key means "empty collection".

mod codec;
mod file;
mod memory;

pub use codec::{decode_names, encode_names};
pub use file::FileStore;
pub use memory::MemoryStore;

use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Errors raised by a store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store document is malformed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// String key to string value store
///
/// Methods take `&self`: the store is shared between every collection of a
/// player, all on one thread, so backends use interior mutability.
pub trait KeyValueStore: fmt::Debug {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Option<String>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`; deleting a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Store handle shared by a collection tree
pub type SharedStore = Rc<dyn KeyValueStore>;
