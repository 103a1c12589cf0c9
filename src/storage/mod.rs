//! Storage abstraction layer.
//!
//! A pluggable blob store with file system and memory backends, and the
//! [`ModelStore`] that persists trained pipeline pairs on top of it.

pub mod file;
pub mod memory;
pub mod model_store;
pub mod traits;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use model_store::ModelStore;
pub use traits::{Storage, StorageConfig, StorageError, StorageInput, StorageOutput};
