//! Persistent key-value slots.
//!
//! A [`SlotStore`] holds raw serialized strings under string keys. A typed
//! [`Slot`] sits on top of it with a pluggable [`Codec`], and never lets a
//! storage failure reach the caller: reads fall back to the caller's initial
//! value and writes are logged and dropped.
//!
//! This layer knows nothing about folders or prompts.

mod file;
mod memory;
mod slot;

pub use file::FileSlotStore;
pub use memory::MemorySlotStore;
pub use slot::{Codec, JsonCodec, Slot};

use anyhow::Result;

/// Raw string storage keyed by name.
pub trait SlotStore {
    /// Read the raw value for `key`, or `None` if it was never written.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the raw value for `key`.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: SlotStore + ?Sized> SlotStore for &S {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}

/// Get the default data directory.
pub fn default_data_dir() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("promptfold")
}
