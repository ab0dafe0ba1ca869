//! Typed slots with pluggable codecs.

use std::marker::PhantomData;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::SlotStore;

/// Serializer/deserializer pair for slot values.
pub trait Codec<T> {
    /// Turn a value into its stored text form.
    fn encode(&self, value: &T) -> Result<String>;

    /// Parse a stored text form back into a value.
    fn decode(&self, raw: &str) -> Result<T>;
}

/// Default codec: compact JSON via serde_json.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl<T: Serialize + DeserializeOwned> Codec<T> for JsonCodec {
    fn encode(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string(value)?)
    }

    fn decode(&self, raw: &str) -> Result<T> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// A typed, named slot in a [`SlotStore`].
#[derive(Debug, Clone)]
pub struct Slot<T, C = JsonCodec> {
    key: String,
    codec: C,
    _value: PhantomData<fn() -> T>,
}

impl<T> Slot<T, JsonCodec>
where
    JsonCodec: Codec<T>,
{
    /// Create a JSON slot for `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_codec(key, JsonCodec)
    }
}

impl<T, C: Codec<T>> Slot<T, C> {
    /// Create a slot with a custom codec.
    pub fn with_codec(key: impl Into<String>, codec: C) -> Self {
        Self {
            key: key.into(),
            codec,
            _value: PhantomData,
        }
    }

    /// Get the slot key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read and decode the slot, reporting every failure.
    pub fn try_load<S: SlotStore + ?Sized>(&self, store: &S) -> Result<Option<T>> {
        let Some(raw) = store.read(&self.key)? else {
            return Ok(None);
        };
        let value = self
            .codec
            .decode(&raw)
            .with_context(|| format!("Failed to decode slot {:?}", self.key))?;
        Ok(Some(value))
    }

    /// Read the slot, falling back to `initial` when it is absent or unreadable.
    ///
    /// Failures are logged; the caller always gets a usable value.
    pub fn load_or<S: SlotStore + ?Sized>(&self, store: &S, initial: T) -> T {
        match self.try_load(store) {
            Ok(Some(value)) => value,
            Ok(None) => {
                tracing::debug!("Slot {:?} is empty, using initial value", self.key);
                initial
            }
            Err(e) => {
                tracing::warn!("Error loading slot {:?}: {:#}", self.key, e);
                initial
            }
        }
    }

    /// Encode and write the slot, reporting every failure.
    pub fn try_save<S: SlotStore + ?Sized>(&self, store: &S, value: &T) -> Result<()> {
        let raw = self
            .codec
            .encode(value)
            .with_context(|| format!("Failed to encode slot {:?}", self.key))?;
        store.write(&self.key, &raw)
    }

    /// Write the slot without surfacing failures; they are logged.
    pub fn save<S: SlotStore + ?Sized>(&self, store: &S, value: &T) {
        if let Err(e) = self.try_save(store, value) {
            tracing::error!("Error saving slot {:?}: {:#}", self.key, e);
        }
    }
}
