//!
//! Serialization of secrets.
//!
//! Request bodies sent to the backend carry secrets in clear text, so [`Secret`] serializes its
//! value as is. [`masked_serialize`] renders the same body with every secret replaced by its
//! `Debug` form for logging.
//!

use std::cell::Cell;

use erased_serde::Serialize as ErasedSerialize;
use serde::{de, Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::{Secret, Strategy};

/// Types whose [`Secret`] may be serialized.
///
/// Serializing a secret is opt-in per wrapped type so a secret cannot leave the process
/// through `serde` by accident.
pub trait SerializableSecret: Serialize {}

impl SerializableSecret for String {}
impl SerializableSecret for Value {}
impl SerializableSecret for u64 {}

thread_local! {
    static MASKING: Cell<bool> = const { Cell::new(false) };
}

impl<'de, T, I> Deserialize<'de> for Secret<T, I>
where
    T: de::DeserializeOwned,
    I: Strategy<T>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Self::new)
    }
}

impl<T, I> Serialize for Secret<T, I>
where
    T: SerializableSecret,
    I: Strategy<T>,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if MASKING.with(Cell::get) {
            format!("{self:?}").serialize(serializer)
        } else {
            self.inner_secret.serialize(serializer)
        }
    }
}

/// Serializes `value` to JSON with every [`Secret`] in it masked
pub fn masked_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Value, serde_json::Error> {
    struct Restore(bool);

    impl Drop for Restore {
        fn drop(&mut self) {
            MASKING.with(|masking| masking.set(self.0));
        }
    }

    let _restore = Restore(MASKING.with(|masking| masking.replace(true)));
    serde_json::to_value(value)
}

/// Object safe serialization for boxed request bodies, in clear text or masked
pub trait ErasedMaskSerialize: ErasedSerialize {
    /// JSON with every secret masked.
    fn masked_serialize(&self) -> Result<Value, serde_json::Error>;
}

impl<T: Serialize + ErasedSerialize> ErasedMaskSerialize for T {
    fn masked_serialize(&self) -> Result<Value, serde_json::Error> {
        masked_serialize(self)
    }
}

impl Serialize for dyn ErasedMaskSerialize + Send + '_ {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        erased_serde::serialize(self, serializer)
    }
}
