//!
//! Header values that are either sent as they are or masked in logs.
//!

use std::{fmt, hash};

use crate::{PeekInterface, Secret};

/// A value logged as is, or masked like a [`Secret`]
#[derive(Clone, PartialEq, Eq)]
pub enum Maskable<T: Clone + Eq> {
    /// Printed masked, e.g. an `Authorization` header
    Masked(Secret<T>),
    /// Printed as is
    Normal(T),
}

impl<T: Clone + Eq> Maskable<T> {
    /// The value, masked or not
    pub fn inner(&self) -> &T {
        match self {
            Self::Masked(secret) => secret.peek(),
            Self::Normal(value) => value,
        }
    }

    /// Whether the value is hidden from logs
    pub fn is_masked(&self) -> bool {
        matches!(self, Self::Masked(_))
    }
}

impl<T: Clone + Eq + fmt::Debug> fmt::Debug for Maskable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Masked(secret) => fmt::Debug::fmt(secret, f),
            Self::Normal(value) => fmt::Debug::fmt(value, f),
        }
    }
}

impl<T: Clone + Eq + hash::Hash> hash::Hash for Maskable<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.is_masked().hash(state);
        self.inner().hash(state);
    }
}

/// Turns a value into a masked [`Maskable`]
pub trait Mask {
    /// Type of the masked value
    type Output: Clone + Eq;

    /// Wraps `self` so it is masked when logged.
    fn into_masked(self) -> Maskable<Self::Output>;
}

impl Mask for String {
    type Output = Self;

    fn into_masked(self) -> Maskable<Self> {
        Maskable::Masked(Secret::new(self))
    }
}

impl Mask for Secret<String> {
    type Output = String;

    fn into_masked(self) -> Maskable<String> {
        Maskable::Masked(self)
    }
}

impl<T: Clone + Eq> From<T> for Maskable<T> {
    fn from(value: T) -> Self {
        Self::Normal(value)
    }
}

impl From<&str> for Maskable<String> {
    fn from(value: &str) -> Self {
        Self::Normal(value.to_string())
    }
}
