//!
//! The [`Secret`] wrapper and the traits that read it back.
//!

use std::{fmt, marker::PhantomData};

use crate::{strategy::Strategy, ZeroizableSecret};

/// A value that must not be printed.
///
/// `Debug` goes through the strategy `I`; everything else about the value is reachable only
/// through [`PeekInterface`] and [`ExposeInterface`]. A custom strategy can reveal part of the
/// value:
///
/// ```
/// use std::fmt;
///
/// use masking::{Secret, Strategy};
///
/// enum LastFour {}
///
/// impl<T: AsRef<str>> Strategy<T> for LastFour {
///     fn fmt(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         let value = value.as_ref();
///         write!(f, "******{}", value.get(value.len().saturating_sub(4)..).unwrap_or_default())
///     }
/// }
///
/// let mobile: Secret<String, LastFour> = Secret::new("9876543210".to_string());
/// assert_eq!(format!("{mobile:?}"), "******3210");
/// ```
pub struct Secret<S, I = crate::WithType>
where
    I: Strategy<S>,
{
    pub(crate) inner_secret: S,
    marker: PhantomData<I>,
}

/// Borrows the value inside a [`Secret`]
pub trait PeekInterface<S> {
    /// The wrapped value.
    fn peek(&self) -> &S;
}

/// Unwraps a [`Secret`]
pub trait ExposeInterface<S> {
    /// Consumes the wrapper and returns the value.
    fn expose(self) -> S;
}

impl<S, I> Secret<S, I>
where
    I: Strategy<S>,
{
    /// Wraps `secret`
    pub fn new(secret: S) -> Self {
        Self {
            inner_secret: secret,
            marker: PhantomData,
        }
    }
}

impl<S, I> PeekInterface<S> for Secret<S, I>
where
    I: Strategy<S>,
{
    fn peek(&self) -> &S {
        &self.inner_secret
    }
}

impl<S, I> ExposeInterface<S> for Secret<S, I>
where
    I: Strategy<S>,
{
    fn expose(self) -> S {
        self.inner_secret
    }
}

impl<S, I> From<S> for Secret<S, I>
where
    I: Strategy<S>,
{
    fn from(secret: S) -> Self {
        Self::new(secret)
    }
}

impl<S: Clone, I: Strategy<S>> Clone for Secret<S, I> {
    fn clone(&self) -> Self {
        Self::new(self.inner_secret.clone())
    }
}

impl<S: PartialEq, I: Strategy<S>> PartialEq for Secret<S, I> {
    fn eq(&self, other: &Self) -> bool {
        self.inner_secret == other.inner_secret
    }
}

impl<S: Eq, I: Strategy<S>> Eq for Secret<S, I> {}

impl<S: Default, I: Strategy<S>> Default for Secret<S, I> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S, I: Strategy<S>> fmt::Debug for Secret<S, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        I::fmt(&self.inner_secret, f)
    }
}

impl<S: ZeroizableSecret, I: Strategy<S>> ZeroizableSecret for Secret<S, I> {
    fn zeroize(&mut self) {
        self.inner_secret.zeroize();
    }
}
