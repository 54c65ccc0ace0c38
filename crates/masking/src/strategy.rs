use core::fmt;

/// Decides what a [`crate::Secret`] prints in place of its value
pub trait Strategy<T> {
    /// Writes the masked representation of `value`.
    fn fmt(value: &T, fmt: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// Prints only the name of the wrapped type, e.g. `*** alloc::string::String ***`
#[derive(Debug)]
pub enum WithType {}

impl<T> Strategy<T> for WithType {
    fn fmt(_: &T, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "*** {} ***", std::any::type_name::<T>())
    }
}
