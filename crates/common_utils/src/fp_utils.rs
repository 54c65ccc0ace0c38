//! Functional programming utilities

/// Like `Option::then`, but for a fallible guard: evaluates `f` only when `predicate` holds.
pub fn when<E, F>(predicate: bool, f: F) -> Result<(), E>
where
    F: FnOnce() -> Result<(), E>,
{
    if predicate {
        f()
    } else {
        Ok(())
    }
}
