//! Curried construction of [`Try`] values.

use std::error::Error;

use crate::Try;

/// Wrap a fallible function so that every call returns a [`Try`].
///
/// Pure partial-application sugar over [`Try::capture`]: the returned closure
/// forwards its argument verbatim. Multi-argument functions take a tuple.
///
/// ```
/// use trying_types::curried::lift;
///
/// let try_parse = lift(|s: &str| s.parse::<i32>());
/// assert_eq!(try_parse("4").get(), 4);
/// assert!(try_parse("nope").is_failure());
/// ```
pub fn lift<A, T, E, F>(f: F) -> impl Fn(A) -> Try<T>
where
    F: Fn(A) -> Result<T, E>,
    E: Error + Send + Sync + 'static,
{
    move |args| Try::capture(|| f(args))
}
