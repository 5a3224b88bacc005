//! Captured-failure results for fallible computations.
//!
//! [`Try<T>`] is either a [`Success`] holding the outcome of a computation or
//! a [`Failure`] holding the error it produced. The combinators on `Try` let
//! fallible steps be chained without branch-on-error code at every step:
//! errors raised inside [`Try::capture`], [`Try::map`], and [`Try::recover`]
//! are boxed into `Failure` instead of propagating, unless their concrete
//! type has been registered with [`set_unhandled`].
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. Instances are immutable after construction; every combinator
//! returns a new value.
//!
//! # Example
//!
//! ```
//! use trying_types::Try;
//!
//! let port = Try::capture(|| "8080".parse::<u32>())
//!     .filter(|port| *port >= 1024)
//!     .map(u16::try_from)
//!     .get_or_else(8000);
//! assert_eq!(port, 8080);
//! ```
//!
//! # Hashing
//!
//! A `Try` hashes exactly as its payload does: `hash(Success(a)) == hash(a)`.
//! The impl exists only when the payload is hashable, so hashing a `Try`
//! over a non-hashable payload is a compile error rather than a degraded
//! hash:
//!
//! ```compile_fail
//! use std::collections::hash_map::DefaultHasher;
//! use std::hash::{Hash, Hasher};
//! use trying_types::Try;
//!
//! let mut hasher = DefaultHasher::new();
//! Try::success(1.0_f64).hash(&mut hasher);
//! ```

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented on the methods that panic

mod caught;
pub mod curried;
mod unhandled;

pub use caught::{CaughtError, CaughtPanic};
pub use unhandled::{clear_unhandled, set_unhandled};

use std::any::{TypeId, type_name, type_name_of_val};
use std::error::Error;
use std::hash::{Hash, Hasher};
use std::panic::{self, UnwindSafe};

use thiserror::Error as ThisError;
use tracing::{debug, trace};

/// The result of a fallible computation: a value or a captured error.
///
/// Exactly two variants exist, and an instance is always exactly one of them.
/// The error side is type-erased into a [`CaughtError`], so a single chain
/// can pass through steps failing with unrelated error types.
///
/// Rust has no truthiness, so where the original boolean-context shorthand
/// would be used, call [`Try::is_success`].
#[must_use = "this `Try` may be a `Failure`, which should be handled"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Try<T> {
    /// A completed computation and its value.
    Success(T),
    /// A captured error.
    Failure(CaughtError),
}

pub use self::Try::{Failure, Success};

impl<T> Try<T> {
    /// Wrap a value in a `Success`.
    pub fn success(value: T) -> Self {
        Success(value)
    }

    /// Wrap an error in a `Failure`.
    ///
    /// Direct construction does not consult the unhandled registry; only the
    /// capturing entry points do.
    ///
    /// The payload must be a genuine error value. The `Error` bound enforces
    /// this at compile time, so smuggling arbitrary state through an
    /// error-handling path does not compile:
    ///
    /// ```compile_fail
    /// let _ = trying_types::Try::<i32>::failure(1);
    /// ```
    pub fn failure<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Failure(CaughtError::new(error))
    }

    /// Run a fallible computation and capture its outcome.
    ///
    /// A normal return becomes a `Success`; an error becomes a `Failure` —
    /// unless the error's concrete type is registered via [`set_unhandled`],
    /// in which case no `Try` is produced and the error is rethrown to the
    /// caller as a panic carrying the error value.
    ///
    /// Arguments to the computation are closed over:
    ///
    /// ```
    /// use trying_types::Try;
    ///
    /// let input = "4";
    /// assert_eq!(Try::capture(|| input.parse::<i32>()).get(), 4);
    /// assert!(Try::capture(|| "nope".parse::<i32>()).is_failure());
    /// ```
    pub fn capture<E, F>(f: F) -> Self
    where
        F: FnOnce() -> Result<T, E>,
        E: Error + Send + Sync + 'static,
    {
        match f() {
            Ok(value) => Success(value),
            Err(error) => Self::capture_error(error),
        }
    }

    /// Like [`Try::capture`], but a panic in the computation is captured as
    /// a `Failure` wrapping a [`CaughtPanic`].
    ///
    /// Registering `CaughtPanic` itself as unhandled makes panics resume
    /// unwinding instead of being boxed. Closures holding non-unwind-safe
    /// state can be passed through [`std::panic::AssertUnwindSafe`].
    ///
    /// ```
    /// use trying_types::Try;
    ///
    /// let items: Vec<i32> = Vec::new();
    /// let first = Try::capture_unwind(|| Ok::<_, std::convert::Infallible>(items[0]));
    /// assert!(first.is_failure());
    /// ```
    pub fn capture_unwind<E, F>(f: F) -> Self
    where
        F: FnOnce() -> Result<T, E> + UnwindSafe,
        E: Error + Send + Sync + 'static,
    {
        match panic::catch_unwind(f) {
            Ok(Ok(value)) => Success(value),
            Ok(Err(error)) => Self::capture_error(error),
            Err(payload) => {
                if unhandled::is_unhandled(TypeId::of::<CaughtPanic>()) {
                    panic::resume_unwind(payload);
                }
                let caught = CaughtPanic::from_payload(payload.as_ref());
                trace!(error = %caught, "captured panic");
                Failure(CaughtError::new(caught))
            }
        }
    }

    /// Box `error` into a `Failure`, or rethrow it if its type is registered
    /// as unhandled.
    fn capture_error<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        if unhandled::is_unhandled(TypeId::of::<E>()) {
            debug!(
                error_type = type_name::<E>(),
                "error type registered as unhandled, rethrowing"
            );
            panic::panic_any(error);
        }
        let caught = CaughtError::new(error);
        trace!(error = %caught, "captured failure");
        Failure(caught)
    }

    /// Whether this is a `Success`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Success(_))
    }

    /// Whether this is a `Failure`.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Failure(_))
    }

    /// Return the wrapped value.
    ///
    /// # Panics
    ///
    /// Panics if this is a `Failure`, with a message rendering the captured
    /// error. Prefer [`Try::into_result`] or [`Try::get_or_else`] when the
    /// failure case is expected.
    #[track_caller]
    pub fn get(self) -> T {
        match self {
            Success(value) => value,
            Failure(error) => panic!("called `Try::get()` on a `Failure` value: {error}"),
        }
    }

    /// Return the wrapped value, or `default` if this is a `Failure`.
    ///
    /// ```
    /// use trying_types::Try;
    ///
    /// assert_eq!(Try::success(1).get_or_else(-1), 1);
    /// assert_eq!(Try::capture(|| "nope".parse::<i32>()).get_or_else(-1), -1);
    /// ```
    #[must_use]
    pub fn get_or_else(self, default: T) -> T {
        match self {
            Success(value) => value,
            Failure(_) => default,
        }
    }

    /// Return self, or `default` verbatim if this is a `Failure`.
    pub fn or_else(self, default: Try<T>) -> Try<T> {
        match self {
            Success(value) => Success(value),
            Failure(_) => default,
        }
    }

    /// Convert into a `Result`, surrendering the captured error.
    pub fn into_result(self) -> Result<T, CaughtError> {
        match self {
            Success(value) => Ok(value),
            Failure(error) => Err(error),
        }
    }

    /// Convert into an `Option`, discarding the captured error.
    #[must_use]
    pub fn ok(self) -> Option<T> {
        match self {
            Success(value) => Some(value),
            Failure(_) => None,
        }
    }

    /// Apply a fallible transformation to the value.
    ///
    /// The transformation runs through the capturing entry point, so an error
    /// it produces is boxed rather than propagated; a `Failure` is returned
    /// unchanged.
    ///
    /// ```
    /// use trying_types::Try;
    ///
    /// let byte = Try::capture(|| "250".parse::<i32>()).map(u8::try_from);
    /// assert_eq!(byte, Try::success(250));
    ///
    /// let too_big = Try::capture(|| "300".parse::<i32>()).map(u8::try_from);
    /// assert!(too_big.is_failure());
    /// ```
    pub fn map<U, E, F>(self, f: F) -> Try<U>
    where
        F: FnOnce(T) -> Result<U, E>,
        E: Error + Send + Sync + 'static,
    {
        match self {
            Success(value) => Try::capture(|| f(value)),
            Failure(error) => Failure(error),
        }
    }

    /// Apply a transformation that itself returns a `Try`.
    ///
    /// The "must return a `Try`" contract is the signature; a `Failure` is
    /// returned unchanged.
    ///
    /// ```
    /// use trying_types::Try;
    ///
    /// let byte = Try::capture(|| "250".parse::<i32>())
    ///     .flat_map(|n| Try::capture(|| u8::try_from(n)));
    /// assert_eq!(byte, Try::success(250));
    /// ```
    pub fn flat_map<U, F>(self, f: F) -> Try<U>
    where
        F: FnOnce(T) -> Try<U>,
    {
        match self {
            Success(value) => f(value),
            Failure(error) => Failure(error),
        }
    }

    /// Turn a `Success` whose value fails the predicate into a `Failure`
    /// wrapping a [`FilterError`] naming the predicate; a `Failure` is
    /// returned unchanged.
    ///
    /// ```
    /// use trying_types::Try;
    ///
    /// assert!(Try::success(1).filter(|n| *n > 0).is_success());
    /// assert!(Try::success(-1).filter(|n| *n > 0).is_failure());
    /// ```
    pub fn filter<P>(self, predicate: P) -> Try<T>
    where
        P: FnOnce(&T) -> bool,
    {
        let reason = type_name_of_val(&predicate);
        self.filter_or_else(predicate, || FilterError::new(reason))
    }

    /// Like [`Try::filter`], with a caller-supplied error for the rejection.
    ///
    /// ```
    /// use trying_types::{FilterError, Try};
    ///
    /// let rejected = Try::success(-1)
    ///     .filter_or_else(|n| *n > 0, || FilterError::new("port must be positive"));
    /// assert!(rejected.is_failure());
    /// ```
    pub fn filter_or_else<P, E, F>(self, predicate: P, error: F) -> Try<T>
    where
        P: FnOnce(&T) -> bool,
        F: FnOnce() -> E,
        E: Error + Send + Sync + 'static,
    {
        match self {
            Success(value) => {
                if predicate(&value) {
                    Success(value)
                } else {
                    Try::failure(error())
                }
            }
            Failure(error) => Failure(error),
        }
    }

    /// Apply a fallible transformation to the captured error; a `Success` is
    /// returned unchanged.
    ///
    /// The transformation runs through the capturing entry point, so a
    /// recovery that itself fails produces a new `Failure`.
    ///
    /// ```
    /// use trying_types::Try;
    ///
    /// let n = Try::capture(|| "nope".parse::<i32>()).recover(|_| "0".parse());
    /// assert_eq!(n, Try::success(0));
    /// ```
    pub fn recover<E, F>(self, f: F) -> Try<T>
    where
        F: FnOnce(CaughtError) -> Result<T, E>,
        E: Error + Send + Sync + 'static,
    {
        match self {
            Success(value) => Success(value),
            Failure(error) => Try::capture(|| f(error)),
        }
    }

    /// Apply a recovery that itself returns a `Try`; a `Success` is returned
    /// unchanged.
    ///
    /// ```
    /// use trying_types::Try;
    ///
    /// let n = Try::capture(|| "nope".parse::<i32>())
    ///     .recover_with(|_| Try::capture(|| "0".parse::<i32>()));
    /// assert_eq!(n, Try::success(0));
    /// ```
    pub fn recover_with<F>(self, f: F) -> Try<T>
    where
        F: FnOnce(CaughtError) -> Try<T>,
    {
        match self {
            Success(value) => Success(value),
            Failure(error) => f(error),
        }
    }

    /// Invert the variant: a `Failure` becomes a `Success` wrapping its
    /// captured error, and a `Success` becomes a `Failure` wrapping a
    /// [`CannotFailError`].
    ///
    /// ```
    /// use trying_types::Try;
    ///
    /// let failure = Try::capture(|| "nope".parse::<i32>());
    /// assert!(failure.failed().is_success());
    /// assert!(Try::success(1).failed().is_failure());
    /// ```
    pub fn failed(self) -> Try<CaughtError> {
        match self {
            Success(_) => Try::failure(CannotFailError),
            Failure(error) => Success(error),
        }
    }
}

impl<T, E> From<Result<T, E>> for Try<T>
where
    E: Error + Send + Sync + 'static,
{
    /// Direct conversion; like [`Try::failure`], this does not consult the
    /// unhandled registry.
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Success(value),
            Err(error) => Try::failure(error),
        }
    }
}

/// A `Try` hashes exactly as its payload does, so `hash(Success(a))` equals
/// `hash(a)` and equal instances hash equal.
impl<T: Hash> Hash for Try<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Success(value) => value.hash(state),
            Failure(error) => error.hash(state),
        }
    }
}

/// Error produced when [`Try::filter`] rejects a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, ThisError)]
#[error("value rejected by predicate: {reason}")]
pub struct FilterError {
    reason: String,
}

impl FilterError {
    /// Build a rejection with the given reason (a caller-supplied message,
    /// or the predicate's type name when none was given).
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Why the value was rejected.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Error produced when [`Try::failed`] is applied to a `Success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ThisError)]
#[error("cannot fail a `Success`")]
pub struct CannotFailError;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    #[derive(Debug, PartialEq, Eq, ThisError)]
    #[error("division by zero")]
    struct DivideByZero;

    fn divide(numerator: i32, denominator: i32) -> Result<i32, DivideByZero> {
        numerator.checked_div(denominator).ok_or(DivideByZero)
    }

    fn hash_of(value: &impl Hash) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn capture_wraps_division_outcomes() {
        let failure = Try::capture(|| divide(1, 0));
        assert!(failure.is_failure());
        assert!(!failure.is_success());

        let success = Try::capture(|| divide(4, 2));
        assert!(success.is_success());
        assert!(!success.is_failure());
        assert_eq!(success.get(), 2);
    }

    #[test]
    fn get_returns_the_wrapped_value() {
        assert_eq!(Try::success(1).get(), 1);
    }

    #[test]
    #[should_panic(expected = "called `Try::get()` on a `Failure` value: division by zero")]
    fn get_panics_with_the_captured_error() {
        let _ = Try::<i32>::failure(DivideByZero).get();
    }

    #[test]
    fn into_result_and_ok_expose_both_sides() {
        assert_eq!(Try::success(1).into_result().ok(), Some(1));
        assert_eq!(Try::success(1).ok(), Some(1));

        let caught = Try::<i32>::failure(DivideByZero).into_result().unwrap_err();
        assert!(caught.is::<DivideByZero>());
        assert_eq!(Try::<i32>::failure(DivideByZero).ok(), None);
    }

    #[test]
    fn map_transforms_a_success() {
        let negated = Try::success(1).map(|n| divide(-n, 1));
        assert_eq!(negated, Try::success(-1));
    }

    #[test]
    fn map_boxes_an_error_raised_by_the_transformation() {
        let failure = Try::success(1).map(|n| divide(n, 0));
        assert!(failure.is_failure());
    }

    #[test]
    fn map_is_identity_on_a_failure() {
        let failure = Try::<i32>::failure(DivideByZero);
        assert_eq!(failure.clone().map(|n| divide(n, 1)), failure);
    }

    #[test]
    fn flat_map_chains_through_a_success() {
        let chained = Try::success(4).flat_map(|n| Try::capture(|| divide(n, 2)));
        assert_eq!(chained, Try::success(2));

        let chained = Try::success(4).flat_map(|n| Try::capture(|| divide(n, 0)));
        assert!(chained.is_failure());
    }

    #[test]
    fn flat_map_is_identity_on_a_failure() {
        let failure = Try::<i32>::failure(DivideByZero);
        assert_eq!(
            failure.clone().flat_map(|n| Try::success(n + 1)),
            failure
        );
    }

    #[test]
    fn filter_keeps_a_passing_value() {
        assert_eq!(Try::success(1).filter(|n| *n > 0), Try::success(1));
    }

    #[test]
    fn filter_rejects_with_a_filter_error() {
        let rejected = Try::success(-1).filter(|n| *n > 0);
        let caught = rejected.into_result().unwrap_err();
        assert!(caught.is::<FilterError>());
    }

    #[test]
    fn filter_or_else_uses_the_supplied_error() {
        let rejected = Try::success(-1).filter_or_else(|n| *n > 0, || DivideByZero);
        assert_eq!(rejected, Try::failure(DivideByZero));
    }

    #[test]
    fn filter_is_identity_on_a_failure() {
        let failure = Try::<i32>::failure(DivideByZero);
        assert_eq!(failure.clone().filter(|_| false), failure);
    }

    #[test]
    fn recover_replaces_a_failure() {
        let recovered = Try::<i32>::failure(DivideByZero).recover(|_| divide(0, 1));
        assert_eq!(recovered, Try::success(0));
    }

    #[test]
    fn recover_boxes_an_error_raised_by_the_recovery() {
        let still_failed = Try::<i32>::failure(DivideByZero).recover(|_| divide(1, 0));
        assert!(still_failed.is_failure());
    }

    #[test]
    fn recover_is_identity_on_a_success() {
        assert_eq!(Try::success(1).recover(|_| divide(0, 1)), Try::success(1));
    }

    #[test]
    fn recover_with_follows_the_returned_try() {
        let recovered =
            Try::<i32>::failure(DivideByZero).recover_with(|_| Try::capture(|| divide(0, 1)));
        assert_eq!(recovered, Try::success(0));

        let still_failed =
            Try::<i32>::failure(DivideByZero).recover_with(|_| Try::capture(|| divide(1, 0)));
        assert!(still_failed.is_failure());
    }

    #[test]
    fn recover_with_is_identity_on_a_success() {
        assert_eq!(
            Try::success(1).recover_with(|_| Try::success(-1)),
            Try::success(1)
        );
    }

    #[test]
    fn recover_receives_the_captured_error() {
        let recovered = Try::<String>::failure(DivideByZero)
            .recover(|e| Ok::<_, DivideByZero>(e.type_name().to_string()));
        assert!(recovered.get().ends_with("DivideByZero"));
    }

    #[test]
    fn failed_inverts_a_failure_into_its_error() {
        let inverted = Try::<i32>::failure(DivideByZero).failed();
        assert_eq!(inverted, Try::success(CaughtError::new(DivideByZero)));
    }

    #[test]
    fn failed_on_a_success_is_a_cannot_fail_failure() {
        let caught = Try::success(1).failed().into_result().unwrap_err();
        assert!(caught.is::<CannotFailError>());
    }

    #[test]
    fn get_or_else_and_or_else_fall_back_on_failure() {
        assert_eq!(Try::success(1).get_or_else(-1), 1);
        assert_eq!(Try::<i32>::failure(DivideByZero).get_or_else(-1), -1);

        let fallback = Try::success(0);
        assert_eq!(Try::success(1).or_else(fallback.clone()), Try::success(1));
        assert_eq!(
            Try::<i32>::failure(DivideByZero).or_else(fallback.clone()),
            fallback
        );
    }

    #[test]
    fn equality_of_success_follows_the_value() {
        assert_eq!(Try::success(1), Try::success(1));
        assert_ne!(Try::success(1), Try::success(2));
    }

    #[test]
    fn equality_never_crosses_variants() {
        assert_ne!(Try::failure(DivideByZero), Try::success(1));
        assert_ne!(Try::success(1), Try::failure(DivideByZero));
    }

    #[test]
    fn equality_of_failure_requires_exact_error_type() {
        #[derive(Debug, ThisError)]
        #[error("division by zero")]
        struct ImpostorError;

        // Same rendered message, different concrete type.
        assert_ne!(
            Try::<i32>::failure(DivideByZero),
            Try::<i32>::failure(ImpostorError)
        );
        assert_eq!(
            Try::<i32>::failure(DivideByZero),
            Try::<i32>::failure(DivideByZero)
        );
    }

    #[test]
    fn success_hashes_as_its_value() {
        assert_eq!(hash_of(&Try::success(1)), hash_of(&1_i32));
    }

    #[test]
    fn equal_failures_hash_equal() {
        assert_eq!(
            hash_of(&Try::<i32>::failure(DivideByZero)),
            hash_of(&Try::<i32>::failure(DivideByZero))
        );
    }

    #[test]
    fn debug_renders_the_wrapped_payload() {
        assert_eq!(format!("{:?}", Try::success(1)), "Success(1)");
        assert_eq!(
            format!("{:?}", Try::<i32>::failure(DivideByZero)),
            "Failure(DivideByZero)"
        );
    }

    #[test]
    fn from_result_converts_both_sides() {
        assert_eq!(Try::from(divide(4, 2)), Try::success(2));
        assert_eq!(Try::from(divide(1, 0)), Try::failure(DivideByZero));
    }

    #[test]
    fn capture_unwind_boxes_a_panic() {
        let items: Vec<i32> = Vec::new();
        let first = Try::capture_unwind(|| divide(items[0], 1));
        let caught = first.into_result().unwrap_err();
        let panic = caught.downcast_ref::<CaughtPanic>().unwrap();
        assert!(panic.message().contains("index out of bounds"));
    }

    #[test]
    fn capture_unwind_still_captures_plain_errors() {
        assert!(Try::capture_unwind(|| divide(1, 0)).is_failure());
        assert_eq!(Try::capture_unwind(|| divide(4, 2)), Try::success(2));
    }

    #[test]
    fn cloned_instances_compare_equal() {
        let success = Try::success(1);
        assert_eq!(success.clone(), success);

        let failure = Try::<i32>::failure(DivideByZero);
        assert_eq!(failure.clone(), failure);
    }
}
