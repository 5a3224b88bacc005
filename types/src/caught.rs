//! Type-erased captured errors.
//!
//! [`CaughtError`] is the payload of a `Failure`: any concrete error boxed
//! together with its type identity, so that equality, hashing, and the
//! unhandled registry can all reason about the *exact* concrete type rather
//! than a trait-object view of it.

use std::any::{Any, TypeId, type_name};
use std::error::Error;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use thiserror::Error as ThisError;

/// A captured error with its concrete type identity preserved.
///
/// The error itself is stored behind an `Arc`, so cloning a `CaughtError`
/// (and therefore a `Failure`) is cheap and never touches the inner error.
///
/// # Equality
///
/// Two `CaughtError`s are equal when they captured the **same concrete error
/// type** and the errors render to the same message. A subtype-style
/// relationship is never enough: two different error types with identical
/// messages compare unequal. Richer state the error may carry (a source
/// chain, for example) does not participate in the comparison.
#[derive(Clone)]
pub struct CaughtError {
    type_id: TypeId,
    type_name: &'static str,
    inner: Arc<dyn Error + Send + Sync>,
}

impl CaughtError {
    /// Box a concrete error, recording its type identity.
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            type_id: TypeId::of::<E>(),
            type_name: type_name::<E>(),
            inner: Arc::new(error),
        }
    }

    /// Whether the captured error is exactly of type `E`.
    #[must_use]
    pub fn is<E>(&self) -> bool
    where
        E: Error + 'static,
    {
        self.type_id == TypeId::of::<E>()
    }

    /// Borrow the captured error as its concrete type, if it is an `E`.
    #[must_use]
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: Error + 'static,
    {
        self.inner.as_ref().downcast_ref()
    }

    /// The `type_name` of the captured error, for diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The `TypeId` of the captured error.
    ///
    /// Useful for feeding an already-captured error back into
    /// [`set_unhandled`](crate::set_unhandled).
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }
}

impl fmt::Display for CaughtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl fmt::Debug for CaughtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl Error for CaughtError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.source()
    }
}

impl PartialEq for CaughtError {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.inner.to_string() == other.inner.to_string()
    }
}

impl Eq for CaughtError {}

impl Hash for CaughtError {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
        self.inner.to_string().hash(state);
    }
}

/// A panic captured by [`Try::capture_unwind`](crate::Try::capture_unwind).
///
/// Carries the panic message when the payload was a string (the overwhelmingly
/// common case); other payload types are recorded as `unknown panic`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, ThisError)]
#[error("caught panic: {message}")]
pub struct CaughtPanic {
    message: String,
}

impl CaughtPanic {
    pub(crate) fn from_payload(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        Self { message }
    }

    /// The extracted panic message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
