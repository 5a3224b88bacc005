//! Process-wide registry of error types that must never be captured.
//!
//! [`Try::capture`](crate::Try::capture) boxes every error it sees into a
//! `Failure` — except errors whose concrete type is registered here, which
//! are rethrown to the caller instead. The registry exists so integrators can
//! opt whole error categories (control-flow signals, invariant violations)
//! out of being silently boxed, while everything else stays captured.
//!
//! # Concurrency
//!
//! The registry is process-wide. Updates go through an `RwLock`, so a
//! replacement is atomic and visible to other threads. Even so, callers that
//! rely on deterministic capture behavior must treat configuration as a
//! startup-time concern: replace the registry once, before spawning
//! concurrent work that calls the capturing entry points.

use std::any::TypeId;
use std::sync::{PoisonError, RwLock, RwLockWriteGuard};

use tracing::debug;

static UNHANDLED: RwLock<Vec<TypeId>> = RwLock::new(Vec::new());

/// Atomically replace the set of unhandled error types.
///
/// The previous contents are discarded wholesale; types not present in
/// `types` are captured again from this point on.
///
/// ```no_run
/// use std::any::TypeId;
/// use std::num::ParseIntError;
/// use trying_types::{Try, set_unhandled};
///
/// set_unhandled([TypeId::of::<ParseIntError>()]);
/// // Now panics instead of producing a Failure:
/// let _ = Try::capture(|| "nope".parse::<i32>());
/// ```
pub fn set_unhandled<I>(types: I)
where
    I: IntoIterator<Item = TypeId>,
{
    let types: Vec<TypeId> = types.into_iter().collect();
    debug!(count = types.len(), "replacing unhandled error registry");
    *write_registry() = types;
}

/// Clear the registry: every error type is captured again.
pub fn clear_unhandled() {
    debug!("clearing unhandled error registry");
    write_registry().clear();
}

pub(crate) fn is_unhandled(type_id: TypeId) -> bool {
    UNHANDLED
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .contains(&type_id)
}

fn write_registry() -> RwLockWriteGuard<'static, Vec<TypeId>> {
    // The registry holds plain data, so a poisoned lock is still usable.
    UNHANDLED.write().unwrap_or_else(PoisonError::into_inner)
}
