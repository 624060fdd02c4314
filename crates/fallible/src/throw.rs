//! Bridge to unwinding code: raise an [`Error`] as a panic payload and catch it back.

use std::panic::{self, AssertUnwindSafe};

use crate::Result;
use crate::boundary::convert_panic;
use crate::error::Error;
use crate::origin::SourceOrigin;

/// Panic payload carrying an [`Error`] raised by [`throw_error`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct Thrown(Error);

impl Thrown {
    pub fn error(&self) -> &Error {
        &self.0
    }

    pub fn into_error(self) -> Error {
        self.0
    }
}

/// Unwinds with a [`Thrown`] payload holding `error`.
pub fn throw_error(error: Error) -> ! {
    panic::panic_any(Thrown(error))
}

/// Runs `f`, turning an unwind back into an [`Error`].
///
/// A [`Thrown`] payload yields the original error unchanged. Other panics are
/// converted the same way the mapper boundary converts them, and
/// [`Passthrough`](crate::Passthrough) payloads keep unwinding.
#[track_caller]
pub fn catch_thrown<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> T,
{
    let origin = SourceOrigin::current();
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) => match payload.downcast::<Thrown>() {
            Ok(thrown) => Err(thrown.into_error()),
            Err(other) => Err(convert_panic(other, origin)),
        },
    }
}
