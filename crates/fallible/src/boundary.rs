//! The unwind boundary around user-supplied mappers.
//!
//! Panics raised inside a mapper become [`Error`]s with code `UNKNOWN` in the
//! `"library-internal"` domain. A panic carrying a [`Passthrough`] payload is resumed
//! untouched, so signals such as cancellation can unwind through a combinator chain.
//! A [`ContractViolation`] is resumed as well: misuse of this API is a bug at the call
//! site and never becomes an `Error` value.
//!
//! Only effective with `panic = "unwind"`; under `panic = "abort"` a panicking mapper
//! aborts the process like any other panic.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::Result;
use crate::builder::err_at;
use crate::codes::ErrorCode;
use crate::error::Error;
use crate::origin::SourceOrigin;
use crate::throw::Thrown;

pub const INTERNAL_DOMAIN: &str = "library-internal";

/// Panic payload that the mapper boundary never converts into an [`Error`].
pub struct Passthrough {
    payload: Box<dyn Any + Send>,
}

impl Passthrough {
    pub fn new<P: Any + Send>(payload: P) -> Self {
        Self {
            payload: Box::new(payload),
        }
    }

    pub fn payload(&self) -> &(dyn Any + Send) {
        &*self.payload
    }

    pub fn into_inner(self) -> Box<dyn Any + Send> {
        self.payload
    }
}

impl fmt::Debug for Passthrough {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Passthrough").finish_non_exhaustive()
    }
}

/// Unwinds with `payload` wrapped in [`Passthrough`].
///
/// Uses `resume_unwind`, so the panic hook is not invoked.
pub fn unwind_through<P: Any + Send>(payload: P) -> ! {
    panic::resume_unwind(Box::new(Passthrough::new(payload)))
}

/// Panic payload for misuse of this API, such as asking for the single cause of an
/// error that has none.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (at {origin})")]
pub struct ContractViolation {
    origin: SourceOrigin,
    message: String,
}

impl ContractViolation {
    pub fn origin(&self) -> &SourceOrigin {
        &self.origin
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Unwinds with a [`ContractViolation`] located at the caller.
#[track_caller]
pub(crate) fn contract_violation(message: impl Into<String>) -> ! {
    let violation = ContractViolation {
        origin: SourceOrigin::current(),
        message: message.into(),
    };
    tracing::error!(origin = %violation.origin, "contract violation: {}", violation.message);
    panic::panic_any(violation)
}

/// Runs `mapper`, converting a panic into a failed result.
#[track_caller]
pub(crate) fn guard<U, F>(mapper: F) -> Result<U>
where
    F: FnOnce() -> Result<U>,
{
    let origin = SourceOrigin::current();
    match panic::catch_unwind(AssertUnwindSafe(mapper)) {
        Ok(result) => result,
        Err(payload) => Err(convert_panic(payload, origin)),
    }
}

/// Turns a caught panic payload into an [`Error`], resuming it if it is a
/// [`Passthrough`] or a [`ContractViolation`].
pub(crate) fn convert_panic(payload: Box<dyn Any + Send>, origin: SourceOrigin) -> Error {
    if payload.is::<Passthrough>() || payload.is::<ContractViolation>() {
        panic::resume_unwind(payload);
    }

    let message = panic_message(&*payload);
    tracing::warn!(%origin, panic = %message, "user mapper panicked; converting to error");

    let builder = err_at(ErrorCode::UNKNOWN, origin)
        .domain(INTERNAL_DOMAIN)
        .reason(format!("unhandled panic in user mapper: {message}"));
    match payload.downcast::<Thrown>() {
        Ok(thrown) => builder.add_sub_error(thrown.into_error()).done(),
        Err(_) => builder.done(),
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(violation) = payload.downcast_ref::<ContractViolation>() {
        violation.to_string()
    } else if let Some(thrown) = payload.downcast_ref::<Thrown>() {
        thrown.error().describe()
    } else {
        "opaque panic payload".to_string()
    }
}
