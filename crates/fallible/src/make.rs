//! Free-standing constructors and conversions for [`Result`] and [`Status`].

use crate::boundary::contract_violation;
use crate::builder::err;
use crate::codes::ErrorCode;
use crate::error::Error;
use crate::{Result, Status};

/// `Ok(())`.
pub fn ok() -> Status {
    Ok(())
}

/// A failure not yet bound to a value type.
///
/// Converts into `Result<T>` for any `T`, so one failure can be returned from
/// functions with different payloads.
#[must_use = "a failure does nothing unless it is returned"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    error: Error,
}

impl Failure {
    pub fn new(error: Error) -> Self {
        Self { error }
    }

    pub fn error(&self) -> &Error {
        &self.error
    }

    pub fn into_error(self) -> Error {
        self.error
    }

    pub fn into_result<T>(self) -> Result<T> {
        Err(self.error)
    }
}

impl<T> From<Failure> for Result<T> {
    fn from(failure: Failure) -> Self {
        failure.into_result()
    }
}

pub fn fail(error: impl Into<Error>) -> Failure {
    Failure::new(error.into())
}

/// Re-types the error held by a failed `result`.
///
/// # Panics
///
/// Unwinds with a [`ContractViolation`](crate::ContractViolation) if `result` is
/// `Ok`, even inside a mapper; check `failed()` first.
///
/// ```
/// use fallible::{ErrorCode, Result, err, fail, propagate_error};
///
/// fn gadget() -> Result<u32> {
///     fail(err(ErrorCode::NOT_FOUND).done()).into()
/// }
///
/// fn widget() -> Result<String> {
///     let gadget = gadget();
///     if gadget.is_err() {
///         return propagate_error(&gadget).into();
///     }
///     Ok("widget".to_string())
/// }
///
/// assert!(widget().is_err());
/// ```
#[track_caller]
pub fn propagate_error<T>(result: &Result<T>) -> Failure {
    match result {
        Err(error) => Failure::new(error.clone()),
        Ok(_) => contract_violation("propagate_error called on a successful result"),
    }
}

/// Erases the value type, keeping only success or the error.
pub fn just_status<T>(result: &Result<T>) -> Status {
    match result {
        Ok(_) => ok(),
        Err(error) => Err(error.clone()),
    }
}

/// Converts a platform `(code, category, message)` triple; code `0` means success.
#[track_caller]
pub fn to_status(code: i32, category: &str, message: impl Into<String>) -> Status {
    if code == 0 {
        return ok();
    }
    Err(err(code).domain(category).reason(message).done())
}

#[track_caller]
pub fn not_supported() -> Failure {
    fail(
        err(ErrorCode::NOT_SUPPORTED)
            .domain("Canonical")
            .reason("Not supported"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed_out() -> Error {
        err(ErrorCode::TIMED_OUT).reason("Operation timed out").done()
    }

    #[test]
    fn failure_adapts_to_any_value_type() {
        let response: Result<String> = fail(timed_out()).into();
        assert!(response.is_err());

        let lines: Result<Vec<String>> = propagate_error(&response).into();
        let error = lines.expect_err("propagated failure");
        assert_eq!(error.code(), ErrorCode::TIMED_OUT);
        assert_eq!(error.reason(), "Operation timed out");
    }

    #[test]
    fn propagate_error_on_ok_is_a_contract_violation() {
        let result: Result<i32> = Ok(1);
        let payload = std::panic::catch_unwind(|| {
            let _ = propagate_error(&result);
        })
            .expect_err("propagating a success must unwind");
        let violation = payload
            .downcast::<crate::ContractViolation>()
            .expect("ContractViolation payload");
        assert_eq!(violation.message(), "propagate_error called on a successful result");
    }

    #[test]
    fn just_status_erases_payload() {
        assert_eq!(just_status(&Ok::<_, Error>(42)), Ok(()));

        let response: Result<String> = Err(timed_out());
        let status = just_status(&response);
        assert_eq!(status.expect_err("failure kept").code(), ErrorCode::TIMED_OUT);
    }

    #[test]
    fn to_status_maps_zero_to_ok() {
        assert_eq!(to_status(0, "generic", "Success"), Ok(()));

        let error = to_status(110, "system", "Connection timed out").expect_err("non-zero code");
        assert_eq!(error.code(), ErrorCode::new(110));
        assert_eq!(error.domain(), "system");
        assert_eq!(error.reason(), "Connection timed out");
    }

    #[test]
    fn not_supported_is_canonical() {
        let result: Result<i32> = not_supported().into_result();
        let error = result.expect_err("not supported");
        assert_eq!(error.code(), ErrorCode::NOT_SUPPORTED);
        assert_eq!(error.domain(), "Canonical");
    }
}
