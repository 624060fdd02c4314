use crate::boundary::guard;
use crate::codes::ErrorCode;
use crate::error::Error;
use crate::origin::SourceOrigin;
use crate::throw::throw_error;
use crate::{Result, Status, rt};

const DEFAULT_EXPECT_MESSAGE: &str = "Unexpected error";

/// Combinators and accessors for [`Result`].
///
/// Each mapper shape has its own method, so the callable's signature alone decides
/// what happens:
///
/// | method          | callable                    | on `Ok(v)`          | on `Err(e)`         |
/// |-----------------|-----------------------------|---------------------|---------------------|
/// | `map_value`     | `T -> U`                    | `Ok(f(v))`          | `Err(e)`            |
/// | `map_faulty`    | `T -> Result<U>`            | `f(v)`              | `Err(e)`            |
/// | `map_result`    | `Result<T> -> Result<U>`    | `f(Ok(v))`          | `f(Err(e))`         |
/// | `map_resilient` | `Result<T> -> U`            | `Ok(f(Ok(v)))`      | `Ok(f(Err(e)))`     |
/// | `eat_value`     | `T -> ()`                   | `f(v); Ok(())`      | `Err(e)`            |
/// | `eat_result`    | `Result<T> -> ()`           | `f(Ok(v)); Ok(())`  | `f(Err(e)); Ok(())` |
/// | `recover`       | `Error -> Result<T>`        | `Ok(v)`             | `f(e)`              |
/// | `forward`       | `() -> ()`                  | `hook(); Ok(v)`     | `hook(); Err(e)`    |
///
/// Callables run inside an unwind boundary: a panic becomes an `UNKNOWN` error in
/// the `"library-internal"` domain, except for [`Passthrough`](crate::Passthrough)
/// payloads, which keep unwinding.
///
/// ```
/// use fallible::{ResultExt, Result};
///
/// let result: Result<i32> = Ok(42);
/// let result = result.map_value(|v| v + 1).map_result(|r| r.map(|v| v + 1));
/// assert_eq!(result, Ok(44));
/// ```
pub trait ResultExt<T>: Sized {
    fn failed(&self) -> bool;

    /// `false` on success.
    fn match_error_code(&self, code: impl Into<ErrorCode>) -> bool;

    fn error_code(&self) -> Option<ErrorCode>;

    /// Takes the value without checking.
    ///
    /// # Safety
    ///
    /// The result must be `Ok`; calling this on a failure is undefined behavior.
    unsafe fn value_unsafe(self) -> T;

    /// Unwinds with a [`Thrown`](crate::Thrown) payload holding the error.
    fn throw_if_error(&self);

    /// The value, or unwinds with a [`Thrown`](crate::Thrown) payload.
    fn value_or_throw(self) -> T;

    /// Sends the failure to the process panic sink.
    fn expect_ok(self);

    fn expect_ok_or(self, message: &str);

    fn expect_value(self) -> T;

    fn expect_value_or(self, message: &str) -> T;

    /// Explicitly discards the result. Does nothing; `excuse` documents why.
    fn ignore(self, excuse: &str);

    fn map_value<U, F>(self, mapper: F) -> Result<U>
    where
        F: FnOnce(T) -> U;

    fn map_faulty<U, F>(self, mapper: F) -> Result<U>
    where
        F: FnOnce(T) -> Result<U>;

    fn map_result<U, F>(self, mapper: F) -> Result<U>
    where
        F: FnOnce(Result<T>) -> Result<U>;

    fn map_resilient<U, F>(self, mapper: F) -> Result<U>
    where
        F: FnOnce(Result<T>) -> U;

    fn eat_value<F>(self, eater: F) -> Status
    where
        F: FnOnce(T);

    fn eat_result<F>(self, eater: F) -> Status
    where
        F: FnOnce(Result<T>);

    fn recover<H>(self, handler: H) -> Result<T>
    where
        H: FnOnce(Error) -> Result<T>;

    fn forward<F>(self, hook: F) -> Result<T>
    where
        F: FnOnce();

    fn just_status(self) -> Status;

    fn to_optional(self) -> Option<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn failed(&self) -> bool {
        self.is_err()
    }

    fn match_error_code(&self, code: impl Into<ErrorCode>) -> bool {
        self.error_code() == Some(code.into())
    }

    fn error_code(&self) -> Option<ErrorCode> {
        self.as_ref().err().map(Error::code)
    }

    unsafe fn value_unsafe(self) -> T {
        // SAFETY: the caller guarantees `self` is `Ok`.
        unsafe { self.unwrap_unchecked() }
    }

    fn throw_if_error(&self) {
        if let Err(error) = self {
            throw_error(error.clone());
        }
    }

    fn value_or_throw(self) -> T {
        match self {
            Ok(value) => value,
            Err(error) => throw_error(error),
        }
    }

    #[track_caller]
    fn expect_ok(self) {
        expect_impl(self, DEFAULT_EXPECT_MESSAGE);
    }

    #[track_caller]
    fn expect_ok_or(self, message: &str) {
        expect_impl(self, message);
    }

    #[track_caller]
    fn expect_value(self) -> T {
        expect_impl(self, DEFAULT_EXPECT_MESSAGE)
    }

    #[track_caller]
    fn expect_value_or(self, message: &str) -> T {
        expect_impl(self, message)
    }

    fn ignore(self, _excuse: &str) {}

    #[track_caller]
    fn map_value<U, F>(self, mapper: F) -> Result<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Ok(value) => guard(move || Ok(mapper(value))),
            Err(error) => Err(error),
        }
    }

    #[track_caller]
    fn map_faulty<U, F>(self, mapper: F) -> Result<U>
    where
        F: FnOnce(T) -> Result<U>,
    {
        match self {
            Ok(value) => guard(move || mapper(value)),
            Err(error) => Err(error),
        }
    }

    #[track_caller]
    fn map_result<U, F>(self, mapper: F) -> Result<U>
    where
        F: FnOnce(Result<T>) -> Result<U>,
    {
        guard(move || mapper(self))
    }

    #[track_caller]
    fn map_resilient<U, F>(self, mapper: F) -> Result<U>
    where
        F: FnOnce(Result<T>) -> U,
    {
        guard(move || Ok(mapper(self)))
    }

    #[track_caller]
    fn eat_value<F>(self, eater: F) -> Status
    where
        F: FnOnce(T),
    {
        match self {
            Ok(value) => guard(move || {
                eater(value);
                Ok(())
            }),
            Err(error) => Err(error),
        }
    }

    #[track_caller]
    fn eat_result<F>(self, eater: F) -> Status
    where
        F: FnOnce(Result<T>),
    {
        guard(move || {
            eater(self);
            Ok(())
        })
    }

    #[track_caller]
    fn recover<H>(self, handler: H) -> Result<T>
    where
        H: FnOnce(Error) -> Result<T>,
    {
        match self {
            Ok(value) => Ok(value),
            Err(error) => guard(move || handler(error)),
        }
    }

    #[track_caller]
    fn forward<F>(self, hook: F) -> Result<T>
    where
        F: FnOnce(),
    {
        guard(move || {
            hook();
            self
        })
    }

    fn just_status(self) -> Status {
        self.map(|_| ())
    }

    fn to_optional(self) -> Option<T> {
        self.ok()
    }
}

#[track_caller]
fn expect_impl<T>(result: Result<T>, message: &str) -> T {
    match result {
        Ok(value) => value,
        Err(error) => rt::panic(
            &SourceOrigin::current(),
            &format!("Result::expect_ok failed: {message} ({})", error.describe()),
        ),
    }
}

/// Zero-argument mappers, available when the payload is `()`.
pub trait StatusExt: Sized {
    /// `() -> U`: runs `mapper` on success.
    fn map_unit<U, F>(self, mapper: F) -> Result<U>
    where
        F: FnOnce() -> U;

    /// `() -> ()`: runs `worker` on success.
    fn run_unit<F>(self, worker: F) -> Status
    where
        F: FnOnce();
}

impl StatusExt for Status {
    #[track_caller]
    fn map_unit<U, F>(self, mapper: F) -> Result<U>
    where
        F: FnOnce() -> U,
    {
        self.map_value(|()| mapper())
    }

    #[track_caller]
    fn run_unit<F>(self, worker: F) -> Status
    where
        F: FnOnce(),
    {
        self.eat_value(|()| worker())
    }
}

/// Folding a sequence of [`Result`]s.
///
/// `collect_ok` gathers values until the first failure and returns that error.
/// `first_error` returns the first failure and drops the values.
///
/// ```
/// use fallible::{ErrorCode, IterResultExt, Result, err};
///
/// let items: Vec<Result<u32>> = vec![Ok(1), Ok(2), Err(err(ErrorCode::UNAVAILABLE).done())];
/// assert!(items.clone().first_error().is_some());
/// assert!(items.collect_ok().is_err());
/// ```
pub trait IterResultExt<T>: Sized {
    fn collect_ok(self) -> Result<Vec<T>>;
    fn first_error(self) -> Option<Error>;
}

impl<I, T> IterResultExt<T> for I
where
    I: IntoIterator<Item = Result<T>>,
{
    fn collect_ok(self) -> Result<Vec<T>> {
        self.into_iter().collect()
    }

    fn first_error(self) -> Option<Error> {
        self.into_iter().find_map(Result::err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::err;
    use std::cell::Cell;

    fn timed_out() -> Error {
        err(ErrorCode::TIMED_OUT)
            .domain("Canonical")
            .reason("Operation timed out")
            .done()
    }

    fn failed<T>() -> Result<T> {
        Err(timed_out())
    }

    #[test]
    fn state_tests_are_exclusive() {
        let ok: Result<i32> = Ok(1);
        let fail: Result<i32> = failed();
        assert!(ok.is_ok() && !ok.failed());
        assert!(!fail.is_ok() && fail.failed());
        assert!(fail.match_error_code(ErrorCode::TIMED_OUT));
        assert!(!ok.match_error_code(ErrorCode::TIMED_OUT));
        assert_eq!(ok.error_code(), None);
    }

    #[test]
    fn unchecked_value_after_check() {
        let result: Result<String> = Ok("Hello".to_string());
        assert!(result.is_ok());
        // SAFETY: checked above.
        let value = unsafe { result.value_unsafe() };
        assert_eq!(value, "Hello");
    }

    #[test]
    fn map_value_short_circuits() {
        let called = Cell::new(false);
        let result = failed::<i32>().map_value(|v| {
            called.set(true);
            v + 1
        });

        assert!(!called.get());
        let error = result.expect_err("failure propagates");
        assert_eq!(error.code(), ErrorCode::TIMED_OUT);
        assert_eq!(error.reason(), "Operation timed out");
    }

    #[test]
    fn map_value_changes_type() {
        let result: Result<i32> = Ok(7);
        assert_eq!(result.map_value(|v| v.to_string()), Ok("7".to_string()));
    }

    #[test]
    fn faulty_mapper_flattens() {
        let result: Result<i32> = Ok(7);
        let mapped: Result<i32> = result.map_faulty(|_| failed());
        assert!(mapped.failed());
        assert_eq!(mapped.error_code(), Some(ErrorCode::TIMED_OUT));
    }

    #[test]
    fn result_mapper_sees_both_states() {
        let on_ok = Ok::<i32, Error>(1).map_result(|r| r.map(|v| v * 10));
        assert_eq!(on_ok, Ok(10));

        let on_err = failed::<i32>().map_result(|r| match r {
            Ok(_) => Ok("value".to_string()),
            Err(e) => Ok(e.domain().to_string()),
        });
        assert_eq!(on_err, Ok("Canonical".to_string()));
    }

    #[test]
    fn resilient_mapper_always_succeeds() {
        let describe = |r: Result<i32>| match r {
            Ok(v) => format!("ok {v}"),
            Err(e) => format!("err {}", e.code().get()),
        };
        assert_eq!(Ok::<i32, Error>(3).map_resilient(describe), Ok("ok 3".to_string()));
        assert_eq!(failed::<i32>().map_resilient(describe), Ok("err 6".to_string()));
    }

    #[test]
    fn value_eater_skips_failures() {
        let seen = Cell::new(0);
        let status = Ok::<i32, Error>(5).eat_value(|v| seen.set(v));
        assert_eq!(status, Ok(()));
        assert_eq!(seen.get(), 5);

        let status = failed::<i32>().eat_value(|v| seen.set(v + 100));
        assert!(status.failed());
        assert_eq!(seen.get(), 5);
    }

    #[test]
    fn result_eater_sees_failures() {
        let seen = Cell::new(None);
        let status = failed::<i32>().eat_result(|r| seen.set(r.error_code()));
        assert_eq!(status, Ok(()));
        assert_eq!(seen.get(), Some(ErrorCode::TIMED_OUT));
    }

    #[test]
    fn recover_replaces_failures_only() {
        let recovered = failed::<String>()
            .map_value(|_: String| -> String { panic!("must be skipped") })
            .recover(|_| Ok("Hello".to_string()));
        assert_eq!(recovered, Ok("Hello".to_string()));

        let untouched = Ok::<i32, Error>(1).recover(|_| Ok(2));
        assert_eq!(untouched, Ok(1));
    }

    #[test]
    fn forward_runs_hook_and_passes_through() {
        let hits = Cell::new(0);
        assert_eq!(Ok::<i32, Error>(1).forward(|| hits.set(hits.get() + 1)), Ok(1));
        assert!(failed::<i32>().forward(|| hits.set(hits.get() + 1)).failed());
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn panicking_mapper_stops_the_chain() {
        let later = Cell::new(false);
        let result = Ok::<i32, Error>(42)
            .map_value(|_| -> i32 { panic!("Failed") })
            .map_value(|v| {
                later.set(true);
                v + 1
            });

        assert!(!later.get());
        let error = result.expect_err("panic converted");
        assert_eq!(error.code(), ErrorCode::UNKNOWN);
        assert_eq!(error.domain(), "library-internal");
        assert!(error.reason().contains("Failed"));
        assert!(error.origin().file().ends_with("result_ext.rs"));
    }

    #[test]
    fn unit_mappers() {
        let status: Status = Ok(());
        assert_eq!(status.map_unit(|| 5), Ok(5));

        let ran = Cell::new(false);
        assert_eq!(Ok::<(), Error>(()).run_unit(|| ran.set(true)), Ok(()));
        assert!(ran.get());

        let skipped = Cell::new(false);
        let status: Status = failed();
        assert!(status.run_unit(|| skipped.set(true)).failed());
        assert!(!skipped.get());
    }

    #[test]
    fn conversions() {
        assert_eq!(Ok::<i32, Error>(3).to_optional(), Some(3));
        assert_eq!(failed::<i32>().to_optional(), None);
        assert_eq!(Ok::<i32, Error>(3).just_status(), Ok(()));
        assert!(failed::<i32>().just_status().failed());
    }

    #[test]
    fn ignore_is_a_no_op() {
        failed::<Vec<i32>>().ignore("best effort cleanup");
        Ok::<i32, Error>(1).ignore("value not needed");
    }

    #[test]
    fn value_or_throw_returns_values() {
        assert_eq!(Ok::<i32, Error>(42).value_or_throw(), 42);
        Ok::<(), Error>(()).throw_if_error();
    }

    #[test]
    fn collect_ok_and_first_error() {
        let all: Vec<Result<u32>> = vec![Ok(1), Ok(2)];
        assert_eq!(all.collect_ok(), Ok(vec![1, 2]));

        let mixed: Vec<Result<u32>> = vec![Ok(1), failed(), Ok(3)];
        assert_eq!(mixed.clone().first_error().map(|e| e.code()), Some(ErrorCode::TIMED_OUT));
        assert!(mixed.collect_ok().failed());
    }
}
