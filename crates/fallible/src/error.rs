use std::fmt::{self, Write as _};

use crate::boundary::contract_violation;
use crate::builder::err_at;
use crate::codes::ErrorCode;
use crate::context::{Attributes, Context};
use crate::origin::SourceOrigin;

/// A structured failure: code, [`Context`] and the lower-level errors that caused it.
///
/// Built with [`err`](crate::err) and [`ErrorBuilder::done`](crate::ErrorBuilder::done).
/// Cloning is cheap: the context is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    context: Context,
    sub_errors: Vec<Error>,
}

impl Error {
    pub(crate) fn from_parts(code: ErrorCode, context: Context, sub_errors: Vec<Error>) -> Self {
        Self {
            code,
            context,
            sub_errors,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn domain(&self) -> &str {
        self.context.domain()
    }

    pub fn reason(&self) -> &str {
        self.context.reason()
    }

    pub fn origin(&self) -> &SourceOrigin {
        self.context.origin()
    }

    pub fn attributes(&self) -> &Attributes {
        self.context.attributes()
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.context.has_attr(key)
    }

    /// Insert-or-assign an attribute after construction.
    pub fn add_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.context.add_attr(key, value);
    }

    pub fn sub_errors(&self) -> &[Error] {
        &self.sub_errors
    }

    /// The single cause of this error.
    ///
    /// # Panics
    ///
    /// Unwinds with a [`ContractViolation`](crate::ContractViolation) unless there is
    /// exactly one sub-error, even inside a mapper. Use [`Error::sub_errors`] to
    /// inspect an arbitrary number of causes.
    #[track_caller]
    pub fn sub_error(&self) -> &Error {
        match self.sub_errors.as_slice() {
            [single] => single,
            other => contract_violation(format!(
                "unexpected number of sub-errors: {}",
                other.len()
            )),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.code == ErrorCode::CANCELLED
    }

    /// One-line summary for logs:
    /// `code = 6 (TimedOut), domain = D, reason = 'r', origin = f:1 (fn), attrs = {k = v}`.
    pub fn describe(&self) -> String {
        let mut out = format!(
            "code = {}, domain = {}, reason = '{}', origin = {}",
            self.code,
            self.domain(),
            self.reason(),
            self.origin()
        );
        let attrs = self.attributes();
        if !attrs.is_empty() {
            // Writing to a String never fails.
            let _ = write!(out, ", attrs = {{{attrs}}}");
        }
        out
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.sub_errors.as_slice() {
            [single] => Some(single),
            _ => None,
        }
    }
}

/// Raw OS errors keep their errno as the code under the `"system"` domain; other I/O
/// errors become `UNKNOWN` under `"io"`.
impl From<std::io::Error> for Error {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        let (code, domain) = match err.raw_os_error() {
            Some(errno) => (ErrorCode::new(errno), "system"),
            None => (ErrorCode::UNKNOWN, "io"),
        };
        err_at(code, SourceOrigin::current())
            .domain(domain)
            .reason(err.to_string())
            .attr("kind", format!("{:?}", err.kind()))
            .done()
    }
}
