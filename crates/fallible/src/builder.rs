use crate::codes::ErrorCode;
use crate::context::{Context, ContextBuilder};
use crate::error::Error;
use crate::origin::SourceOrigin;

/// Single-use accumulator for an [`Error`].
///
/// Every setter consumes and returns the builder; [`ErrorBuilder::done`] consumes it
/// for good, so a builder can be finalized at most once.
#[must_use = "an error builder does nothing until `done` is called"]
#[derive(Debug, Clone)]
pub struct ErrorBuilder {
    code: ErrorCode,
    context: ContextBuilder,
    sub_errors: Vec<Error>,
}

impl ErrorBuilder {
    pub fn new(code: impl Into<ErrorCode>, origin: SourceOrigin) -> Self {
        Self {
            code: code.into(),
            context: ContextBuilder::default().location(origin),
            sub_errors: Vec::new(),
        }
    }

    pub fn domain(mut self, name: impl Into<String>) -> Self {
        self.context = self.context.domain(name);
        self
    }

    pub fn reason(mut self, text: impl Into<String>) -> Self {
        self.context = self.context.reason(text);
        self
    }

    pub fn location(mut self, origin: SourceOrigin) -> Self {
        self.context = self.context.location(origin);
        self
    }

    #[track_caller]
    pub fn here(self) -> Self {
        self.location(SourceOrigin::current())
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context = self.context.attr(key, value);
        self
    }

    pub fn add_sub_error(mut self, error: Error) -> Self {
        self.sub_errors.push(error);
        self
    }

    pub fn done(self) -> Error {
        let context: Context = self.context.done();
        Error::from_parts(self.code, context, self.sub_errors)
    }
}

impl From<ErrorBuilder> for Error {
    fn from(builder: ErrorBuilder) -> Self {
        builder.done()
    }
}

/// Starts an error whose origin is the caller of `err`.
#[track_caller]
pub fn err(code: impl Into<ErrorCode>) -> ErrorBuilder {
    ErrorBuilder::new(code, SourceOrigin::current())
}

pub fn err_at(code: impl Into<ErrorCode>, origin: SourceOrigin) -> ErrorBuilder {
    ErrorBuilder::new(code, origin)
}

/// Like [`err`], but the origin also names the enclosing function.
#[macro_export]
macro_rules! err {
    ($code:expr) => {
        $crate::err_at($code, $crate::origin!())
    };
}
