use std::borrow::Cow;
use std::fmt;

/// Numeric error code.
///
/// The associated constants are the canonical codes. Any other value is an
/// application-defined code and is carried through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ErrorCode(i32);

impl ErrorCode {
    pub const OK: ErrorCode = ErrorCode(0);
    pub const UNKNOWN: ErrorCode = ErrorCode(1);
    pub const DISCONNECTED: ErrorCode = ErrorCode(2);
    pub const INVALID: ErrorCode = ErrorCode(3);
    pub const CANCELLED: ErrorCode = ErrorCode(4);
    pub const ABORTED: ErrorCode = ErrorCode(5);
    pub const TIMED_OUT: ErrorCode = ErrorCode(6);
    pub const NOT_FOUND: ErrorCode = ErrorCode(7);
    pub const ALREADY_EXISTS: ErrorCode = ErrorCode(8);
    pub const UNAUTHORIZED: ErrorCode = ErrorCode(9);
    pub const UNAVAILABLE: ErrorCode = ErrorCode(10);
    pub const RESOURCE_EXHAUSTED: ErrorCode = ErrorCode(11);
    pub const INTERNAL: ErrorCode = ErrorCode(12);
    pub const NOT_SUPPORTED: ErrorCode = ErrorCode(13);

    pub const fn new(code: i32) -> Self {
        ErrorCode(code)
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    /// Symbolic name for canonical codes, `None` for application codes.
    pub const fn canonical_name(self) -> Option<&'static str> {
        let name = match self.0 {
            0 => "Ok",
            1 => "Unknown",
            2 => "Disconnected",
            3 => "Invalid",
            4 => "Cancelled",
            5 => "Aborted",
            6 => "TimedOut",
            7 => "NotFound",
            8 => "AlreadyExists",
            9 => "Unauthorized",
            10 => "Unavailable",
            11 => "ResourceExhausted",
            12 => "Internal",
            13 => "NotSupported",
            _ => return None,
        };
        Some(name)
    }

    pub const fn is_canonical(self) -> bool {
        self.canonical_name().is_some()
    }

    /// Symbolic name, falling back to `Unknown(<n>)` for application codes.
    pub fn name(self) -> Cow<'static, str> {
        match self.canonical_name() {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(format!("Unknown({})", self.0)),
        }
    }
}

impl From<i32> for ErrorCode {
    fn from(code: i32) -> Self {
        ErrorCode(code)
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.0
    }
}

impl PartialEq<i32> for ErrorCode {
    fn eq(&self, other: &i32) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.name())
    }
}
