//! Source locations recorded into error contexts.

use std::fmt;
use std::panic::Location;

pub(crate) const UNSET: &str = "?";

/// A `(file, function, line)` triple pointing at the code that produced an error.
///
/// Owns its strings: an origin may describe code in another process, so it cannot
/// borrow from `Location<'static>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceOrigin {
    file: String,
    function: String,
    line: u32,
}

impl SourceOrigin {
    pub fn new(file: impl Into<String>, function: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            function: function.into(),
            line,
        }
    }

    /// Captures the caller's file and line.
    ///
    /// `#[track_caller]` propagates through every function that is itself marked, so
    /// `err(code)` and the `expect_*` accessors record the location of *their* caller.
    /// The function name is not available this way and is left as `"?"`; use
    /// [`origin!`](crate::origin) when it matters.
    #[track_caller]
    pub fn current() -> Self {
        Self::from(Location::caller())
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl Default for SourceOrigin {
    fn default() -> Self {
        Self::new(UNSET, UNSET, 0)
    }
}

impl From<&Location<'_>> for SourceOrigin {
    fn from(loc: &Location<'_>) -> Self {
        Self::new(loc.file(), UNSET, loc.line())
    }
}

impl fmt::Display for SourceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} ({})", self.file, self.line, self.function)
    }
}

/// Captures a [`SourceOrigin`] at the expansion site, including the path of the
/// enclosing function.
#[macro_export]
macro_rules! origin {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = __type_name_of(__here);
        $crate::SourceOrigin::new(
            file!(),
            name.strip_suffix("::__here").unwrap_or(name),
            line!(),
        )
    }};
}
