//! Value-or-error results with structured, composable errors.
//!
//! [`Result<T>`] is either a value or an [`Error`]. An `Error` carries a code, a
//! [`Context`] (domain, reason, origin, attributes) and the sub-errors that caused it.
//! [`ResultExt`] adds combinators whose user callables run behind an unwind boundary,
//! plus `expect_*` accessors that report through the process panic sink in [`rt`].
//!
//! ```
//! use fallible::{ErrorCode, Result, ResultExt, err};
//!
//! fn lookup(key: &str) -> Result<u32> {
//!     match key {
//!         "answer" => Ok(42),
//!         _ => Err(err(ErrorCode::NOT_FOUND)
//!             .domain("Registry")
//!             .reason("no such key")
//!             .attr("key", key)
//!             .done()),
//!     }
//! }
//!
//! let doubled = lookup("answer").map_value(|v| v * 2);
//! assert_eq!(doubled, Ok(84));
//!
//! let missing = lookup("question").recover(|e| {
//!     assert_eq!(e.attributes().get("key"), Some("question"));
//!     Ok(0)
//! });
//! assert_eq!(missing, Ok(0));
//! ```

pub mod boundary;
pub mod builder;
pub mod codes;
pub mod context;
pub mod encoding;
pub mod error;
pub mod make;
pub mod origin;
pub mod pretty;
pub mod result_ext;
pub mod rt;
pub mod throw;

// public exports
pub use boundary::{ContractViolation, Passthrough, unwind_through};
pub use builder::{ErrorBuilder, err, err_at};
pub use codes::ErrorCode;
pub use context::{Attributes, Context, ContextBuilder, ctx};
pub use error::Error;
pub use make::{Failure, fail, just_status, not_supported, ok, propagate_error, to_status};
pub use origin::SourceOrigin;
pub use result_ext::{IterResultExt, ResultExt, StatusExt};
pub use throw::{Thrown, catch_thrown, throw_error};

#[cfg(feature = "serde")]
pub use encoding::{DecodeError, EncodedError};
#[cfg(feature = "serde")]
pub use pretty::PrettyDebug;

/// Either a value of type `T` or an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// A [`Result`] that carries no value.
pub type Status = Result<()>;
