//! Human-readable and log-ready views of an [`Error`] tree, built on its
//! structured encoding. Requires the `serde` feature.

#![cfg(feature = "serde")]

use serde::Serialize;

use crate::encoding::EncodedError;
use crate::error::Error;

/// Renders a value through a serializable field view.
///
/// For [`Error`] the fields are [`EncodedError`], so `to_value` equals
/// [`Error::as_structured_encoding`] and `pretty_json` indents the same tree.
pub trait PrettyDebug {
    type Fields<'a>: Serialize + 'a
    where
        Self: 'a;

    fn fields(&self) -> Option<Self::Fields<'_>>;

    fn to_value(&self) -> Option<serde_json::Value> {
        let fields = self.fields()?;
        serde_json::to_value(&fields).ok()
    }

    /// Indented JSON, one field per line.
    fn pretty_json(&self) -> Option<String> {
        let fields = self.fields()?;
        serde_json::to_string_pretty(&fields).ok()
    }

    /// Logs `message` at `level` with the one-line description and the field view
    /// attached.
    fn emit_tracing(&self, level: tracing::Level, message: &str)
    where
        Self: std::fmt::Display,
        for<'a> Self::Fields<'a>: std::fmt::Debug,
    {
        use tracing::Level;

        let fields = self.fields();
        if level == Level::ERROR {
            tracing::error!(error = %self, fields = ?fields, "{message}");
        } else if level == Level::WARN {
            tracing::warn!(error = %self, fields = ?fields, "{message}");
        } else if level == Level::INFO {
            tracing::info!(error = %self, fields = ?fields, "{message}");
        } else if level == Level::DEBUG {
            tracing::debug!(error = %self, fields = ?fields, "{message}");
        } else {
            tracing::trace!(error = %self, fields = ?fields, "{message}");
        }
    }
}

impl PrettyDebug for Error {
    type Fields<'a> = EncodedError<'a>;

    fn fields(&self) -> Option<Self::Fields<'_>> {
        Some(self.encoded())
    }
}
