//! Structured encoding of [`Error`] trees.
//!
//! ```json
//! {
//!   "code": 6,
//!   "context": {
//!     "domain": "Canonical",
//!     "reason": "Operation timed out",
//!     "source": { "file": "src/net.rs", "function": "net::dial", "line": 42 },
//!     "attrs": { "peer": "10.0.0.1" }
//!   },
//!   "sub_errors": []
//! }
//! ```
//!
//! `attrs` is omitted when empty. On decode, `attrs`, `sub_errors`, `domain`, `reason`
//! and `source` may be absent.

#![cfg(feature = "serde")]

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codes::ErrorCode;
use crate::context::{Attributes, Context, ContextData};
use crate::error::Error;
use crate::origin::{SourceOrigin, UNSET};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed error encoding: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Borrowed, serializable view of an [`Error`].
#[derive(Debug, Serialize)]
pub struct EncodedError<'a> {
    code: i32,
    context: EncodedContext<'a>,
    sub_errors: Vec<EncodedError<'a>>,
}

#[derive(Debug, Serialize)]
struct EncodedContext<'a> {
    domain: &'a str,
    reason: &'a str,
    source: &'a SourceOrigin,
    #[serde(skip_serializing_if = "no_attrs")]
    attrs: &'a Attributes,
}

fn no_attrs(attrs: &&Attributes) -> bool {
    attrs.is_empty()
}

impl<'a> From<&'a Error> for EncodedError<'a> {
    fn from(error: &'a Error) -> Self {
        Self {
            code: error.code().get(),
            context: EncodedContext {
                domain: error.domain(),
                reason: error.reason(),
                source: error.origin(),
                attrs: error.attributes(),
            },
            sub_errors: error.sub_errors().iter().map(EncodedError::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DecodedError {
    code: i32,
    context: DecodedContext,
    #[serde(default)]
    sub_errors: Vec<DecodedError>,
}

#[derive(Debug, Deserialize)]
struct DecodedContext {
    #[serde(default = "unset")]
    domain: String,
    #[serde(default = "unset")]
    reason: String,
    #[serde(default)]
    source: SourceOrigin,
    #[serde(default)]
    attrs: Attributes,
}

fn unset() -> String {
    UNSET.to_string()
}

impl From<DecodedError> for Error {
    fn from(decoded: DecodedError) -> Self {
        let DecodedContext {
            domain,
            reason,
            source,
            attrs,
        } = decoded.context;
        let context = Context::from_data(ContextData {
            domain,
            reason,
            origin: source,
            attrs,
        });
        let sub_errors = decoded.sub_errors.into_iter().map(Error::from).collect();
        Error::from_parts(ErrorCode::new(decoded.code), context, sub_errors)
    }
}

impl Error {
    pub fn encoded(&self) -> EncodedError<'_> {
        EncodedError::from(self)
    }

    pub fn as_structured_encoding(&self) -> serde_json::Value {
        serde_json::to_value(self.encoded())
            .expect("error encoding has only string keys and cannot fail")
    }

    pub fn from_structured_encoding(value: serde_json::Value) -> Result<Error, DecodeError> {
        let decoded: DecodedError = serde_json::from_value(value)?;
        Ok(decoded.into())
    }

    pub fn from_json_str(json: &str) -> Result<Error, DecodeError> {
        let decoded: DecodedError = serde_json::from_str(json)?;
        Ok(decoded.into())
    }
}

impl Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.encoded().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Error {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        DecodedError::deserialize(deserializer).map(Error::from)
    }
}
