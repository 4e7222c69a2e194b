//! Error types for snmp-mibs.
//!
//! All errors are `#[non_exhaustive]` to allow adding new variants without breaking changes.
//!
//! Errors fall into four groups:
//!
//! - **Decode** errors ([`Error::Syntax`], [`Error::SyntaxIndex`], [`Error::NotInTable`])
//!   raised while interpreting var-binds against the registry.
//! - **Resolution** errors ([`Error::UnknownMib`], [`Error::UnknownObject`], ...)
//!   raised by name lookups against the registry.
//! - **Transport** errors ([`Error::Io`], [`Error::Timeout`], [`Error::Snmp`], ...)
//!   produced by a [`Transport`](crate::transport::Transport) and propagated verbatim.
//! - [`Error::Callback`], used by row callbacks to stop a table walk.
//!
//! None of these are retried by this crate.

use std::time::Duration;

use crate::oid::Oid;
use crate::registry::Id;
use crate::syntax::Syntax;
use crate::varbind::RawValue;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// SNMP error status codes (RFC 3416).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorStatus {
    NoError,
    TooBig,
    NoSuchName,
    BadValue,
    ReadOnly,
    GenErr,
    /// Unknown/future error status code.
    Unknown(i32),
}

impl ErrorStatus {
    /// Create from raw status code.
    pub fn from_i32(value: i32) -> Self {
        match value {
            0 => Self::NoError,
            1 => Self::TooBig,
            2 => Self::NoSuchName,
            3 => Self::BadValue,
            4 => Self::ReadOnly,
            5 => Self::GenErr,
            other => Self::Unknown(other),
        }
    }

    /// Convert to raw status code.
    pub fn as_i32(&self) -> i32 {
        match self {
            Self::NoError => 0,
            Self::TooBig => 1,
            Self::NoSuchName => 2,
            Self::BadValue => 3,
            Self::ReadOnly => 4,
            Self::GenErr => 5,
            Self::Unknown(code) => *code,
        }
    }
}

impl std::fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoError => write!(f, "noError"),
            Self::TooBig => write!(f, "tooBig"),
            Self::NoSuchName => write!(f, "noSuchName"),
            Self::BadValue => write!(f, "badValue"),
            Self::ReadOnly => write!(f, "readOnly"),
            Self::GenErr => write!(f, "genErr"),
            Self::Unknown(code) => write!(f, "unknown({})", code),
        }
    }
}

/// Library error type.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A var-bind's raw value does not match what the syntax expects.
    #[error("invalid {syntax} value: {value}")]
    Syntax { syntax: Syntax, value: RawValue },

    /// An OID index suffix cannot be decoded by the syntax.
    #[error("invalid {syntax} index: {}", format_arcs(index))]
    SyntaxIndex { syntax: Syntax, index: Vec<u32> },

    /// A var-bind OID is not under any entry column of the table.
    #[error("{oid} is not a column of {table}")]
    NotInTable { table: Id, oid: Oid },

    /// No MIB registered under this name.
    #[error("unknown MIB: {name}")]
    UnknownMib { name: String },

    /// No object with this name in the MIB.
    #[error("unknown object {mib}::{name}")]
    UnknownObject { mib: String, name: String },

    /// No table with this name in the MIB.
    #[error("unknown table {mib}::{name}")]
    UnknownTable { mib: String, name: String },

    /// Name is not of the form `MIB::name`.
    #[error("invalid name: {name:?}")]
    InvalidName { name: String },

    /// Invalid OID text.
    #[error("invalid OID: {input:?}")]
    InvalidOid { input: Box<str> },

    /// A MIB, table or registry definition was rejected at build time.
    #[error("invalid definition {id}: {reason}")]
    InvalidDefinition { id: String, reason: String },

    /// I/O error during communication.
    #[error("I/O error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// Request timed out (after retries if the transport performs any).
    #[error("timeout after {elapsed:?} (retries={retries})")]
    Timeout { elapsed: Duration, retries: u32 },

    /// SNMP protocol error returned by agent.
    #[error("SNMP error: {status} at index {index}")]
    Snmp { status: ErrorStatus, index: u32 },

    /// Response carried a different number of var-binds than requested.
    #[error("response has {actual} var-binds, expected {expected}")]
    ResponseLength { expected: usize, actual: usize },

    /// Non-increasing OID detected during walk (agent misbehavior).
    ///
    /// Returned when a walk receives an OID that is not lexicographically
    /// greater than the previous OID for the same column, which would
    /// otherwise loop forever.
    #[error("walk detected non-increasing OID: {previous} >= {current}")]
    NonIncreasingOid { previous: Oid, current: Oid },

    /// A row callback stopped the walk.
    #[error("callback failed: {source}")]
    Callback {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Create a syntax error for a raw value.
    pub fn syntax(syntax: &Syntax, value: &RawValue) -> Self {
        Self::Syntax {
            syntax: syntax.clone(),
            value: value.clone(),
        }
    }

    /// Create a syntax index error for the arcs that failed to decode.
    pub fn syntax_index(syntax: &Syntax, index: &[u32]) -> Self {
        Self::SyntaxIndex {
            syntax: syntax.clone(),
            index: index.to_vec(),
        }
    }

    /// Create an invalid definition error.
    pub fn invalid_definition(id: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            id: id.to_string(),
            reason: reason.into(),
        }
    }

    /// Wrap a caller error returned from a row callback.
    pub fn callback(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Callback {
            source: source.into(),
        }
    }

    /// Whether this error came from the transport rather than from decoding.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Io { .. }
                | Self::Timeout { .. }
                | Self::Snmp { .. }
                | Self::ResponseLength { .. }
                | Self::NonIncreasingOid { .. }
        )
    }
}

fn format_arcs(arcs: &[u32]) -> String {
    let parts: Vec<String> = arcs.iter().map(|arc| arc.to_string()).collect();
    format!("[{}]", parts.join("."))
}
