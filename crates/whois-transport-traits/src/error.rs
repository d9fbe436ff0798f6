//! Query error types.

use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ExchangeState;

/// A specialized `Result` type for query operations.
pub type QueryResult<T> = std::result::Result<T, QueryError>;

/// The transport failure categories a handler normalizes into a [`ConnectionError`].
///
/// Anything that does not map onto one of these is not a transport failure and
/// is handed back untouched as [`QueryError::Unexpected`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ErrorCategory {
    /// The host name could not be resolved to any socket address.
    AddressResolution,
    /// The remote side actively refused the connection.
    ConnectionRefused,
    /// The connection was reset by the remote side.
    ConnectionReset,
    /// The connection was aborted locally.
    ConnectionAborted,
    /// The socket is not connected.
    NotConnected,
    /// The requested local address is already in use.
    AddrInUse,
    /// The requested local address is not available on this host.
    AddrNotAvailable,
    /// The remote side stopped reading while we were writing.
    BrokenPipe,
    /// The operating system gave up waiting.
    TimedOut,
    /// A read or write hit the socket timeout.
    WouldBlock,
    /// The blocking call was interrupted by a signal.
    Interrupted,
    /// The stream ended in the middle of an operation.
    UnexpectedEof,
    /// No route to the remote host.
    HostUnreachable,
    /// The remote network cannot be reached.
    NetworkUnreachable,
    /// The local network is down.
    NetworkDown,
    /// Any other socket failure reported by the operating system.
    Os,
}

impl ErrorCategory {
    /// Classifies a platform I/O failure.
    ///
    /// Returns `None` for failures that are not transport failures, i.e. errors
    /// whose kind is not listed above and which carry no OS error code.
    #[must_use]
    pub fn classify(err: &io::Error) -> Option<Self> {
        let category = match err.kind() {
            io::ErrorKind::ConnectionRefused => Self::ConnectionRefused,
            io::ErrorKind::ConnectionReset => Self::ConnectionReset,
            io::ErrorKind::ConnectionAborted => Self::ConnectionAborted,
            io::ErrorKind::NotConnected => Self::NotConnected,
            io::ErrorKind::AddrInUse => Self::AddrInUse,
            io::ErrorKind::AddrNotAvailable => Self::AddrNotAvailable,
            io::ErrorKind::BrokenPipe => Self::BrokenPipe,
            io::ErrorKind::TimedOut => Self::TimedOut,
            io::ErrorKind::WouldBlock => Self::WouldBlock,
            io::ErrorKind::Interrupted => Self::Interrupted,
            io::ErrorKind::UnexpectedEof => Self::UnexpectedEof,
            io::ErrorKind::HostUnreachable => Self::HostUnreachable,
            io::ErrorKind::NetworkUnreachable => Self::NetworkUnreachable,
            io::ErrorKind::NetworkDown => Self::NetworkDown,
            _ if err.raw_os_error().is_some() => Self::Os,
            _ => return None,
        };
        Some(category)
    }

    /// The category name as it appears in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AddressResolution => "AddressResolution",
            Self::ConnectionRefused => "ConnectionRefused",
            Self::ConnectionReset => "ConnectionReset",
            Self::ConnectionAborted => "ConnectionAborted",
            Self::NotConnected => "NotConnected",
            Self::AddrInUse => "AddrInUse",
            Self::AddrNotAvailable => "AddrNotAvailable",
            Self::BrokenPipe => "BrokenPipe",
            Self::TimedOut => "TimedOut",
            Self::WouldBlock => "WouldBlock",
            Self::Interrupted => "Interrupted",
            Self::UnexpectedEof => "UnexpectedEof",
            Self::HostUnreachable => "HostUnreachable",
            Self::NetworkUnreachable => "NetworkUnreachable",
            Self::NetworkDown => "NetworkDown",
            Self::Os => "Os",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single normalized transport failure.
///
/// The rendered message is always `"<category>: <original message>"`, so the
/// cause survives even though the original error type does not.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{category}: {message}")]
pub struct ConnectionError {
    category: ErrorCategory,
    message: String,
    state: ExchangeState,
}

impl ConnectionError {
    /// Create a connection error from its parts.
    #[must_use]
    pub fn new(category: ErrorCategory, message: impl Into<String>, state: ExchangeState) -> Self {
        Self {
            category,
            message: message.into(),
            state,
        }
    }

    /// Normalizes a platform failure, or returns `None` if it is not a transport failure.
    #[must_use]
    pub fn from_io(err: &io::Error, state: ExchangeState) -> Option<Self> {
        ErrorCategory::classify(err).map(|category| Self::new(category, err.to_string(), state))
    }

    /// The category of the original failure.
    pub const fn category(&self) -> ErrorCategory {
        self.category
    }

    /// The original failure's message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The exchange stage in which the failure happened.
    pub const fn state(&self) -> ExchangeState {
        self.state
    }
}

/// Errors returned by [`QueryHandler::execute`](crate::QueryHandler::execute).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum QueryError {
    /// A recognized transport failure.
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// A failure outside the recognized transport categories, returned unmodified.
    #[error(transparent)]
    Unexpected(io::Error),
}

impl QueryError {
    /// Routes a platform failure through [`ErrorCategory::classify`].
    #[must_use]
    pub fn from_io(err: io::Error, state: ExchangeState) -> Self {
        match ConnectionError::from_io(&err, state) {
            Some(conn) => Self::Connection(conn),
            None => Self::Unexpected(err),
        }
    }

    /// Returns the normalized connection error, if this is one.
    pub const fn as_connection(&self) -> Option<&ConnectionError> {
        match self {
            Self::Connection(err) => Some(err),
            Self::Unexpected(_) => None,
        }
    }
}
