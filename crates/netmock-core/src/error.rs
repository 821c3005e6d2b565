//! Connection error types.

use std::io;

use thiserror::Error;

/// Errors returned by connection operations.
///
/// Values are cheap to clone and compare so a configured error can be handed
/// out repeatedly and asserted on by value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnError {
    /// Peer finished sending.
    #[error("end of stream")]
    Eof,

    /// Operation on a connection that was already closed.
    #[error("use of closed connection")]
    Closed,

    /// A deadline passed before the operation completed.
    #[error("i/o timeout")]
    Timeout,

    /// Peer reset the connection.
    #[error("connection reset by peer")]
    ConnectionReset,

    /// Write to a connection whose peer has gone away.
    #[error("broken pipe")]
    BrokenPipe,

    /// Any other I/O failure.
    #[error("{kind}: {message}")]
    Io {
        /// Category of the failure.
        kind: io::ErrorKind,
        /// Human readable detail.
        message: String,
    },
}

impl ConnError {
    /// Build a [`ConnError::Io`] from a kind and message.
    pub fn io(kind: io::ErrorKind, message: impl Into<String>) -> Self {
        Self::Io { kind, message: message.into() }
    }

    /// Returns true if the error was caused by a deadline.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout => true,
            Self::Io { kind, .. } => *kind == io::ErrorKind::TimedOut,
            Self::Eof | Self::Closed | Self::ConnectionReset | Self::BrokenPipe => false,
        }
    }

    /// The [`io::ErrorKind`] this error maps to.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Self::Eof => io::ErrorKind::UnexpectedEof,
            Self::Closed => io::ErrorKind::NotConnected,
            Self::Timeout => io::ErrorKind::TimedOut,
            Self::ConnectionReset => io::ErrorKind::ConnectionReset,
            Self::BrokenPipe => io::ErrorKind::BrokenPipe,
            Self::Io { kind, .. } => *kind,
        }
    }
}

impl From<ConnError> for io::Error {
    fn from(err: ConnError) -> Self {
        Self::new(err.kind(), err)
    }
}

impl From<io::Error> for ConnError {
    fn from(err: io::Error) -> Self {
        if let Some(conn_err) = err.get_ref().and_then(|inner| inner.downcast_ref::<Self>()) {
            return conn_err.clone();
        }

        match err.kind() {
            io::ErrorKind::UnexpectedEof => Self::Eof,
            io::ErrorKind::NotConnected => Self::Closed,
            io::ErrorKind::TimedOut => Self::Timeout,
            io::ErrorKind::ConnectionReset => Self::ConnectionReset,
            io::ErrorKind::BrokenPipe => Self::BrokenPipe,
            kind => Self::Io { kind, message: err.to_string() },
        }
    }
}
