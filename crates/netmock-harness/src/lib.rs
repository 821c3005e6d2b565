//! Test doubles for code that talks over byte-stream connections.
//!
//! [`MockConn`] stands in for a real socket: its reads, writes, close,
//! address and deadline results are scripted by the test, and every call is
//! recorded by a [`CallRecorder`] for later assertions.
//!
//! # Example
//!
//! ```
//! use netmock_core::{Conn, ConnError};
//! use netmock_harness::{ArgMatcher, Expectation, Method, MockConn};
//!
//! let mut conn = MockConn::new()
//!     .with_read_data(b"PING\r\n")
//!     .with_read_error(ConnError::Eof)
//!     .expecting(Expectation::new(Method::Read).at_least(1))
//!     .expecting(Expectation::new(Method::Write).with_args([ArgMatcher::bytes(b"PONG\r\n")]).once())
//!     .expecting(Expectation::new(Method::Close).once());
//!
//! let mut buf = [0u8; 64];
//! let n = conn.read(&mut buf).unwrap();
//! assert_eq!(&buf[..n], b"PING\r\n");
//! conn.write(b"PONG\r\n").unwrap();
//! conn.close().unwrap();
//!
//! assert_eq!(conn.written(), b"PONG\r\n");
//! conn.verify().unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod expectation;
mod io;
pub mod mock_conn;
pub mod recorder;

pub use error::{Mismatch, VerifyError};
pub use expectation::{ArgMatcher, Expectation, Times};
pub use mock_conn::MockConn;
pub use recorder::{Arg, Call, CallRecorder, Method};
