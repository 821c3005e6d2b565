//! Scriptable fake connection.
//!
//! `MockConn` implements [`Conn`] with behavior fixed entirely by its fields:
//!
//! - Reads drain `read_buffer`, then return `read_error`
//! - Writes append to `write_buffer` unless `write_error` is set
//! - Close, address and deadline calls return their configured values
//!
//! Every call is recorded first, so a test can assert afterwards which calls
//! happened and with which arguments. Nothing blocks and no deadline is ever
//! enforced.
//!
//! # Invariants
//!
//! - `read_buffer` and `write_buffer` are independent; writing never makes
//!   data readable
//! - A failed write leaves `write_buffer` untouched
//! - Configured values are returned unchanged on every call

use std::time::Instant;

use bytes::{Buf, BytesMut};
use netmock_core::{Addr, Conn, ConnError};

use crate::{
    error::VerifyError,
    expectation::Expectation,
    recorder::{Arg, CallRecorder, Method},
};

/// Fake byte-stream endpoint for tests.
///
/// All fields default to empty buffers, no errors and empty addresses.
///
/// ```
/// use netmock_core::{Conn, ConnError};
/// use netmock_harness::MockConn;
///
/// let mut conn = MockConn::new().with_read_data([1u8, 2, 3]).with_read_error(ConnError::Eof);
///
/// let mut buf = [0u8; 2];
/// assert_eq!(conn.read(&mut buf), Ok(2));
/// assert_eq!(conn.read(&mut buf), Ok(1));
/// assert_eq!(conn.read(&mut buf), Err(ConnError::Eof));
/// ```
#[derive(Debug, Default)]
pub struct MockConn {
    /// Bytes handed out by `read`, front first.
    pub read_buffer: BytesMut,

    /// Returned by `read` once `read_buffer` is empty.
    pub read_error: Option<ConnError>,

    /// Bytes accepted by successful `write` calls.
    pub write_buffer: BytesMut,

    /// When set, `write` fails with it and accepts nothing.
    pub write_error: Option<ConnError>,

    /// Returned by `close`.
    pub close_error: Option<ConnError>,

    /// Returned by `local_addr`.
    pub local: Addr,

    /// Returned by `remote_addr`.
    pub remote: Addr,

    /// Returned by `set_deadline`.
    pub deadline_error: Option<ConnError>,

    /// Returned by `set_read_deadline`.
    pub read_deadline_error: Option<ConnError>,

    /// Returned by `set_write_deadline`.
    pub write_deadline_error: Option<ConnError>,

    recorder: CallRecorder,
}

impl MockConn {
    /// Create an unconfigured fake.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes for `read`.
    #[must_use]
    pub fn with_read_data(mut self, data: impl AsRef<[u8]>) -> Self {
        self.read_buffer.extend_from_slice(data.as_ref());
        self
    }

    /// Error returned by `read` once the queued data is gone.
    #[must_use]
    pub fn with_read_error(mut self, err: ConnError) -> Self {
        self.read_error = Some(err);
        self
    }

    /// Make every `write` fail.
    #[must_use]
    pub fn with_write_error(mut self, err: ConnError) -> Self {
        self.write_error = Some(err);
        self
    }

    /// Error returned by `close`.
    #[must_use]
    pub fn with_close_error(mut self, err: ConnError) -> Self {
        self.close_error = Some(err);
        self
    }

    /// Address returned by `local_addr`.
    #[must_use]
    pub fn with_local_addr(mut self, addr: impl Into<Addr>) -> Self {
        self.local = addr.into();
        self
    }

    /// Address returned by `remote_addr`.
    #[must_use]
    pub fn with_remote_addr(mut self, addr: impl Into<Addr>) -> Self {
        self.remote = addr.into();
        self
    }

    /// Error returned by `set_deadline`.
    #[must_use]
    pub fn with_deadline_error(mut self, err: ConnError) -> Self {
        self.deadline_error = Some(err);
        self
    }

    /// Error returned by `set_read_deadline`.
    #[must_use]
    pub fn with_read_deadline_error(mut self, err: ConnError) -> Self {
        self.read_deadline_error = Some(err);
        self
    }

    /// Error returned by `set_write_deadline`.
    #[must_use]
    pub fn with_write_deadline_error(mut self, err: ConnError) -> Self {
        self.write_deadline_error = Some(err);
        self
    }

    /// Register an expectation while building.
    #[must_use]
    pub fn expecting(mut self, expectation: Expectation) -> Self {
        self.recorder.expect(expectation);
        self
    }

    /// Register an expectation.
    pub fn expect(&mut self, expectation: Expectation) -> &mut Self {
        self.recorder.expect(expectation);
        self
    }

    /// Check recorded calls against the registered expectations.
    pub fn verify(&self) -> Result<(), VerifyError> {
        self.recorder.verify()
    }

    /// The call ledger.
    pub fn recorder(&self) -> &CallRecorder {
        &self.recorder
    }

    /// Everything written so far.
    pub fn written(&self) -> &[u8] {
        &self.write_buffer
    }

    /// Queued bytes not yet read.
    pub fn unread(&self) -> &[u8] {
        &self.read_buffer
    }
}

/// Hand out a configured error, if any.
fn scripted(method: Method, configured: Option<&ConnError>) -> Result<(), ConnError> {
    match configured {
        Some(err) => {
            tracing::debug!(%method, error = %err, "returning configured error");
            Err(err.clone())
        },
        None => Ok(()),
    }
}

impl Conn for MockConn {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ConnError> {
        self.recorder.record(Method::Read, vec![Arg::Len(buf.len())]);

        if !self.read_buffer.is_empty() {
            let n = buf.len().min(self.read_buffer.len());
            self.read_buffer.copy_to_slice(&mut buf[..n]);
            return Ok(n);
        }

        scripted(Method::Read, self.read_error.as_ref())?;
        Ok(0)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, ConnError> {
        self.recorder.record(Method::Write, vec![Arg::bytes(buf)]);

        scripted(Method::Write, self.write_error.as_ref())?;
        self.write_buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn close(&mut self) -> Result<(), ConnError> {
        self.recorder.record(Method::Close, Vec::new());
        scripted(Method::Close, self.close_error.as_ref())
    }

    fn local_addr(&self) -> Addr {
        self.recorder.record(Method::LocalAddr, Vec::new());
        self.local.clone()
    }

    fn remote_addr(&self) -> Addr {
        self.recorder.record(Method::RemoteAddr, Vec::new());
        self.remote.clone()
    }

    fn set_deadline(&self, deadline: Option<Instant>) -> Result<(), ConnError> {
        self.recorder.record(Method::SetDeadline, vec![Arg::Deadline(deadline)]);
        scripted(Method::SetDeadline, self.deadline_error.as_ref())
    }

    fn set_read_deadline(&self, deadline: Option<Instant>) -> Result<(), ConnError> {
        self.recorder.record(Method::SetReadDeadline, vec![Arg::Deadline(deadline)]);
        scripted(Method::SetReadDeadline, self.read_deadline_error.as_ref())
    }

    fn set_write_deadline(&self, deadline: Option<Instant>) -> Result<(), ConnError> {
        self.recorder.record(Method::SetWriteDeadline, vec![Arg::Deadline(deadline)]);
        scripted(Method::SetWriteDeadline, self.write_deadline_error.as_ref())
    }
}
