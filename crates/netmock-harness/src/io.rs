//! Standard and async I/O adapters for [`MockConn`].
//!
//! Code under test that speaks `std::io` or `tokio::io` can be handed a
//! `MockConn` directly. Reads and writes go through the `Conn` methods, so
//! they are recorded and scripted exactly like direct calls. A scripted
//! [`ConnError::Eof`] reads as `Ok(0)`, the end-of-stream signal std and tokio
//! readers stop on. Flushing is a no-op and is not recorded. Async polls
//! always complete immediately.

use std::{
    io,
    pin::Pin,
    task::{Context, Poll},
};

use netmock_core::{Conn, ConnError};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

use crate::mock_conn::MockConn;

/// Read through `Conn`, with `Eof` turned into a zero-length read.
fn read_to_stream_end(conn: &mut MockConn, buf: &mut [u8]) -> io::Result<usize> {
    match Conn::read(conn, buf) {
        Ok(n) => Ok(n),
        Err(ConnError::Eof) => Ok(0),
        Err(err) => Err(err.into()),
    }
}

impl io::Read for MockConn {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        read_to_stream_end(self, buf)
    }
}

impl io::Write for MockConn {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(Conn::write(self, buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl AsyncRead for MockConn {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let n = match read_to_stream_end(this, buf.initialize_unfilled()) {
            Ok(n) => n,
            Err(err) => return Poll::Ready(Err(err)),
        };
        buf.advance(n);
        Poll::Ready(Ok(()))
    }
}

impl AsyncWrite for MockConn {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(Conn::write(self.get_mut(), buf).map_err(io::Error::from))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Conn::close(self.get_mut()).map_err(io::Error::from))
    }
}
