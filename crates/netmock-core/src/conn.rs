//! The connection capability set.

use std::time::Instant;

use crate::{addr::Addr, error::ConnError};

/// Bidirectional byte-stream endpoint with address and deadline controls.
///
/// Protocol code written against `Conn` runs unchanged over a real socket or
/// over a test double. The trait is object safe so callers can accept
/// `&mut dyn Conn`.
///
/// Deadlines are absolute instants. `None` clears a deadline.
pub trait Conn {
    /// Reads up to `buf.len()` bytes into `buf`.
    ///
    /// Returns the number of bytes read, which may be fewer than requested.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ConnError>;

    /// Writes all of `buf`, returning `buf.len()` on success.
    fn write(&mut self, buf: &[u8]) -> Result<usize, ConnError>;

    /// Closes the connection.
    fn close(&mut self) -> Result<(), ConnError>;

    /// Address of the local endpoint.
    fn local_addr(&self) -> Addr;

    /// Address of the remote endpoint.
    fn remote_addr(&self) -> Addr;

    /// Sets both the read and write deadlines.
    fn set_deadline(&self, deadline: Option<Instant>) -> Result<(), ConnError>;

    /// Sets the deadline for future `read` calls.
    fn set_read_deadline(&self, deadline: Option<Instant>) -> Result<(), ConnError>;

    /// Sets the deadline for future `write` calls.
    fn set_write_deadline(&self, deadline: Option<Instant>) -> Result<(), ConnError>;
}

impl<C: Conn + ?Sized> Conn for &mut C {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ConnError> {
        (**self).read(buf)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, ConnError> {
        (**self).write(buf)
    }

    fn close(&mut self) -> Result<(), ConnError> {
        (**self).close()
    }

    fn local_addr(&self) -> Addr {
        (**self).local_addr()
    }

    fn remote_addr(&self) -> Addr {
        (**self).remote_addr()
    }

    fn set_deadline(&self, deadline: Option<Instant>) -> Result<(), ConnError> {
        (**self).set_deadline(deadline)
    }

    fn set_read_deadline(&self, deadline: Option<Instant>) -> Result<(), ConnError> {
        (**self).set_read_deadline(deadline)
    }

    fn set_write_deadline(&self, deadline: Option<Instant>) -> Result<(), ConnError> {
        (**self).set_write_deadline(deadline)
    }
}

impl<C: Conn + ?Sized> Conn for Box<C> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ConnError> {
        (**self).read(buf)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, ConnError> {
        (**self).write(buf)
    }

    fn close(&mut self) -> Result<(), ConnError> {
        (**self).close()
    }

    fn local_addr(&self) -> Addr {
        (**self).local_addr()
    }

    fn remote_addr(&self) -> Addr {
        (**self).remote_addr()
    }

    fn set_deadline(&self, deadline: Option<Instant>) -> Result<(), ConnError> {
        (**self).set_deadline(deadline)
    }

    fn set_read_deadline(&self, deadline: Option<Instant>) -> Result<(), ConnError> {
        (**self).set_read_deadline(deadline)
    }

    fn set_write_deadline(&self, deadline: Option<Instant>) -> Result<(), ConnError> {
        (**self).set_write_deadline(deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Echo endpoint: everything written becomes readable.
    #[derive(Default)]
    struct Loopback {
        pending: Vec<u8>,
        closed: bool,
    }

    impl Conn for Loopback {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, ConnError> {
            if self.closed {
                return Err(ConnError::Closed);
            }
            let n = buf.len().min(self.pending.len());
            buf[..n].copy_from_slice(&self.pending[..n]);
            self.pending.drain(..n);
            Ok(n)
        }

        fn write(&mut self, buf: &[u8]) -> Result<usize, ConnError> {
            if self.closed {
                return Err(ConnError::Closed);
            }
            self.pending.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn close(&mut self) -> Result<(), ConnError> {
            self.closed = true;
            Ok(())
        }

        fn local_addr(&self) -> Addr {
            Addr::new("loop", "self")
        }

        fn remote_addr(&self) -> Addr {
            Addr::new("loop", "self")
        }

        fn set_deadline(&self, _deadline: Option<Instant>) -> Result<(), ConnError> {
            Ok(())
        }

        fn set_read_deadline(&self, _deadline: Option<Instant>) -> Result<(), ConnError> {
            Ok(())
        }

        fn set_write_deadline(&self, _deadline: Option<Instant>) -> Result<(), ConnError> {
            Ok(())
        }
    }

    fn echo(conn: &mut dyn Conn, msg: &[u8]) -> Result<Vec<u8>, ConnError> {
        conn.write(msg)?;
        let mut buf = vec![0u8; msg.len()];
        let n = conn.read(&mut buf)?;
        buf.truncate(n);
        Ok(buf)
    }

    #[test]
    fn trait_object_dispatch() {
        let mut conn = Loopback::default();
        assert_eq!(echo(&mut conn, b"ping").unwrap(), b"ping");
    }

    #[test]
    fn boxed_conn_forwards() {
        let mut conn: Box<dyn Conn> = Box::new(Loopback::default());
        conn.write(b"abc").unwrap();
        conn.close().unwrap();

        let mut buf = [0u8; 3];
        assert_eq!(conn.read(&mut buf), Err(ConnError::Closed));
        assert_eq!(conn.local_addr(), Addr::new("loop", "self"));
    }

    #[test]
    fn mut_ref_conn_forwards() {
        let mut inner = Loopback::default();
        let mut conn = &mut inner;
        assert!(conn.set_deadline(Some(Instant::now())).is_ok());
        assert_eq!(Conn::write(&mut conn, b"xy").unwrap(), 2);
        assert_eq!(inner.pending, b"xy");
    }
}
