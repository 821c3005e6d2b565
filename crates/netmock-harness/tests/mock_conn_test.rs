//! MockConn behavior tests

mod common;

use std::{
    net::SocketAddr,
    time::{Duration, Instant},
};

use netmock_core::{Addr, Conn, ConnError};
use netmock_harness::{Arg, Call, Method, MockConn};

#[test]
fn read_drains_buffer_then_returns_read_error() {
    common::init_tracing();
    let read_error = ConnError::Eof;
    let mut conn = MockConn::new().with_read_data([1u8, 2, 3]).with_read_error(read_error.clone());

    let mut buf = [0u8; 2];
    assert_eq!(conn.read(&mut buf), Ok(2));
    assert_eq!(buf, [1, 2]);

    let mut buf = [0u8; 2];
    assert_eq!(conn.read(&mut buf), Ok(1));
    assert_eq!(buf[..1], [3]);

    assert_eq!(conn.read(&mut buf), Err(read_error));
}

#[test]
fn empty_read_buffer_returns_configured_error_every_time() {
    let mut conn = MockConn::new().with_read_error(ConnError::Timeout);
    let mut buf = [0u8; 16];

    for _ in 0..3 {
        assert_eq!(conn.read(&mut buf), Err(ConnError::Timeout));
    }
    assert_eq!(buf, [0u8; 16]);
}

#[test]
fn read_buffer_can_be_refilled_between_reads() {
    let mut conn = MockConn::new().with_read_error(ConnError::Eof);
    let mut buf = [0u8; 4];

    assert_eq!(conn.read(&mut buf), Err(ConnError::Eof));

    conn.read_buffer.extend_from_slice(b"late");
    assert_eq!(conn.read(&mut buf), Ok(4));
    assert_eq!(&buf, b"late");
}

#[test]
fn writes_concatenate_in_call_order() {
    common::init_tracing();
    let mut conn = MockConn::new();

    assert_eq!(conn.write(&[10, 20]), Ok(2));
    assert_eq!(conn.write(&[30]), Ok(1));

    assert_eq!(conn.written(), &[10, 20, 30]);
}

#[test]
fn write_error_leaves_buffer_unchanged() {
    let mut conn = MockConn::new();
    conn.write(b"kept").unwrap();

    conn.write_error = Some(ConnError::BrokenPipe);
    assert_eq!(conn.write(b"dropped"), Err(ConnError::BrokenPipe));
    assert_eq!(conn.write(b"dropped again"), Err(ConnError::BrokenPipe));

    assert_eq!(conn.written(), b"kept");
}

#[test]
fn writes_never_feed_reads() {
    let mut conn = MockConn::new();
    conn.write(b"echo?").unwrap();

    let mut buf = [0u8; 8];
    assert_eq!(conn.read(&mut buf), Ok(0));
    assert!(conn.unread().is_empty());
}

#[test]
fn close_twice_returns_same_error_and_records_both() {
    let close_error = ConnError::io(std::io::ErrorKind::Other, "scripted close failure");
    let mut conn = MockConn::new().with_close_error(close_error.clone());

    assert_eq!(conn.close(), Err(close_error.clone()));
    assert_eq!(conn.close(), Err(close_error));
    assert_eq!(conn.recorder().call_count(Method::Close), 2);
}

#[test]
fn close_without_error_succeeds() {
    let mut conn = MockConn::new();
    assert_eq!(conn.close(), Ok(()));
    assert_eq!(conn.close(), Ok(()));
}

#[test]
fn addresses_are_returned_verbatim() {
    let local: SocketAddr = "127.0.0.1:50000".parse().unwrap();
    let remote = Addr::new("tcp", "example.test:443");
    let mut conn =
        MockConn::new().with_local_addr(local).with_remote_addr(remote.clone()).with_read_data(b"x");

    assert_eq!(conn.local_addr(), Addr::tcp(local));
    assert_eq!(conn.remote_addr(), remote);

    let mut buf = [0u8; 1];
    conn.read(&mut buf).unwrap();
    conn.write(b"y").unwrap();

    for _ in 0..3 {
        assert_eq!(conn.local_addr(), Addr::tcp(local));
        assert_eq!(conn.remote_addr(), remote);
    }
}

#[test]
fn unconfigured_addresses_are_empty() {
    let conn = MockConn::new();
    assert!(conn.local_addr().is_empty());
    assert!(conn.remote_addr().is_empty());
}

#[test]
fn deadlines_are_recorded_and_not_enforced() {
    let mut conn = MockConn::new().with_read_data(b"data").with_deadline_error(ConnError::Closed);
    let past = Instant::now().checked_sub(Duration::from_secs(1)).unwrap_or_else(Instant::now);

    assert_eq!(conn.set_deadline(Some(past)), Err(ConnError::Closed));
    assert_eq!(conn.set_read_deadline(Some(past)), Ok(()));
    assert_eq!(conn.set_write_deadline(None), Ok(()));

    // An expired deadline has no effect on I/O.
    let mut buf = [0u8; 4];
    assert_eq!(conn.read(&mut buf), Ok(4));
    assert_eq!(conn.write(b"out"), Ok(3));

    let recorder = conn.recorder();
    assert!(recorder.was_called_with(Method::SetDeadline, &[Arg::Deadline(Some(past))]));
    assert!(recorder.was_called_with(Method::SetReadDeadline, &[Arg::Deadline(Some(past))]));
    assert!(recorder.was_called_with(Method::SetWriteDeadline, &[Arg::Deadline(None)]));
}

#[test]
fn write_deadline_error_is_returned() {
    let conn = MockConn::new().with_write_deadline_error(ConnError::Timeout);
    assert_eq!(conn.set_write_deadline(None), Err(ConnError::Timeout));
}

#[test]
fn every_operation_is_recorded_in_order() {
    let mut conn = MockConn::new().with_read_data(b"ab");
    let mut buf = [0u8; 8];

    conn.read(&mut buf).unwrap();
    conn.write(b"cd").unwrap();
    let _ = conn.local_addr();
    let _ = conn.remote_addr();
    conn.set_deadline(None).unwrap();
    conn.close().unwrap();

    let methods: Vec<Method> = conn.recorder().calls().iter().map(|c| c.method).collect();
    assert_eq!(
        methods,
        vec![
            Method::Read,
            Method::Write,
            Method::LocalAddr,
            Method::RemoteAddr,
            Method::SetDeadline,
            Method::Close,
        ]
    );
    assert_eq!(
        conn.recorder().calls()[1],
        Call { method: Method::Write, args: vec![Arg::bytes(b"cd")] }
    );
}

#[test]
fn usable_through_trait_object() {
    fn greet(conn: &mut dyn Conn) -> Result<usize, ConnError> {
        conn.set_write_deadline(None)?;
        conn.write(b"HELLO\n")
    }

    let mut conn = MockConn::new();
    assert_eq!(greet(&mut conn), Ok(6));
    assert_eq!(conn.written(), b"HELLO\n");

    let mut failing = MockConn::new().with_write_deadline_error(ConnError::Closed);
    assert_eq!(greet(&mut failing), Err(ConnError::Closed));
    assert!(failing.written().is_empty());
}
