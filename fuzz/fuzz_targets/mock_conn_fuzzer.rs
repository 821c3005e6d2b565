//! Fuzz target for [`MockConn`] buffer and ledger invariants
//!
//! # Strategy
//!
//! - Event sequences: Arbitrary interleavings of reads, writes, refills,
//!   error toggles, closes and deadline calls
//! - Buffer sizes: Zero-length and oversized destination buffers
//!
//! # Invariants
//!
//! - Read bytes are a prefix-preserving drain of everything queued
//! - `write_buffer` equals the concatenation of successful writes
//! - A failed write never changes `write_buffer`
//! - Configured errors come back unchanged
//! - Every operation adds exactly one ledger entry
//! - NEVER panic

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use netmock_core::{Conn, ConnError};
use netmock_harness::MockConn;

#[derive(Debug, Clone, Arbitrary)]
enum ConnEvent {
    Read { len: u8 },
    Write(Vec<u8>),
    Refill(Vec<u8>),
    SetReadError(Option<FuzzedError>),
    SetWriteError(Option<FuzzedError>),
    Close,
    LocalAddr,
    SetDeadline,
}

#[derive(Debug, Clone, Copy, Arbitrary)]
enum FuzzedError {
    Eof,
    Closed,
    Timeout,
    Reset,
}

impl From<FuzzedError> for ConnError {
    fn from(err: FuzzedError) -> Self {
        match err {
            FuzzedError::Eof => Self::Eof,
            FuzzedError::Closed => Self::Closed,
            FuzzedError::Timeout => Self::Timeout,
            FuzzedError::Reset => Self::ConnectionReset,
        }
    }
}

fuzz_target!(|events: Vec<ConnEvent>| {
    let mut conn = MockConn::new();
    let mut queued: Vec<u8> = Vec::new();
    let mut received: Vec<u8> = Vec::new();
    let mut accepted: Vec<u8> = Vec::new();
    let mut recorded = 0usize;

    for event in events {
        match event {
            ConnEvent::Read { len } => {
                let mut buf = vec![0u8; len as usize];
                let pending = queued.len() - received.len();
                match conn.read(&mut buf) {
                    Ok(n) => {
                        assert_eq!(n, buf.len().min(pending));
                        received.extend_from_slice(&buf[..n]);
                    },
                    Err(err) => {
                        assert_eq!(pending, 0, "error surfaced before buffer drained");
                        assert_eq!(Some(err), conn.read_error);
                    },
                }
                recorded += 1;
            },

            ConnEvent::Write(data) => {
                let before = conn.written().to_vec();
                match conn.write(&data) {
                    Ok(n) => {
                        assert_eq!(n, data.len());
                        accepted.extend_from_slice(&data);
                    },
                    Err(err) => {
                        assert_eq!(Some(err), conn.write_error);
                        assert_eq!(conn.written(), before.as_slice());
                    },
                }
                recorded += 1;
            },

            ConnEvent::Refill(data) => {
                conn.read_buffer.extend_from_slice(&data);
                queued.extend_from_slice(&data);
            },

            ConnEvent::SetReadError(err) => conn.read_error = err.map(ConnError::from),

            ConnEvent::SetWriteError(err) => conn.write_error = err.map(ConnError::from),

            ConnEvent::Close => {
                assert_eq!(conn.close(), Ok(()));
                recorded += 1;
            },

            ConnEvent::LocalAddr => {
                assert!(conn.local_addr().is_empty());
                recorded += 1;
            },

            ConnEvent::SetDeadline => {
                assert_eq!(conn.set_deadline(None), Ok(()));
                recorded += 1;
            },
        }

        assert_eq!(conn.written(), accepted.as_slice());
        assert_eq!(conn.unread(), &queued[received.len()..]);
        assert_eq!(conn.recorder().calls().len(), recorded);
    }

    assert_eq!(received.as_slice(), &queued[..received.len()]);
});
