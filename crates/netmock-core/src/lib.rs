//! Connection abstraction for byte-stream endpoints.
//!
//! The `Conn` trait captures the capability set that protocol code expects
//! from a bidirectional stream: reading, writing, closing, address queries
//! and deadline control. Production code can implement it over real sockets;
//! tests implement it with a fake that never touches the network.
//!
//! # Invariants
//!
//! - Ordering: bytes returned by successive `read` calls arrive in the order
//!   the peer produced them
//! - No partial failure: a `write` either accepts all of `buf` or returns an
//!   error
//! - Addresses are plain values: `local_addr` and `remote_addr` never fail

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod addr;
pub mod conn;
pub mod error;

pub use addr::Addr;
pub use conn::Conn;
pub use error::ConnError;
