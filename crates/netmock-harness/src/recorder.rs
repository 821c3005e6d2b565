//! Call ledger for test doubles.
//!
//! Every operation on a fake records a [`Call`] before producing its scripted
//! result. Tests register [`Expectation`]s up front and call
//! [`CallRecorder::verify`] at the end, or query the ledger directly.

use std::{cell::RefCell, fmt, time::Instant};

use bytes::Bytes;

use crate::{
    error::{Mismatch, VerifyError},
    expectation::Expectation,
};

/// Operations of the connection capability set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `Conn::read`
    Read,
    /// `Conn::write`
    Write,
    /// `Conn::close`
    Close,
    /// `Conn::local_addr`
    LocalAddr,
    /// `Conn::remote_addr`
    RemoteAddr,
    /// `Conn::set_deadline`
    SetDeadline,
    /// `Conn::set_read_deadline`
    SetReadDeadline,
    /// `Conn::set_write_deadline`
    SetWriteDeadline,
}

impl Method {
    /// Method name as it appears in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Close => "close",
            Self::LocalAddr => "local_addr",
            Self::RemoteAddr => "remote_addr",
            Self::SetDeadline => "set_deadline",
            Self::SetReadDeadline => "set_read_deadline",
            Self::SetWriteDeadline => "set_write_deadline",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// Bytes handed to the call (source buffer of `write`).
    Bytes(Bytes),
    /// Capacity of a destination buffer (`read`).
    Len(usize),
    /// Requested deadline; `None` clears it.
    Deadline(Option<Instant>),
}

impl Arg {
    /// Copy `data` into a [`Arg::Bytes`].
    pub fn bytes(data: impl AsRef<[u8]>) -> Self {
        Self::Bytes(Bytes::copy_from_slice(data.as_ref()))
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(data) => write!(f, "{data:?}"),
            Self::Len(len) => write!(f, "len={len}"),
            Self::Deadline(Some(_)) => f.write_str("deadline"),
            Self::Deadline(None) => f.write_str("no deadline"),
        }
    }
}

/// A single recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// Method that was invoked.
    pub method: Method,
    /// Arguments, in parameter order.
    pub args: Vec<Arg>,
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.method)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

/// Records calls and checks them against registered expectations.
///
/// The ledger sits behind a `RefCell` so that `&self` accessors of the fake
/// can record too. This makes the recorder `!Sync`: a fake is driven from one
/// thread only.
#[derive(Debug, Default)]
pub struct CallRecorder {
    calls: RefCell<Vec<Call>>,
    expectations: Vec<Expectation>,
}

impl CallRecorder {
    /// Create an empty recorder with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a call to the ledger.
    pub fn record(&self, method: Method, args: Vec<Arg>) {
        let call = Call { method, args };
        tracing::trace!(%call, "recorded call");
        self.calls.borrow_mut().push(call);
    }

    /// Register an expectation, checked by [`Self::verify`].
    pub fn expect(&mut self, expectation: Expectation) {
        self.expectations.push(expectation);
    }

    /// Registered expectations, in registration order.
    pub fn expectations(&self) -> &[Expectation] {
        &self.expectations
    }

    /// Snapshot of every recorded call, in call order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Number of recorded calls to `method`.
    pub fn call_count(&self, method: Method) -> usize {
        self.calls.borrow().iter().filter(|c| c.method == method).count()
    }

    /// True if `method` was called at least once.
    pub fn was_called(&self, method: Method) -> bool {
        self.calls.borrow().iter().any(|c| c.method == method)
    }

    /// True if `method` was called with exactly `args`.
    pub fn was_called_with(&self, method: Method, args: &[Arg]) -> bool {
        self.calls.borrow().iter().any(|c| c.method == method && c.args == args)
    }

    /// Argument lists of every call to `method`, in call order.
    pub fn args_of(&self, method: Method) -> Vec<Vec<Arg>> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.method == method)
            .map(|c| c.args.clone())
            .collect()
    }

    /// Check the ledger against the registered expectations.
    ///
    /// Calls are attributed in order to the first matching expectation that
    /// still has room under its [`Times`](crate::Times) bound. When every
    /// matching expectation is full the call counts against the first one.
    /// A call that matches no expectation is unexpected.
    pub fn verify(&self) -> Result<(), VerifyError> {
        let calls = self.calls.borrow();
        let mut counts = vec![0usize; self.expectations.len()];
        let mut mismatches = Vec::new();

        for call in calls.iter() {
            let matching: Vec<usize> = self
                .expectations
                .iter()
                .enumerate()
                .filter(|(_, e)| e.matches(call))
                .map(|(i, _)| i)
                .collect();

            let slot = matching
                .iter()
                .copied()
                .find(|&i| self.expectations[i].expected().has_capacity(counts[i]))
                .or_else(|| matching.first().copied());

            match slot {
                Some(i) => counts[i] += 1,
                None => mismatches.push(Mismatch::Unexpected { call: call.clone() }),
            }
        }

        for (expectation, actual) in self.expectations.iter().zip(counts) {
            if !expectation.expected().is_satisfied(actual) {
                mismatches.push(Mismatch::Count {
                    method: expectation.method(),
                    matchers: expectation.describe_args(),
                    expected: expectation.expected(),
                    actual,
                });
            }
        }

        if mismatches.is_empty() {
            return Ok(());
        }

        let err = VerifyError::new(mismatches);
        tracing::warn!(failures = err.mismatches().len(), "call expectations not met");
        Err(err)
    }
}
