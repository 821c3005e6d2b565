//! Expectations about recorded calls.

use std::fmt;

use crate::recorder::{Arg, Call, Method};

/// How many calls an expectation allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Times {
    /// Exactly `n` calls.
    Exactly(usize),
    /// `n` or more calls.
    AtLeast(usize),
    /// Any number of calls, including none.
    Any,
}

impl Times {
    /// True if one more call still fits under the bound.
    pub fn has_capacity(self, count: usize) -> bool {
        match self {
            Self::Exactly(n) => count < n,
            Self::AtLeast(_) | Self::Any => true,
        }
    }

    /// True if `count` calls satisfy the bound.
    pub fn is_satisfied(self, count: usize) -> bool {
        match self {
            Self::Exactly(n) => count == n,
            Self::AtLeast(n) => count >= n,
            Self::Any => true,
        }
    }
}

impl fmt::Display for Times {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "exactly {n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
            Self::Any => f.write_str("any number of"),
        }
    }
}

/// Matcher for one positional argument.
pub enum ArgMatcher {
    /// Matches any value.
    Any,
    /// Matches an equal value.
    Eq(Arg),
    /// Matches when the predicate returns true.
    MatchedBy(Box<dyn Fn(&Arg) -> bool + Send>),
}

impl ArgMatcher {
    /// Match with a custom predicate.
    pub fn matched_by(predicate: impl Fn(&Arg) -> bool + Send + 'static) -> Self {
        Self::MatchedBy(Box::new(predicate))
    }

    /// Match an exact byte payload.
    pub fn bytes(data: impl AsRef<[u8]>) -> Self {
        Self::Eq(Arg::bytes(data))
    }

    /// Match an exact destination length.
    pub fn len(len: usize) -> Self {
        Self::Eq(Arg::Len(len))
    }

    /// True if `arg` satisfies this matcher.
    pub fn matches(&self, arg: &Arg) -> bool {
        match self {
            Self::Any => true,
            Self::Eq(expected) => expected == arg,
            Self::MatchedBy(predicate) => predicate(arg),
        }
    }
}

impl From<Arg> for ArgMatcher {
    fn from(arg: Arg) -> Self {
        Self::Eq(arg)
    }
}

impl fmt::Debug for ArgMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::Eq(arg) => f.debug_tuple("Eq").field(arg).finish(),
            Self::MatchedBy(_) => f.write_str("MatchedBy(..)"),
        }
    }
}

impl fmt::Display for ArgMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("_"),
            Self::Eq(arg) => write!(f, "{arg}"),
            Self::MatchedBy(_) => f.write_str("<predicate>"),
        }
    }
}

/// A declared expectation: which method, with which arguments, how often.
///
/// Built fluently:
///
/// ```
/// use netmock_harness::{ArgMatcher, Expectation, Method};
///
/// let write_hello = Expectation::new(Method::Write)
///     .with_args([ArgMatcher::bytes(b"hello")])
///     .once();
/// ```
#[derive(Debug)]
pub struct Expectation {
    method: Method,
    args: Option<Vec<ArgMatcher>>,
    times: Times,
}

impl Expectation {
    /// Expect `method` with any arguments, at least once.
    pub fn new(method: Method) -> Self {
        Self { method, args: None, times: Times::AtLeast(1) }
    }

    /// Constrain positional arguments. A call with a different number of
    /// arguments never matches.
    pub fn with_args(mut self, args: impl IntoIterator<Item = ArgMatcher>) -> Self {
        self.args = Some(args.into_iter().collect());
        self
    }

    /// Expect exactly `n` calls.
    pub fn times(mut self, n: usize) -> Self {
        self.times = Times::Exactly(n);
        self
    }

    /// Expect exactly one call.
    pub fn once(self) -> Self {
        self.times(1)
    }

    /// Expect exactly two calls.
    pub fn twice(self) -> Self {
        self.times(2)
    }

    /// Expect `n` or more calls.
    pub fn at_least(mut self, n: usize) -> Self {
        self.times = Times::AtLeast(n);
        self
    }

    /// Allow the call without requiring it.
    pub fn maybe(mut self) -> Self {
        self.times = Times::Any;
        self
    }

    /// Expected method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Expected call count.
    pub fn expected(&self) -> Times {
        self.times
    }

    /// True if `call` matches method and arguments.
    pub fn matches(&self, call: &Call) -> bool {
        if call.method != self.method {
            return false;
        }
        match &self.args {
            None => true,
            Some(matchers) => {
                matchers.len() == call.args.len()
                    && matchers.iter().zip(&call.args).all(|(m, a)| m.matches(a))
            },
        }
    }

    /// Argument matchers rendered for reports; `..` when unconstrained.
    pub fn describe_args(&self) -> String {
        match &self.args {
            None => "..".to_string(),
            Some(matchers) => {
                matchers.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
            },
        }
    }
}
