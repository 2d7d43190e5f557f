//! Host value representation at the port boundary.
//!
//! Messages arrive in a port mailbox as [`Term`]s. Only [`Term::Binary`]
//! is a valid request body; everything else is answered with a
//! "not a binary" failure.

use bytes::Bytes;

/// Process identifier of a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pid(pub u64);

/// Unique reference correlating a call with its reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ref(pub u64);

/// A host value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// Byte string.
    Binary(Bytes),
    /// Named constant.
    Atom(String),
    /// Integer.
    Integer(i64),
    /// Process identifier.
    Pid(Pid),
    /// Reference.
    Ref(Ref),
    /// Fixed-size tuple.
    Tuple(Vec<Term>),
    /// List.
    List(Vec<Term>),
}

impl Term {
    /// Binary term from anything convertible to `Bytes`.
    pub fn binary(data: impl Into<Bytes>) -> Self {
        Term::Binary(data.into())
    }

    /// Atom term.
    pub fn atom(name: &str) -> Self {
        Term::Atom(name.to_string())
    }

    /// Borrow the bytes of a binary term.
    #[inline]
    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            Term::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Check if this is a binary term.
    #[inline]
    pub fn is_binary(&self) -> bool {
        matches!(self, Term::Binary(_))
    }

    /// Borrow the elements of a tuple term.
    #[inline]
    pub fn as_tuple(&self) -> Option<&[Term]> {
        match self {
            Term::Tuple(elements) => Some(elements),
            _ => None,
        }
    }

    /// Check if this is the atom `name`.
    #[inline]
    pub fn is_atom(&self, name: &str) -> bool {
        matches!(self, Term::Atom(a) if a == name)
    }
}

impl From<Bytes> for Term {
    fn from(bytes: Bytes) -> Self {
        Term::Binary(bytes)
    }
}

impl From<Vec<u8>> for Term {
    fn from(bytes: Vec<u8>) -> Self {
        Term::Binary(Bytes::from(bytes))
    }
}

impl From<&'static [u8]> for Term {
    fn from(bytes: &'static [u8]) -> Self {
        Term::Binary(Bytes::from_static(bytes))
    }
}
