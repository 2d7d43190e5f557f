//! Gen-call message parsing.
//!
//! A call arrives in the mailbox as `{'$call', {Pid, Ref}, Request}`.
//! Anything else is not a call and is ignored by the port.

use crate::term::{Pid, Ref, Term};

/// Tag atom of a call message.
pub const CALL_TAG: &str = "$call";

/// A parsed call: who asked, how to correlate the answer, and the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenMessage {
    /// Caller to send the reply to.
    pub pid: Pid,
    /// Reference echoed back with the reply.
    pub reference: Ref,
    /// Request value, not yet checked for binary shape.
    pub request: Term,
}

/// Result of parsing a mailbox message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseResult {
    /// Well-formed call.
    Call(GenMessage),
    /// Anything else.
    NotCall,
}

impl GenMessage {
    /// Parse a mailbox message.
    ///
    /// # Example
    ///
    /// ```
    /// use sample_app_port::port::{GenMessage, ParseResult};
    /// use sample_app_port::term::{Pid, Ref, Term};
    ///
    /// let msg = GenMessage::call_term(Pid(7), Ref(1), Term::binary(vec![0x01]));
    /// match GenMessage::parse(msg) {
    ///     ParseResult::Call(call) => assert_eq!(call.pid, Pid(7)),
    ///     ParseResult::NotCall => unreachable!(),
    /// }
    /// ```
    pub fn parse(message: Term) -> ParseResult {
        let Term::Tuple(elements) = message else {
            return ParseResult::NotCall;
        };
        let Ok([tag, from, request]) = <[Term; 3]>::try_from(elements) else {
            return ParseResult::NotCall;
        };
        if !tag.is_atom(CALL_TAG) {
            return ParseResult::NotCall;
        }
        match from.as_tuple() {
            Some([Term::Pid(pid), Term::Ref(reference)]) => ParseResult::Call(GenMessage {
                pid: *pid,
                reference: *reference,
                request,
            }),
            _ => ParseResult::NotCall,
        }
    }

    /// Build the call term for `request` from `pid`.
    pub fn call_term(pid: Pid, reference: Ref, request: Term) -> Term {
        Term::Tuple(vec![
            Term::atom(CALL_TAG),
            Term::Tuple(vec![Term::Pid(pid), Term::Ref(reference)]),
            request,
        ])
    }

    /// Convert back into the call term.
    pub fn into_term(self) -> Term {
        Self::call_term(self.pid, self.reference, self.request)
    }
}
