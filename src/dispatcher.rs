//! Request dispatcher - decode, run, and encode one request.
//!
//! The dispatcher is a pure function from request bytes to reply bytes.
//! It holds no state, never blocks, and never fails at the call level:
//! malformed or unknown requests produce a failure-tagged [`Reply`].
//!
//! # Example
//!
//! ```
//! use sample_app_port::RequestDispatcher;
//!
//! let reply = RequestDispatcher::dispatch(&[0x02, b'h', b'i']);
//! assert_eq!(reply.as_bytes(), &[0x00, b'h', b'i']);
//!
//! let reply = RequestDispatcher::dispatch(&[]);
//! assert_eq!(reply.as_bytes(), &[0x01, 0x11]);
//! ```

use crate::protocol::{FailureReason, Opcode, Reply, PONG};
use crate::term::Term;

/// Stateless opcode dispatcher.
///
/// Implemented as a marker struct with associated functions; there is
/// nothing to construct or share.
pub struct RequestDispatcher;

impl RequestDispatcher {
    /// Dispatch a binary request.
    ///
    /// Byte 0 selects the operation, the remaining bytes are its argument.
    /// The request is only read; the reply is always a fresh buffer.
    pub fn dispatch(request: &[u8]) -> Reply {
        let Some((&opcode, argument)) = request.split_first() else {
            tracing::trace!("Empty request");
            return Reply::failure(FailureReason::MissingOpcode);
        };

        match Opcode::from_byte(opcode) {
            Some(Opcode::Ping) => Reply::success(PONG),
            Some(Opcode::Echo) => Reply::success(argument),
            None => {
                tracing::trace!("Unknown opcode {:#04x}", opcode);
                Reply::failure(FailureReason::UnknownOpcode)
            }
        }
    }

    /// Dispatch a host value, rejecting anything that is not a binary.
    pub fn dispatch_term(request: &Term) -> Reply {
        match request.as_binary() {
            Some(bytes) => Self::dispatch(bytes),
            None => {
                tracing::trace!("Request is not a binary");
                Reply::failure(FailureReason::NotBinary)
            }
        }
    }
}
