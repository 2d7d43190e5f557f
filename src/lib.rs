//! # sample-app-port
//!
//! Opcode-dispatched binary request/reply handler.
//!
//! A request is `[opcode][argument...]`; a reply is `[status][body...]`
//! where status `0x00` carries the payload and `0x01` carries one
//! failure-reason byte. Every input, including malformed ones, gets a
//! well-formed reply.
//!
//! | opcode | name | reply payload |
//! |--------|------|---------------|
//! | `0x01` | PING | `PONG` |
//! | `0x02` | ECHO | argument bytes |
//!
//! ## Architecture
//!
//! - **Core** ([`RequestDispatcher`]): pure `&[u8] -> Reply` transformation
//! - **Port** ([`port`]): mailbox, gen-call parsing, reply delivery, and
//!   driver lifecycle for hosts that deliver requests as messages
//!
//! ## Example
//!
//! ```
//! use sample_app_port::RequestDispatcher;
//!
//! let reply = RequestDispatcher::dispatch(&[0x01]);
//! assert_eq!(reply.as_bytes(), b"\x00PONG");
//!
//! let reply = RequestDispatcher::dispatch(&[0x99]);
//! assert_eq!(reply.as_bytes(), &[0x01, 0x12]);
//! ```

pub mod config;
pub mod error;
pub mod port;
pub mod protocol;
pub mod term;

mod dispatcher;

pub use config::PortConfig;
pub use dispatcher::RequestDispatcher;
pub use error::PortError;
pub use protocol::{FailureReason, Opcode, Reply};
