//! Port module - the plumbing between a host and the dispatcher.
//!
//! Provides:
//! - [`GenMessage`] - parses `{'$call', {Pid, Ref}, Request}` messages
//! - [`PortContext`] / [`PortHandle`] - mailbox and native handler
//! - [`ReplySink`] / [`ReplyRouter`] - where replies go, per caller pid
//! - [`PortClient`] - caller side, matches replies to calls
//! - [`DriverTable`] / [`PortDriver`] - registration and lifecycle hooks

mod client;
mod context;
mod driver;
mod message;
mod sink;

pub use client::PortClient;
pub use context::{HandlerOutcome, PortContext, PortHandle};
pub use driver::{DriverTable, PortDriver, SampleAppPort, SAMPLE_APP_PORT_DRIVER};
pub use message::{GenMessage, ParseResult, CALL_TAG};
pub use sink::{AddressedReply, ChannelReplySink, ReplyRouter, ReplySink};
