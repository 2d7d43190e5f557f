//! Caller side of a port.
//!
//! A [`PortClient`] plays the role of the calling process: it owns a pid,
//! hands out fresh references, and matches replies back to calls.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use sample_app_port::port::{ChannelReplySink, PortClient, PortContext};
//! use sample_app_port::term::{Pid, Term};
//! use sample_app_port::PortConfig;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (sink, replies) = ChannelReplySink::new();
//!     let (ctx, handle) = PortContext::new(&PortConfig::default(), Arc::new(sink))?;
//!     tokio::spawn(ctx.run());
//!
//!     let mut client = PortClient::new(handle, Pid(1), replies);
//!     let reply = client.call(Term::binary(vec![0x02, b'h', b'i'])).await?;
//!     assert_eq!(reply.payload(), b"hi");
//!     Ok(())
//! }
//! ```

use std::collections::{HashMap, HashSet};

use tokio::sync::mpsc::{self, error::TryRecvError};

use super::context::PortHandle;
use super::sink::AddressedReply;
use crate::error::{PortError, Result};
use crate::protocol::Reply;
use crate::term::{Pid, Ref, Term};

/// A calling process bound to one port.
///
/// Replies may be collected in any order: a reply that arrives while the
/// client is waiting on a different call is parked until asked for.
pub struct PortClient {
    handle: PortHandle,
    pid: Pid,
    next_ref: u64,
    replies: mpsc::UnboundedReceiver<AddressedReply>,
    /// Calls sent and not yet collected.
    outstanding: HashSet<Ref>,
    /// Replies received for outstanding calls.
    parked: HashMap<Ref, Reply>,
}

impl PortClient {
    /// Create a client that sends through `handle` and reads `replies`.
    pub fn new(
        handle: PortHandle,
        pid: Pid,
        replies: mpsc::UnboundedReceiver<AddressedReply>,
    ) -> Self {
        Self {
            handle,
            pid,
            next_ref: 1,
            replies,
            outstanding: HashSet::new(),
            parked: HashMap::new(),
        }
    }

    /// Pid replies are addressed to.
    #[inline]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// Number of calls sent whose replies have not been collected.
    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }

    /// Queue a call and return its reference without waiting.
    pub fn send_call(&mut self, request: Term) -> Result<Ref> {
        let reference = Ref(self.next_ref);
        self.next_ref += 1;
        self.handle.call(self.pid, reference, request)?;
        self.outstanding.insert(reference);
        Ok(reference)
    }

    /// Send a call and wait for its reply.
    pub async fn call(&mut self, request: Term) -> Result<Reply> {
        let reference = self.send_call(request)?;
        self.wait_reply(reference).await
    }

    /// Send a binary request and wait for its reply.
    pub async fn call_bytes(&mut self, request: &[u8]) -> Result<Reply> {
        self.call(Term::binary(request.to_vec())).await
    }

    /// Wait for the reply to `reference`.
    ///
    /// Replies to other outstanding calls are parked for later.
    ///
    /// # Errors
    ///
    /// [`PortError::PortClosed`] if the reply channel closes first.
    pub async fn wait_reply(&mut self, reference: Ref) -> Result<Reply> {
        if let Some(reply) = self.take_parked(reference) {
            return Ok(reply);
        }
        loop {
            let addressed = self.replies.recv().await.ok_or(PortError::PortClosed)?;
            if let Some(reply) = self.accept(addressed, reference) {
                return Ok(reply);
            }
        }
    }

    /// Non-blocking check for the reply to `reference`.
    ///
    /// Returns `Ok(None)` when nothing matching has arrived yet.
    pub fn try_take_reply(&mut self, reference: Ref) -> Result<Option<Reply>> {
        if let Some(reply) = self.take_parked(reference) {
            return Ok(Some(reply));
        }
        loop {
            match self.replies.try_recv() {
                Ok(addressed) => {
                    if let Some(reply) = self.accept(addressed, reference) {
                        return Ok(Some(reply));
                    }
                }
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Disconnected) => return Err(PortError::PortClosed),
            }
        }
    }

    fn take_parked(&mut self, reference: Ref) -> Option<Reply> {
        let reply = self.parked.remove(&reference)?;
        self.outstanding.remove(&reference);
        Some(reply)
    }

    /// Return the reply if it answers `reference`, park it if it answers
    /// another outstanding call, drop it otherwise.
    fn accept(&mut self, addressed: AddressedReply, reference: Ref) -> Option<Reply> {
        if addressed.to != self.pid || !self.outstanding.contains(&addressed.reference) {
            tracing::debug!(
                "Discarding stale reply for {:?} ({:?})",
                addressed.to,
                addressed.reference
            );
            return None;
        }
        if addressed.reference == reference {
            self.outstanding.remove(&reference);
            return Some(addressed.reply);
        }
        self.parked.insert(addressed.reference, addressed.reply);
        None
    }
}
