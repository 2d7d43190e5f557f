//! Reply delivery back to callers.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use tokio::sync::mpsc;

use crate::error::{PortError, Result};
use crate::protocol::Reply;
use crate::term::{Pid, Ref};

/// Destination for replies produced by a port.
pub trait ReplySink: Send + Sync + 'static {
    /// Deliver `reply` to `to`, tagged with `reference`.
    fn send_reply(&self, to: Pid, reference: Ref, reply: Reply) -> Result<()>;
}

/// A reply together with its destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressedReply {
    /// Caller pid.
    pub to: Pid,
    /// Reference from the originating call.
    pub reference: Ref,
    /// Encoded reply.
    pub reply: Reply,
}

/// Sink that forwards replies over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelReplySink {
    tx: mpsc::UnboundedSender<AddressedReply>,
}

impl ChannelReplySink {
    /// Create a sink and the receiver its replies arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<AddressedReply>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ReplySink for ChannelReplySink {
    fn send_reply(&self, to: Pid, reference: Ref, reply: Reply) -> Result<()> {
        self.tx
            .send(AddressedReply {
                to,
                reference,
                reply,
            })
            .map_err(|_| PortError::PortClosed)
    }
}

/// Sink that routes each reply to the channel registered for its pid.
///
/// Lets several callers share one port.
#[derive(Debug, Default)]
pub struct ReplyRouter {
    routes: Mutex<HashMap<Pid, mpsc::UnboundedSender<AddressedReply>>>,
}

impl ReplyRouter {
    /// Create a router with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `pid`, returning the receiver its replies arrive on.
    ///
    /// Registering a pid again replaces its previous route.
    pub fn register(&self, pid: Pid) -> mpsc::UnboundedReceiver<AddressedReply> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(pid, tx);
        rx
    }

    /// Remove the route for `pid`. Returns false if it was not registered.
    pub fn unregister(&self, pid: Pid) -> bool {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&pid)
            .is_some()
    }
}

impl ReplySink for ReplyRouter {
    fn send_reply(&self, to: Pid, reference: Ref, reply: Reply) -> Result<()> {
        let routes = self.routes.lock().unwrap_or_else(PoisonError::into_inner);
        let tx = routes.get(&to).ok_or(PortError::UnknownProcess(to))?;
        tx.send(AddressedReply {
            to,
            reference,
            reply,
        })
        .map_err(|_| PortError::PortClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::FailureReason;

    #[test]
    fn test_router_delivers_by_pid() {
        let router = ReplyRouter::new();
        let mut rx1 = router.register(Pid(1));
        let mut rx2 = router.register(Pid(2));

        router.send_reply(Pid(2), Ref(1), Reply::success(b"b")).unwrap();
        router.send_reply(Pid(1), Ref(1), Reply::success(b"a")).unwrap();

        assert_eq!(rx1.try_recv().unwrap().reply.payload(), b"a");
        assert_eq!(rx2.try_recv().unwrap().reply.payload(), b"b");
        assert!(rx1.try_recv().is_err());
        assert!(rx2.try_recv().is_err());
    }

    #[test]
    fn test_router_unknown_pid() {
        let router = ReplyRouter::new();
        let _rx = router.register(Pid(1));
        assert!(router.unregister(Pid(1)));
        assert!(!router.unregister(Pid(1)));

        let result = router.send_reply(Pid(1), Ref(1), Reply::success(b""));
        assert!(matches!(result, Err(PortError::UnknownProcess(Pid(1)))));
    }

    #[test]
    fn test_router_closed_receiver() {
        let router = ReplyRouter::new();
        drop(router.register(Pid(3)));
        let result = router.send_reply(Pid(3), Ref(1), Reply::success(b""));
        assert!(matches!(result, Err(PortError::PortClosed)));
    }

    #[test]
    fn test_forwards_reply() {
        let (sink, mut rx) = ChannelReplySink::new();
        sink.send_reply(Pid(1), Ref(2), Reply::success(b"x")).unwrap();

        let received = rx.try_recv().unwrap();
        assert_eq!(received.to, Pid(1));
        assert_eq!(received.reference, Ref(2));
        assert_eq!(received.reply.as_bytes(), b"\x00x");
    }

    #[test]
    fn test_closed_receiver() {
        let (sink, rx) = ChannelReplySink::new();
        drop(rx);
        let result = sink.send_reply(
            Pid(1),
            Ref(1),
            Reply::failure(FailureReason::UnknownOpcode),
        );
        assert!(matches!(result, Err(PortError::PortClosed)));
    }
}
