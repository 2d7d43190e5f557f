//! Port context - mailbox plus the native handler the host schedules.
//!
//! Each invocation of [`PortContext::native_handler`] takes at most one
//! message from the mailbox so a turn never blocks the host scheduler.
//! Tokio hosts can instead drive the port with [`PortContext::run`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use sample_app_port::port::{ChannelReplySink, HandlerOutcome, PortContext};
//! use sample_app_port::term::{Pid, Ref, Term};
//! use sample_app_port::PortConfig;
//!
//! let (sink, mut replies) = ChannelReplySink::new();
//! let (mut ctx, handle) = PortContext::new(&PortConfig::default(), Arc::new(sink)).unwrap();
//!
//! handle.call(Pid(1), Ref(1), Term::binary(vec![0x01])).unwrap();
//! assert_eq!(ctx.native_handler(), HandlerOutcome::Continue);
//!
//! let reply = replies.try_recv().unwrap();
//! assert_eq!(reply.reply.as_bytes(), b"\x00PONG");
//! ```

use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TryRecvError, error::TrySendError};

use super::message::{GenMessage, ParseResult};
use super::sink::ReplySink;
use crate::config::PortConfig;
use crate::dispatcher::RequestDispatcher;
use crate::error::{PortError, Result};
use crate::term::{Pid, Ref, Term};

/// What the host should do after a handler turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// Keep scheduling this port.
    Continue,
    /// All senders are gone and the mailbox is drained.
    Closed,
}

/// A running port: owns the mailbox receiver and the reply path.
pub struct PortContext {
    name: String,
    mailbox: mpsc::Receiver<Term>,
    sink: Arc<dyn ReplySink>,
}

/// Sending side of a port mailbox.
#[derive(Debug, Clone)]
pub struct PortHandle {
    tx: mpsc::Sender<Term>,
}

impl PortContext {
    /// Create a port context and the handle used to feed its mailbox.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::InvalidConfig`] if the config does not validate.
    pub fn new(config: &PortConfig, sink: Arc<dyn ReplySink>) -> Result<(Self, PortHandle)> {
        config.validate()?;
        let (tx, mailbox) = mpsc::channel(config.mailbox_capacity);
        let ctx = Self {
            name: config.name.clone(),
            mailbox,
            sink,
        };
        Ok((ctx, PortHandle { tx }))
    }

    /// Port name from its config.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run one scheduling turn.
    ///
    /// Handles at most one pending message and returns immediately when
    /// the mailbox is empty.
    pub fn native_handler(&mut self) -> HandlerOutcome {
        match self.mailbox.try_recv() {
            Ok(message) => {
                self.handle_message(message);
                HandlerOutcome::Continue
            }
            Err(TryRecvError::Empty) => HandlerOutcome::Continue,
            Err(TryRecvError::Disconnected) => HandlerOutcome::Closed,
        }
    }

    /// Handle messages as they arrive until every handle is dropped.
    pub async fn run(mut self) {
        while let Some(message) = self.mailbox.recv().await {
            self.handle_message(message);
        }
        tracing::debug!("Port {} mailbox closed", self.name);
    }

    fn handle_message(&self, message: Term) {
        let call = match GenMessage::parse(message) {
            ParseResult::Call(call) => call,
            ParseResult::NotCall => {
                tracing::warn!("Port {} ignoring non-call message", self.name);
                return;
            }
        };

        let reply = RequestDispatcher::dispatch_term(&call.request);
        tracing::trace!(
            "Port {} replying to {:?} ({:?}): {} bytes",
            self.name,
            call.pid,
            call.reference,
            reply.len()
        );

        if let Err(e) = self.sink.send_reply(call.pid, call.reference, reply) {
            tracing::warn!(
                "Port {} failed to deliver reply to {:?}: {}",
                self.name,
                call.pid,
                e
            );
        }
    }
}

impl PortHandle {
    /// Queue a raw message without waiting.
    ///
    /// # Errors
    ///
    /// [`PortError::MailboxFull`] at capacity, [`PortError::PortClosed`]
    /// once the context is gone.
    pub fn send(&self, message: Term) -> Result<()> {
        self.tx.try_send(message).map_err(|e| match e {
            TrySendError::Full(_) => PortError::MailboxFull,
            TrySendError::Closed(_) => PortError::PortClosed,
        })
    }

    /// Queue a call from `pid`.
    pub fn call(&self, pid: Pid, reference: Ref, request: Term) -> Result<()> {
        self.send(GenMessage::call_term(pid, reference, request))
    }

    /// Check if the port context has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
