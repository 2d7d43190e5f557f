//! Error types for sample-app-port.
//!
//! Only the port plumbing returns these. [`RequestDispatcher::dispatch`]
//! never fails; every decode problem becomes a failure reply instead.
//!
//! [`RequestDispatcher::dispatch`]: crate::RequestDispatcher::dispatch

use thiserror::Error;

use crate::term::Pid;

/// Main error type for port operations.
#[derive(Debug, Error)]
pub enum PortError {
    /// JSON deserialization error (configuration only).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Protocol error (malformed reply buffer, etc.).
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// No driver registered under the given name.
    #[error("Driver not found: {0}")]
    DriverNotFound(String),

    /// A driver with the same name is already registered.
    #[error("Driver already registered: {0}")]
    DriverAlreadyRegistered(String),

    /// Driver table has not been initialized, or was already destroyed.
    #[error("Driver table not initialized")]
    NotInitialized,

    /// No reply route registered for the process.
    #[error("Unknown process: {0:?}")]
    UnknownProcess(Pid),

    /// Port mailbox is at capacity.
    #[error("Mailbox full")]
    MailboxFull,

    /// The other side of a port channel has gone away.
    #[error("Port closed")]
    PortClosed,

    /// Configuration value out of range.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type alias using PortError.
pub type Result<T> = std::result::Result<T, PortError>;
