//! Protocol module - wire constants, opcode table, and reply encoding.
//!
//! This module implements the request/reply framing:
//! - 1-byte opcode in front of every request
//! - 1-byte status in front of every reply
//! - closed tables for opcodes and failure reasons

mod reply;
mod wire_format;

pub use reply::{Outcome, Reply};
pub use wire_format::{
    opcodes, reasons, FailureReason, Opcode, Status, FAILURE_REPLY_LEN, PONG, STATUS_ERROR,
    STATUS_OK,
};
