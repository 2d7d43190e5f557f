//! Wire format constants and the closed opcode/status/reason tables.
//!
//! Request and reply framing:
//! ```text
//! Request:  ┌────────┬──────────────────┐
//!           │ Opcode │ Argument         │
//!           │ 1 byte │ N bytes (N >= 0) │
//!           └────────┴──────────────────┘
//!
//! Reply:    ┌────────┬──────────────────────────────────────┐
//!           │ Status │ Body                                 │
//!           │ 1 byte │ payload (ok) or 1 reason byte (fail) │
//!           └────────┴──────────────────────────────────────┘
//! ```

/// Status byte of a successful reply.
pub const STATUS_OK: u8 = 0x00;

/// Status byte of a failed reply.
pub const STATUS_ERROR: u8 = 0x01;

/// Length of a failure reply (status + reason).
pub const FAILURE_REPLY_LEN: usize = 2;

/// Payload returned by PING.
pub const PONG: &[u8; 4] = b"PONG";

/// Opcode byte values.
pub mod opcodes {
    /// PING: argument ignored, replies `PONG`.
    pub const PING: u8 = 0x01;
    /// ECHO: replies with the argument bytes verbatim.
    pub const ECHO: u8 = 0x02;
}

/// Failure reason codes carried in byte 1 of a failure reply.
pub mod reasons {
    /// Request value was not a binary.
    pub const NOT_BINARY: u8 = 0x10;
    /// Request was empty, no opcode byte.
    pub const MISSING_OPCODE: u8 = 0x11;
    /// Opcode byte is not in the table.
    pub const UNKNOWN_OPCODE: u8 = 0x12;
}

/// Supported operation codes.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Liveness check.
    Ping = opcodes::PING,
    /// Return the argument unchanged.
    Echo = opcodes::ECHO,
}

impl Opcode {
    /// Look up an opcode byte. Returns `None` for values outside the table.
    ///
    /// # Example
    ///
    /// ```
    /// use sample_app_port::protocol::Opcode;
    ///
    /// assert_eq!(Opcode::from_byte(0x01), Some(Opcode::Ping));
    /// assert_eq!(Opcode::from_byte(0x99), None);
    /// ```
    #[inline]
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            opcodes::PING => Some(Self::Ping),
            opcodes::ECHO => Some(Self::Echo),
            _ => None,
        }
    }

    /// Wire value of this opcode.
    #[inline]
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

/// Reasons a reply can carry a failure status.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    /// Input was not a binary value.
    NotBinary = reasons::NOT_BINARY,
    /// Input was empty.
    MissingOpcode = reasons::MISSING_OPCODE,
    /// First byte did not name a known operation.
    UnknownOpcode = reasons::UNKNOWN_OPCODE,
}

impl FailureReason {
    /// Look up a reason code. Returns `None` for unassigned codes.
    #[inline]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            reasons::NOT_BINARY => Some(Self::NotBinary),
            reasons::MISSING_OPCODE => Some(Self::MissingOpcode),
            reasons::UNKNOWN_OPCODE => Some(Self::UnknownOpcode),
            _ => None,
        }
    }

    /// Wire value of this reason.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::NotBinary => "not a binary",
            Self::MissingOpcode => "missing opcode",
            Self::UnknownOpcode => "unknown opcode",
        };
        f.write_str(text)
    }
}

/// Reply status.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Operation succeeded, body is the payload.
    Ok = STATUS_OK,
    /// Operation failed, body is one reason byte.
    Error = STATUS_ERROR,
}

impl Status {
    /// Look up a status byte.
    #[inline]
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            STATUS_OK => Some(Self::Ok),
            STATUS_ERROR => Some(Self::Error),
            _ => None,
        }
    }

    /// Wire value of this status.
    #[inline]
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_table() {
        assert_eq!(Opcode::from_byte(0x01), Some(Opcode::Ping));
        assert_eq!(Opcode::from_byte(0x02), Some(Opcode::Echo));
        assert_eq!(Opcode::Ping.as_byte(), 0x01);
        assert_eq!(Opcode::Echo.as_byte(), 0x02);
    }

    #[test]
    fn test_unknown_opcodes() {
        for byte in (0u8..=255).filter(|b| *b != 0x01 && *b != 0x02) {
            assert_eq!(Opcode::from_byte(byte), None, "byte {byte:#04x}");
        }
    }

    #[test]
    fn test_reason_codes_are_stable() {
        assert_eq!(FailureReason::NotBinary.code(), 0x10);
        assert_eq!(FailureReason::MissingOpcode.code(), 0x11);
        assert_eq!(FailureReason::UnknownOpcode.code(), 0x12);

        for reason in [
            FailureReason::NotBinary,
            FailureReason::MissingOpcode,
            FailureReason::UnknownOpcode,
        ] {
            assert_eq!(FailureReason::from_code(reason.code()), Some(reason));
        }
        assert_eq!(FailureReason::from_code(0x13), None);
        assert_eq!(FailureReason::from_code(0x00), None);
    }

    #[test]
    fn test_status_bytes() {
        assert_eq!(Status::from_byte(0x00), Some(Status::Ok));
        assert_eq!(Status::from_byte(0x01), Some(Status::Error));
        assert_eq!(Status::from_byte(0x02), None);
        assert_eq!(Status::Ok.as_byte(), STATUS_OK);
        assert_eq!(Status::Error.as_byte(), STATUS_ERROR);
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(FailureReason::UnknownOpcode.to_string(), "unknown opcode");
    }
}
