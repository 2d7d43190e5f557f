//! Owned reply buffer with typed accessors.
//!
//! A reply is always freshly allocated and never shares storage with the
//! request it answers. Backed by `bytes::Bytes` so handing it to a reply
//! sink or cloning it for a caller is cheap.
//!
//! # Example
//!
//! ```
//! use sample_app_port::protocol::{FailureReason, Reply};
//!
//! let ok = Reply::success(b"PONG");
//! assert_eq!(ok.as_bytes(), &[0x00, b'P', b'O', b'N', b'G']);
//!
//! let err = Reply::failure(FailureReason::UnknownOpcode);
//! assert_eq!(err.as_bytes(), &[0x01, 0x12]);
//! ```

use bytes::Bytes;

use super::wire_format::{FailureReason, Status, FAILURE_REPLY_LEN, STATUS_ERROR, STATUS_OK};
use crate::error::{PortError, Result};

/// Borrowed view of what a reply says.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<'a> {
    /// Success with the given payload (may be empty).
    Success(&'a [u8]),
    /// Failure with the given reason.
    Failure(FailureReason),
}

/// An encoded reply: `[status][body]`.
///
/// Invariant: length >= 1, byte 0 is a valid [`Status`], and a failure
/// reply is exactly `[0x01, reason]`. The decoded reason is kept alongside
/// the bytes so accessors never re-parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    bytes: Bytes,
    /// `Some` for failure replies.
    reason: Option<FailureReason>,
}

impl Reply {
    /// Build a success reply, copying `payload` after the status byte.
    pub fn success(payload: &[u8]) -> Self {
        let mut buf = Vec::with_capacity(1 + payload.len());
        buf.push(STATUS_OK);
        buf.extend_from_slice(payload);
        Self {
            bytes: Bytes::from(buf),
            reason: None,
        }
    }

    /// Build a failure reply carrying a single reason byte.
    pub fn failure(reason: FailureReason) -> Self {
        Self {
            bytes: Bytes::copy_from_slice(&[STATUS_ERROR, reason.code()]),
            reason: Some(reason),
        }
    }

    /// Parse reply bytes received by a caller (copies data).
    ///
    /// # Errors
    ///
    /// Returns [`PortError::Protocol`] if the buffer is empty, the status
    /// byte is unknown, or a failure body is not exactly one known reason.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        Self::decode_bytes(Bytes::copy_from_slice(buf))
    }

    /// Parse reply bytes without copying.
    ///
    /// # Errors
    ///
    /// Same as [`Reply::decode`].
    pub fn decode_bytes(bytes: Bytes) -> Result<Self> {
        let Some(&status_byte) = bytes.first() else {
            return Err(PortError::Protocol("Reply is empty".to_string()));
        };

        let reason = match Status::from_byte(status_byte) {
            Some(Status::Ok) => None,
            Some(Status::Error) => {
                if bytes.len() != FAILURE_REPLY_LEN {
                    return Err(PortError::Protocol(format!(
                        "Failure reply must be {} bytes, got {}",
                        FAILURE_REPLY_LEN,
                        bytes.len()
                    )));
                }
                let code = bytes[1];
                let reason = FailureReason::from_code(code).ok_or_else(|| {
                    PortError::Protocol(format!("Unknown failure reason {:#04x}", code))
                })?;
                Some(reason)
            }
            None => {
                return Err(PortError::Protocol(format!(
                    "Unknown status byte {:#04x}",
                    status_byte
                )));
            }
        };

        Ok(Self { bytes, reason })
    }

    /// Full encoded reply.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the reply, returning the encoded buffer.
    #[inline]
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    /// Encoded length, including the status byte.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Reply status.
    #[inline]
    pub fn status(&self) -> Status {
        match self.reason {
            None => Status::Ok,
            Some(_) => Status::Error,
        }
    }

    /// Check if this is a success reply.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.status() == Status::Ok
    }

    /// Check if this is a failure reply.
    #[inline]
    pub fn is_failure(&self) -> bool {
        self.status() == Status::Error
    }

    /// Body after the status byte.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.bytes[1..]
    }

    /// Failure reason, if this is a failure reply.
    #[inline]
    pub fn failure_reason(&self) -> Option<FailureReason> {
        self.reason
    }

    /// Typed view of the reply.
    pub fn outcome(&self) -> Outcome<'_> {
        match self.reason {
            None => Outcome::Success(self.payload()),
            Some(reason) => Outcome::Failure(reason),
        }
    }
}

impl AsRef<[u8]> for Reply {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Reply> for Bytes {
    fn from(reply: Reply) -> Self {
        reply.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_layout() {
        let reply = Reply::success(b"hello");
        assert_eq!(reply.as_bytes(), b"\x00hello");
        assert_eq!(reply.len(), 6);
        assert!(reply.is_success());
        assert!(!reply.is_failure());
        assert_eq!(reply.payload(), b"hello");
        assert_eq!(reply.failure_reason(), None);
        assert_eq!(reply.outcome(), Outcome::Success(b"hello"));
    }

    #[test]
    fn test_success_empty_payload() {
        let reply = Reply::success(&[]);
        assert_eq!(reply.as_bytes(), &[0x00]);
        assert!(reply.payload().is_empty());
        assert!(!reply.is_empty());
    }

    #[test]
    fn test_failure_layout() {
        let reply = Reply::failure(FailureReason::MissingOpcode);
        assert_eq!(reply.as_bytes(), &[0x01, 0x11]);
        assert_eq!(reply.status(), Status::Error);
        assert_eq!(reply.failure_reason(), Some(FailureReason::MissingOpcode));
        assert_eq!(
            reply.outcome(),
            Outcome::Failure(FailureReason::MissingOpcode)
        );
    }

    #[test]
    fn test_success_copies_payload() {
        let source = vec![1u8, 2, 3];
        let reply = Reply::success(&source);
        assert_ne!(reply.payload().as_ptr(), source.as_ptr());
        drop(source);
        assert_eq!(reply.payload(), &[1, 2, 3]);
    }

    #[test]
    fn test_decode_valid() {
        let ok = Reply::decode(&[0x00, 0x41]).unwrap();
        assert_eq!(ok.payload(), b"A");

        let err = Reply::decode(&[0x01, 0x12]).unwrap();
        assert_eq!(err.failure_reason(), Some(FailureReason::UnknownOpcode));
    }

    #[test]
    fn test_decoded_failure_matches_constructed() {
        for reason in [
            FailureReason::NotBinary,
            FailureReason::MissingOpcode,
            FailureReason::UnknownOpcode,
        ] {
            let decoded = Reply::decode(&[0x01, reason.code()]).unwrap();
            assert_eq!(decoded, Reply::failure(reason));
            assert_eq!(decoded.outcome(), Outcome::Failure(reason));
            assert_eq!(decoded.status(), Status::Error);
        }

        let decoded = Reply::decode(&[0x00, 0x10]).unwrap();
        assert_eq!(decoded, Reply::success(&[0x10]));
        assert_eq!(decoded.outcome(), Outcome::Success(&[0x10]));
        assert_eq!(decoded.failure_reason(), None);
    }

    #[test]
    fn test_decode_empty() {
        let result = Reply::decode(&[]);
        assert!(matches!(result, Err(PortError::Protocol(_))));
    }

    #[test]
    fn test_decode_unknown_status() {
        let result = Reply::decode(&[0x02, 0x00]);
        assert!(matches!(result, Err(PortError::Protocol(_))));
    }

    #[test]
    fn test_decode_bad_failure_body() {
        assert!(Reply::decode(&[0x01]).is_err());
        assert!(Reply::decode(&[0x01, 0x10, 0x00]).is_err());
        assert!(Reply::decode(&[0x01, 0x7F]).is_err());
    }

    #[test]
    fn test_decode_bytes_zero_copy() {
        let original = Bytes::from_static(b"\x00data");
        let reply = Reply::decode_bytes(original.clone()).unwrap();
        assert_eq!(reply.as_bytes().as_ptr(), original.as_ptr());
    }

    #[test]
    fn test_into_bytes() {
        let bytes: Bytes = Reply::success(b"x").into();
        assert_eq!(&bytes[..], b"\x00x");
    }
}
