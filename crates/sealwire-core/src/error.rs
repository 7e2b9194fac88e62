//! Error types surfaced by the send pipeline.
//!
//! Admission failures (`SendBufferFull`, `MessageTooLarge`) are expected
//! under load and callers react with backpressure or by dropping the
//! message. A `FramingError` while packing a frame is fatal for the
//! session: a valid symmetric key does not normally produce one.

use thiserror::Error;

/// Errors returned at the send-pipeline boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// The message's rate-limit class is at its byte cap. Retryable:
    /// budget frees up as queued frames drain to the peer.
    #[error("peer send buffer is full")]
    SendBufferFull,
    /// Queue space could not be allocated. The message was not admitted
    /// and no accounting changed.
    #[error("out of memory while queueing message")]
    OutOfMemory,
    /// The message can never fit a transport frame, no matter how empty.
    /// Permanent: retrying will not help.
    #[error("message of {size} framed bytes exceeds the {max} byte frame cap")]
    MessageTooLarge {
        /// Framed size of the rejected message in bytes.
        size: usize,
        /// Frame payload cap in bytes.
        max: usize,
    },
    /// A message could not be serialized or sealed into a frame.
    #[error("message framing failed: {0}")]
    FramingError(#[from] FramingErrorKind),
    /// A wire field could not be decoded.
    #[error("could not decode {0}")]
    DecodingError(#[from] DecodingErrorKind),
}

/// Failures while sealing or opening a transport frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FramingErrorKind {
    /// The payload is longer than the frame's 16-bit length field allows.
    #[error("payload length exceeds the wire length field")]
    PayloadTooLarge,
    /// Authenticated encryption failed.
    #[error("frame could not be sealed")]
    SealFailed,
    /// Authentication failed on open: wrong key, or a tampered frame.
    #[error("frame could not be opened")]
    OpenFailed,
    /// The frame ended before all declared bytes were present.
    #[error("frame truncated")]
    UnexpectedEnd,
}

/// Wire fields that can fail to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodingErrorKind {
    /// The message type tag was not a known value.
    #[error("message type")]
    MessageType,
}
