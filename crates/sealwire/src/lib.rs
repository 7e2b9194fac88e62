#![warn(missing_docs)]

//! Sealwire: a small public API facade for the workspace.
//!
//! This crate provides a clean, stable surface that re-exports the most
//! commonly used types of the per-peer secure send pipeline:
//!
//! - Scheduling (`SendScheduler`, `Priority`)
//! - Messages and framing (`Message`, `MessageType`, `MessageFramer`)
//! - Key material (`SymmetricKey`)
//! - Core configuration (`Config`)
//!
//! Example
//! ```
//! use sealwire::{Config, Message, Priority, SendScheduler, SymmetricKey};
//!
//! let mut scheduler = SendScheduler::new(&Config::default());
//! let key = SymmetricKey::generate();
//!
//! // Producers hand messages to the scheduler...
//! scheduler.enqueue(Message::extender_communication(b"hello".to_vec()), Priority::Normal)?;
//!
//! // ...and when the peer's socket is writable, queued messages are
//! // packed into a sealed transport frame.
//! let mut frame = Vec::new();
//! let packed = scheduler.pack_frame(&mut frame, &key, true)?;
//! assert_eq!(packed, 1);
//! # Ok::<(), sealwire::ErrorKind>(())
//! ```

// Core config and errors
pub use sealwire_core::config::Config;
pub use sealwire_core::constants;
pub use sealwire_core::error::{DecodingErrorKind, ErrorKind, FramingErrorKind};
// Peer: scheduling and rate limiting
pub use sealwire_peer::{
    Clock, DelayedMessage, ManualClock, MessageRateLimits, Priority, RateLimitClass,
    SendScheduler, SystemClock,
};
// Protocol: messages, framing, keys
pub use sealwire_protocol::{
    Message, MessageFramer, MessageType, SymmetricKey, FRAME_OVERHEAD,
};

/// Convenience prelude with the most commonly used items.
pub mod prelude {
    pub use crate::{
        Config, ErrorKind, Message, MessageFramer, MessageType, Priority, RateLimitClass,
        SendScheduler, SymmetricKey,
    };
}
