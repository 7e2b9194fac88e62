#![warn(missing_docs)]

//! sealwire-core: foundational types and utilities.
//!
//! This crate provides the minimal set of core utilities shared across all
//! layers:
//! - Configuration types
//! - Error handling
//! - Protocol constants
//!
//! Protocol and peer logic live in specialized crates:
//! - `sealwire-protocol`: message types, symmetric keys, transport framing
//! - `sealwire-peer`: per-peer send scheduling and rate limiting

/// Protocol constants shared across layers.
pub mod constants {
    /// Maximum number of payload bytes a single transport frame may carry.
    ///
    /// A frame's payload length rides in a 16-bit field, so the cap leaves
    /// room for the largest expressible payload plus the frame overhead.
    pub const MAX_FRAME_DATA_SIZE: usize = 65536;

    /// Default send budget in queued bytes for extender communication.
    /// Application traffic gets the largest budget.
    pub const DEFAULT_EXTENDER_RATE_LIMIT: usize = 1024 * 1024;

    /// Default send budget in queued bytes for relayed data.
    /// Relayed traffic is application traffic for another peer, so it gets
    /// the same budget as local application traffic.
    pub const DEFAULT_RELAY_RATE_LIMIT: usize = 1024 * 1024;

    /// Default send budget in queued bytes for system messages
    /// (handshakes, keepalives and other small control traffic).
    pub const DEFAULT_DEFAULT_RATE_LIMIT: usize = 256 * 1024;

    /// Default send budget in queued bytes for noise (filler) messages.
    /// Filler must never crowd out real traffic.
    pub const DEFAULT_NOISE_RATE_LIMIT: usize = 64 * 1024;
}

/// Configuration options for the send pipeline.
pub mod config;
/// Error types shared across layers.
pub mod error;
