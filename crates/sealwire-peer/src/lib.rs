#![warn(missing_docs)]

//! sealwire-peer: per-peer send scheduling.
//!
//! One [`SendScheduler`] instance manages the outbound side of one peer
//! connection: it admits messages against per-class byte budgets, keeps
//! them in three priority queues, and packs them into sealed transport
//! frames when the peer's socket is writable.

/// Per-class byte budgets for admission control.
pub mod rate_limits;
/// Priority queues and transport frame packing.
pub mod send_queue;
/// Monotonic time sources.
pub mod time;

pub use rate_limits::{MessageRateLimits, RateLimitClass};
pub use send_queue::{DelayedMessage, Priority, SendScheduler};
pub use time::{Clock, ManualClock, SystemClock};
