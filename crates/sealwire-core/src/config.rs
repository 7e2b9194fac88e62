use std::default::Default;

use crate::constants::{
    DEFAULT_DEFAULT_RATE_LIMIT, DEFAULT_EXTENDER_RATE_LIMIT, DEFAULT_NOISE_RATE_LIMIT,
    DEFAULT_RELAY_RATE_LIMIT, MAX_FRAME_DATA_SIZE,
};

#[derive(Clone, Debug)]
/// Configuration options to tune per-peer send behavior.
///
/// The rate limits are admission budgets: each one caps the total bytes of
/// a traffic class that may sit in a peer's send queues at once. A producer
/// whose class is at its cap gets backpressure until frames drain.
pub struct Config {
    /// Max payload bytes packed into one transport frame.
    /// Messages whose framed size exceeds this are rejected at enqueue.
    pub max_frame_data_size: usize,
    /// Max queued bytes of extender communication (default: 1 MiB).
    pub extender_rate_limit: usize,
    /// Max queued bytes of relayed data (default: 1 MiB).
    pub relay_rate_limit: usize,
    /// Max queued bytes of noise/filler messages (default: 64 KiB).
    pub noise_rate_limit: usize,
    /// Max queued bytes of any other message type (default: 256 KiB).
    pub default_rate_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_frame_data_size: MAX_FRAME_DATA_SIZE,
            extender_rate_limit: DEFAULT_EXTENDER_RATE_LIMIT,
            relay_rate_limit: DEFAULT_RELAY_RATE_LIMIT,
            noise_rate_limit: DEFAULT_NOISE_RATE_LIMIT,
            default_rate_limit: DEFAULT_DEFAULT_RATE_LIMIT,
        }
    }
}
