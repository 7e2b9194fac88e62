//! Per-class byte budgets for send admission control.
//!
//! Every queued message is accounted against the budget of its rate-limit
//! class. Admission checks the budget before a message enters a queue;
//! the same number of bytes is released when the message leaves, so for
//! each class the counter always equals the bytes currently queued.
//!
//! A class at its cap rejects further messages until frames drain. This
//! is how producers receive backpressure: real traffic gets the large
//! budgets, filler gets the smallest.

use sealwire_core::config::Config;
use sealwire_protocol::MessageType;

/// Rate-limiting bucket a message is accounted against.
///
/// Derived from [`MessageType`] at a single mapping point, used both when
/// a message is admitted and when it is released.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RateLimitClass {
    /// Extender communication (application data).
    ExtenderCommunication = 0,
    /// Noise (filler) traffic.
    Noise = 1,
    /// Data relayed for another peer.
    RelayData = 2,
    /// Everything else.
    Default = 3,
}

/// Number of rate-limit classes.
const CLASS_COUNT: usize = 4;

impl RateLimitClass {
    /// Returns the class a message type is accounted against.
    pub fn of(message_type: MessageType) -> RateLimitClass {
        match message_type {
            MessageType::ExtenderCommunication => RateLimitClass::ExtenderCommunication,
            MessageType::Noise => RateLimitClass::Noise,
            MessageType::RelayData => RateLimitClass::RelayData,
            _ => RateLimitClass::Default,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Tracks queued bytes per class and enforces the per-class caps.
#[derive(Debug)]
pub struct MessageRateLimits {
    /// Bytes currently queued, per class
    current: [usize; CLASS_COUNT],
    /// Byte cap, per class
    max: [usize; CLASS_COUNT],
}

impl MessageRateLimits {
    /// Creates rate limits with the caps from `config`.
    pub fn new(config: &Config) -> Self {
        let mut max = [0; CLASS_COUNT];
        max[RateLimitClass::ExtenderCommunication.index()] = config.extender_rate_limit;
        max[RateLimitClass::Noise.index()] = config.noise_rate_limit;
        max[RateLimitClass::RelayData.index()] = config.relay_rate_limit;
        max[RateLimitClass::Default.index()] = config.default_rate_limit;
        Self { current: [0; CLASS_COUNT], max }
    }

    /// Checks whether `size` more bytes of `class` fit under its cap.
    pub fn can_add(&self, class: RateLimitClass, size: usize) -> bool {
        match self.current[class.index()].checked_add(size) {
            Some(total) => total <= self.max[class.index()],
            None => false,
        }
    }

    /// Accounts `size` queued bytes to `class`.
    ///
    /// Callers check [`can_add`](Self::can_add) first; admission and
    /// accounting are separate so a failed queue push between them never
    /// has to roll the counter back.
    pub fn add(&mut self, class: RateLimitClass, size: usize) {
        debug_assert!(self.can_add(class, size));
        self.current[class.index()] = self.current[class.index()].saturating_add(size);
    }

    /// Releases `size` queued bytes from `class`.
    pub fn subtract(&mut self, class: RateLimitClass, size: usize) {
        debug_assert!(self.current[class.index()] >= size);
        self.current[class.index()] = self.current[class.index()].saturating_sub(size);
    }

    /// Returns the bytes currently queued for `class`.
    pub fn current(&self, class: RateLimitClass) -> usize {
        self.current[class.index()]
    }

    /// Returns the byte cap for `class`.
    pub fn max(&self, class: RateLimitClass) -> usize {
        self.max[class.index()]
    }
}
