//! Priority queues and transport frame packing for one peer.
//!
//! The scheduler owns three FIFO queues. Expedited messages jump the
//! others and always travel alone in their frame; normal messages are
//! batched while a frame has room; delayed messages (noise and other
//! filler) are only packed once their delay has elapsed and real traffic
//! has left space. Admission against per-class byte budgets happens at
//! enqueue, so producers feel backpressure before memory fills up.
//!
//! One scheduler instance belongs to one peer's send context. The caller
//! serializes `enqueue` and `pack_frame`; nothing here blocks or locks.

use std::{
    collections::VecDeque,
    sync::Arc,
    time::{Duration, Instant},
};

use sealwire_core::{config::Config, error::ErrorKind};
use sealwire_protocol::{Message, SymmetricKey};

use crate::{
    rate_limits::{MessageRateLimits, RateLimitClass},
    time::{Clock, SystemClock},
};

/// Queue a message is placed on at enqueue time. Fixed once enqueued.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Priority {
    /// Sent in FIFO order, batched into frames when the caller allows.
    Normal,
    /// Goes before everything else, one message per frame. Batching is
    /// never applied to expedited traffic: it exists to minimize latency,
    /// and waiting to fill a frame would defeat that.
    Expedited,
    /// Held until the delay elapses, then sent when frames have room left
    /// after normal traffic.
    Delayed(Duration),
}

/// A message held back until its earliest send time.
#[derive(Debug)]
pub struct DelayedMessage {
    message: Message,
    queued_at: Instant,
    delay: Duration,
}

impl DelayedMessage {
    /// Wraps `message`, to be held for `delay` from `queued_at`.
    pub fn new(message: Message, queued_at: Instant, delay: Duration) -> Self {
        Self { message, queued_at, delay }
    }

    /// Earliest instant this message may be sent.
    pub fn ready_at(&self) -> Instant {
        self.queued_at + self.delay
    }

    /// Returns true once `now` has reached the earliest send time.
    pub fn is_ready(&self, now: Instant) -> bool {
        now >= self.ready_at()
    }

    /// Returns the wrapped message.
    pub fn message(&self) -> &Message {
        &self.message
    }
}

/// Per-peer outbound scheduler: admission, priority queues, and packing
/// of queued messages into sealed transport frames.
pub struct SendScheduler {
    expedited_queue: VecDeque<Message>,
    normal_queue: VecDeque<Message>,
    delayed_queue: VecDeque<DelayedMessage>,
    rate_limits: MessageRateLimits,
    max_frame_data_size: usize,
    clock: Arc<dyn Clock>,
}

impl SendScheduler {
    /// Creates an empty scheduler on the system clock.
    pub fn new(config: &Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates an empty scheduler with an injected time source.
    pub fn with_clock(config: &Config, clock: Arc<dyn Clock>) -> Self {
        Self {
            expedited_queue: VecDeque::new(),
            normal_queue: VecDeque::new(),
            delayed_queue: VecDeque::new(),
            rate_limits: MessageRateLimits::new(config),
            max_frame_data_size: config.max_frame_data_size,
            clock,
        }
    }

    /// Admits `message` onto the queue selected by `priority`.
    ///
    /// Admission checks the frame cap and the message's class budget
    /// before anything changes; a rejected or failed enqueue leaves the
    /// scheduler exactly as it was and the message is returned to the
    /// caller only in the sense that it never entered a queue.
    pub fn enqueue(&mut self, message: Message, priority: Priority) -> Result<(), ErrorKind> {
        let class = RateLimitClass::of(message.message_type());
        let size = message.data_size();

        // A message that cannot fit an empty frame would sit at its queue
        // head forever; reject it while the caller can still react.
        if message.framed_size() > self.max_frame_data_size {
            return Err(ErrorKind::MessageTooLarge {
                size: message.framed_size(),
                max: self.max_frame_data_size,
            });
        }

        if !self.rate_limits.can_add(class, size) {
            return Err(ErrorKind::SendBufferFull);
        }

        // Budget is accounted only after the push has succeeded, so an
        // allocation failure here needs no rollback.
        match priority {
            Priority::Normal => {
                self.normal_queue.try_reserve(1).map_err(|_| ErrorKind::OutOfMemory)?;
                self.normal_queue.push_back(message);
            }
            Priority::Expedited => {
                self.expedited_queue.try_reserve(1).map_err(|_| ErrorKind::OutOfMemory)?;
                self.expedited_queue.push_back(message);
            }
            Priority::Delayed(delay) => {
                self.delayed_queue.try_reserve(1).map_err(|_| ErrorKind::OutOfMemory)?;
                self.delayed_queue.push_back(DelayedMessage::new(
                    message,
                    self.clock.now(),
                    delay,
                ));
            }
        }

        self.rate_limits.add(class, size);
        Ok(())
    }

    /// Packs queued messages into transport frames appended to `buffer`,
    /// which may already hold caller framing. Returns how many messages
    /// were packed.
    ///
    /// Expedited traffic goes first and exclusively: if any is queued,
    /// exactly one expedited message is packed regardless of
    /// `concatenate`. Otherwise normal messages fill the frame while it
    /// has room, then ready delayed messages take whatever room is left,
    /// so real traffic keeps bandwidth priority over filler when the
    /// connection is busy. With `concatenate` false at most one message
    /// is packed.
    ///
    /// A message that no longer fits stays queued for the next call. A
    /// framing error aborts the call with the offending message still at
    /// the head of its queue; messages packed before the error remain
    /// packed and accounted for.
    pub fn pack_frame(
        &mut self,
        buffer: &mut Vec<u8>,
        key: &SymmetricKey,
        concatenate: bool,
    ) -> Result<usize, ErrorKind> {
        if !self.expedited_queue.is_empty() {
            return self.pack_expedited(buffer, key);
        }

        let mut num = 0;
        let mut stop = false;

        // One scratch allocation per call, reused for every message.
        let mut scratch = Vec::new();

        while let Some(message) = self.normal_queue.front() {
            scratch.clear();
            message.write(&mut scratch, key)?;

            if buffer.len() + scratch.len() > self.max_frame_data_size {
                // Frame is full; the message stays queued.
                stop = true;
                break;
            }

            buffer.extend_from_slice(&scratch);
            self.release_front(QueueKind::Normal);
            num += 1;

            if !concatenate {
                stop = true;
                break;
            }
        }

        if !stop {
            while let Some(delayed) = self.delayed_queue.front() {
                if !delayed.is_ready(self.clock.now()) {
                    // Not time yet. Later entries may be ready, but FIFO
                    // order holds: we come back to this one first.
                    break;
                }

                scratch.clear();
                delayed.message().write(&mut scratch, key)?;

                if buffer.len() + scratch.len() > self.max_frame_data_size {
                    break;
                }

                buffer.extend_from_slice(&scratch);
                self.release_front(QueueKind::Delayed);
                num += 1;

                if !concatenate {
                    break;
                }
            }
        }

        if num > 1 {
            tracing::debug!(messages = num, "packed multiple messages into one transport frame");
        }

        Ok(num)
    }

    /// Packs exactly one expedited message directly into `buffer`.
    fn pack_expedited(
        &mut self,
        buffer: &mut Vec<u8>,
        key: &SymmetricKey,
    ) -> Result<usize, ErrorKind> {
        debug_assert!(!self.expedited_queue.is_empty());

        let Some(message) = self.expedited_queue.front() else {
            return Ok(0);
        };

        message.write(buffer, key)?;
        self.release_front(QueueKind::Expedited);
        Ok(1)
    }

    /// Pops the front of the given queue and releases its bytes from the
    /// rate limits. The class mapping here is the same one used at
    /// admission, so the counters stay in lockstep with queue contents.
    fn release_front(&mut self, queue: QueueKind) {
        let sent = match queue {
            QueueKind::Expedited => self.expedited_queue.pop_front(),
            QueueKind::Normal => self.normal_queue.pop_front(),
            QueueKind::Delayed => {
                self.delayed_queue.pop_front().map(|delayed| delayed.message)
            }
        };
        if let Some(message) = sent {
            self.rate_limits
                .subtract(RateLimitClass::of(message.message_type()), message.data_size());
        }
    }

    /// Returns the bytes currently queued for `class`.
    pub fn queued_bytes(&self, class: RateLimitClass) -> usize {
        self.rate_limits.current(class)
    }

    /// Returns the total number of queued messages across all queues.
    pub fn queued_messages(&self) -> usize {
        self.expedited_queue.len() + self.normal_queue.len() + self.delayed_queue.len()
    }

    /// Returns true when no message is queued.
    pub fn is_empty(&self) -> bool {
        self.queued_messages() == 0
    }
}

/// The three queues a release can come from.
#[derive(Copy, Clone)]
enum QueueKind {
    Expedited,
    Normal,
    Delayed,
}
