//! Integration tests for the sealwire-peer crate.
//!
//! These tests drive the scheduler through the same protocol crate the
//! receiving side would use: frames packed by the scheduler are opened
//! with `MessageFramer::read_from` to verify exactly which messages went
//! out and in what order.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use sealwire_core::{config::Config, error::ErrorKind};
use sealwire_peer::{ManualClock, Priority, RateLimitClass, SendScheduler};
use sealwire_protocol::{Message, MessageFramer, MessageType, SymmetricKey, FRAME_OVERHEAD};

fn test_key() -> SymmetricKey {
    SymmetricKey::from_bytes([0x55; 32])
}

fn test_config() -> Config {
    Config {
        max_frame_data_size: 400,
        extender_rate_limit: 1000,
        relay_rate_limit: 1000,
        noise_rate_limit: 500,
        default_rate_limit: 1000,
    }
}

/// Opens every frame in `buffer` and returns the recovered messages.
fn read_all(buffer: &[u8], key: &SymmetricKey) -> Vec<Message> {
    let mut messages = Vec::new();
    let mut offset = 0;
    while offset < buffer.len() {
        let (message, consumed) = MessageFramer::read_from(&buffer[offset..], key).unwrap();
        messages.push(message);
        offset += consumed;
    }
    messages
}

#[test]
fn test_single_message_roundtrip() {
    let key = test_key();
    let mut sched = SendScheduler::new(&test_config());

    sched.enqueue(Message::extender_communication(vec![7; 100]), Priority::Normal).unwrap();

    let mut buffer = Vec::new();
    assert_eq!(sched.pack_frame(&mut buffer, &key, true).unwrap(), 1);
    assert_eq!(buffer.len(), 100 + FRAME_OVERHEAD);
    assert_eq!(sched.queued_bytes(RateLimitClass::ExtenderCommunication), 0);

    let messages = read_all(&buffer, &key);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].message_type(), MessageType::ExtenderCommunication);
    assert_eq!(messages[0].data(), &[7; 100]);
}

#[test]
fn test_concatenation_preserves_fifo_order() {
    let key = test_key();
    let mut sched = SendScheduler::new(&test_config());

    for i in 0..3u8 {
        sched.enqueue(Message::extender_communication(vec![i; 80]), Priority::Normal).unwrap();
    }

    // Two 111-byte frames fit the 400-byte cap together with nothing
    // else queued; the third would push past it only if the cap were
    // tighter, so all three fit here: 3 * 111 = 333 <= 400.
    let mut buffer = Vec::new();
    assert_eq!(sched.pack_frame(&mut buffer, &key, true).unwrap(), 3);

    let messages = read_all(&buffer, &key);
    let payload_heads: Vec<u8> = messages.iter().map(|m| m.data()[0]).collect();
    assert_eq!(payload_heads, vec![0, 1, 2]);
}

#[test]
fn test_frame_cap_carries_overflow_to_next_call() {
    let key = test_key();
    let config = Config { max_frame_data_size: 250, ..test_config() };
    let mut sched = SendScheduler::new(&config);

    for i in 0..3u8 {
        sched.enqueue(Message::extender_communication(vec![i; 80]), Priority::Normal).unwrap();
    }

    // 2 * (80 + 31) = 222 fits, a third frame would make 333 > 250.
    let mut first = Vec::new();
    assert_eq!(sched.pack_frame(&mut first, &key, true).unwrap(), 2);
    assert_eq!(sched.queued_bytes(RateLimitClass::ExtenderCommunication), 80);

    let mut second = Vec::new();
    assert_eq!(sched.pack_frame(&mut second, &key, true).unwrap(), 1);
    assert_eq!(read_all(&second, &key)[0].data()[0], 2);
    assert!(sched.is_empty());
}

#[test]
fn test_expedited_shuts_out_other_queues() {
    let key = test_key();
    let mut sched = SendScheduler::new(&test_config());

    sched.enqueue(Message::extender_communication(vec![1; 80]), Priority::Normal).unwrap();
    sched.enqueue(Message::noise(vec![2; 40]), Priority::Delayed(Duration::ZERO)).unwrap();
    sched.enqueue(Message::extender_communication(vec![3; 50]), Priority::Expedited).unwrap();

    // While expedited traffic is queued, nothing else is emitted even
    // with concatenation allowed and room to spare.
    let mut buffer = Vec::new();
    assert_eq!(sched.pack_frame(&mut buffer, &key, true).unwrap(), 1);

    let messages = read_all(&buffer, &key);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].data(), &[3; 50]);

    // With the expedited queue drained, normal then delayed follow.
    let mut rest = Vec::new();
    assert_eq!(sched.pack_frame(&mut rest, &key, true).unwrap(), 2);
    let messages = read_all(&rest, &key);
    assert_eq!(messages[0].message_type(), MessageType::ExtenderCommunication);
    assert_eq!(messages[1].message_type(), MessageType::Noise);
}

#[test]
fn test_delayed_becomes_eligible_when_clock_passes_ready_time() {
    let key = test_key();
    let clock = Arc::new(ManualClock::new(Instant::now()));
    let mut sched = SendScheduler::with_clock(&test_config(), clock.clone());

    sched
        .enqueue(Message::noise(vec![0; 50]), Priority::Delayed(Duration::from_millis(100)))
        .unwrap();

    let mut buffer = Vec::new();
    clock.advance(Duration::from_millis(50));
    assert_eq!(sched.pack_frame(&mut buffer, &key, true).unwrap(), 0);
    assert!(buffer.is_empty());

    clock.advance(Duration::from_millis(100));
    assert_eq!(sched.pack_frame(&mut buffer, &key, true).unwrap(), 1);
    assert_eq!(read_all(&buffer, &key)[0].message_type(), MessageType::Noise);
}

#[test]
fn test_noise_budget_backpressure() {
    let key = test_key();
    let mut sched = SendScheduler::new(&test_config());

    // Fill the 500-byte noise budget exactly.
    for _ in 0..5 {
        sched.enqueue(Message::noise(vec![0; 100]), Priority::Delayed(Duration::ZERO)).unwrap();
    }
    assert_eq!(sched.queued_bytes(RateLimitClass::Noise), 500);

    // The next noise message bounces and changes nothing.
    let result = sched.enqueue(Message::noise(vec![0; 100]), Priority::Delayed(Duration::ZERO));
    assert_eq!(result, Err(ErrorKind::SendBufferFull));
    assert_eq!(sched.queued_bytes(RateLimitClass::Noise), 500);
    assert_eq!(sched.queued_messages(), 5);

    // Draining frees budget for new noise: three 131-byte frames fit
    // the 400-byte cap, the fourth does not.
    let mut buffer = Vec::new();
    assert_eq!(sched.pack_frame(&mut buffer, &key, true).unwrap(), 3);
    assert_eq!(sched.queued_bytes(RateLimitClass::Noise), 200);
    sched.enqueue(Message::noise(vec![0; 100]), Priority::Delayed(Duration::ZERO)).unwrap();
}

#[test]
fn test_counters_track_queue_contents_across_classes() {
    let key = test_key();
    let mut sched = SendScheduler::new(&test_config());

    sched.enqueue(Message::extender_communication(vec![0; 120]), Priority::Normal).unwrap();
    sched.enqueue(Message::relay_data(vec![0; 60]), Priority::Normal).unwrap();
    sched.enqueue(Message::new(MessageType::Default, vec![0; 30]), Priority::Normal).unwrap();
    sched.enqueue(Message::noise(vec![0; 90]), Priority::Delayed(Duration::ZERO)).unwrap();

    assert_eq!(sched.queued_bytes(RateLimitClass::ExtenderCommunication), 120);
    assert_eq!(sched.queued_bytes(RateLimitClass::RelayData), 60);
    assert_eq!(sched.queued_bytes(RateLimitClass::Default), 30);
    assert_eq!(sched.queued_bytes(RateLimitClass::Noise), 90);

    // Drain everything and verify each counter returned to zero.
    let mut buffer = Vec::new();
    let mut total = 0;
    loop {
        let mut frame = Vec::new();
        let packed = sched.pack_frame(&mut frame, &key, true).unwrap();
        if packed == 0 {
            break;
        }
        total += packed;
        buffer.extend_from_slice(&frame);
    }
    assert_eq!(total, 4);

    for class in [
        RateLimitClass::ExtenderCommunication,
        RateLimitClass::Noise,
        RateLimitClass::RelayData,
        RateLimitClass::Default,
    ] {
        assert_eq!(sched.queued_bytes(class), 0);
    }

    // Every payload byte that was admitted came back out of the frames.
    let drained: usize = read_all(&buffer, &key).iter().map(|m| m.data_size()).sum();
    assert_eq!(drained, 120 + 60 + 30 + 90);
}

#[test]
fn test_framing_error_is_fatal_for_the_call() {
    let key = test_key();
    let config = Config {
        max_frame_data_size: 70_000,
        extender_rate_limit: 100_000,
        ..test_config()
    };
    let mut sched = SendScheduler::new(&config);

    // Admitted by the frame cap, but the 16-bit wire length field
    // cannot carry the payload, so sealing fails at pack time.
    let oversize = u16::MAX as usize + 1;
    sched.enqueue(Message::extender_communication(vec![0; oversize]), Priority::Normal).unwrap();

    let mut buffer = Vec::new();
    let result = sched.pack_frame(&mut buffer, &key, true);
    assert!(matches!(result, Err(ErrorKind::FramingError(_))));
    assert!(buffer.is_empty());
    assert_eq!(sched.queued_messages(), 1);
    assert_eq!(sched.queued_bytes(RateLimitClass::ExtenderCommunication), oversize);
}
