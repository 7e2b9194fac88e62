//! Drives one peer's send scheduler through a few transport frames and
//! prints what the receiving side would recover from each one.
//!
//! Run with:
//! - cargo run -p sealwire --example send_loop

use sealwire::{Config, Message, MessageFramer, Priority, SendScheduler, SymmetricKey};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Small frame cap so the batching is visible in the output.
    let config = Config { max_frame_data_size: 256, ..Config::default() };
    let mut scheduler = SendScheduler::new(&config);
    let key = SymmetricKey::generate();

    // A mix of producers: application data, relayed bytes, and filler.
    scheduler.enqueue(Message::extender_communication(b"first chat line".to_vec()), Priority::Normal)?;
    scheduler.enqueue(Message::extender_communication(b"second chat line".to_vec()), Priority::Normal)?;
    scheduler.enqueue(Message::relay_data(vec![0x52; 64]), Priority::Normal)?;
    scheduler.enqueue(Message::noise(vec![0; 48]), Priority::Delayed(std::time::Duration::ZERO))?;
    scheduler.enqueue(Message::extender_communication(b"ping!".to_vec()), Priority::Expedited)?;

    let mut frame_index = 0;
    while !scheduler.is_empty() {
        let mut frame = Vec::new();
        let packed = scheduler.pack_frame(&mut frame, &key, true)?;
        if packed == 0 {
            break;
        }
        frame_index += 1;
        println!("frame {}: {} message(s), {} bytes", frame_index, packed, frame.len());

        // Open the frames the way the remote peer would.
        let mut offset = 0;
        while offset < frame.len() {
            let (message, consumed) = MessageFramer::read_from(&frame[offset..], &key)?;
            println!(
                "  {:?}: {} payload byte(s)",
                message.message_type(),
                message.data_size()
            );
            offset += consumed;
        }
    }

    Ok(())
}
