//! Message types and payloads for the send pipeline.
//!
//! A [`Message`] is an opaque payload tagged with a [`MessageType`]. The
//! type decides which rate-limit class the message is accounted against
//! and rides in the frame header so the receiving peer can route it.

use std::convert::TryFrom;

use sealwire_core::error::{DecodingErrorKind, ErrorKind, FramingErrorKind};

use crate::{
    framing::{MessageFramer, FRAME_OVERHEAD},
    key::SymmetricKey,
};

/// Helper trait to convert enums to u8 values for wire format.
pub trait EnumConverter {
    /// The enum type this converter works with.
    type Enum;

    /// Converts the enum to a u8 for serialization.
    fn to_u8(&self) -> u8;
}

/// Kind of traffic a message carries.
///
/// The type is applied at enqueue to pick the message's rate-limit class
/// and again at release, so both sides of the accounting always agree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MessageType {
    /// Application data exchanged between extenders.
    ExtenderCommunication = 0,
    /// Noise (filler) traffic that masks communication patterns.
    Noise = 1,
    /// Data relayed on behalf of another peer.
    RelayData = 2,
    /// Any other traffic: handshakes, keepalives, control messages.
    Default = 3,
}

impl EnumConverter for MessageType {
    type Enum = MessageType;

    fn to_u8(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for MessageType {
    type Error = ErrorKind;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MessageType::ExtenderCommunication),
            1 => Ok(MessageType::Noise),
            2 => Ok(MessageType::RelayData),
            3 => Ok(MessageType::Default),
            _ => Err(ErrorKind::DecodingError(DecodingErrorKind::MessageType)),
        }
    }
}

/// An outbound message: an opaque payload tagged with its traffic type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    message_type: MessageType,
    data: Vec<u8>,
}

impl Message {
    /// Creates a message of the given type.
    pub fn new(message_type: MessageType, data: Vec<u8>) -> Message {
        Message { message_type, data }
    }

    /// Creates an extender communication message (application data).
    pub fn extender_communication(data: Vec<u8>) -> Message {
        Message::new(MessageType::ExtenderCommunication, data)
    }

    /// Creates a noise message (filler traffic).
    pub fn noise(data: Vec<u8>) -> Message {
        Message::new(MessageType::Noise, data)
    }

    /// Creates a relay data message (traffic forwarded for another peer).
    pub fn relay_data(data: Vec<u8>) -> Message {
        Message::new(MessageType::RelayData, data)
    }

    /// Returns the traffic type of this message.
    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    /// Returns a slice of the message payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the serialized payload size in bytes. This is the cost the
    /// message contributes to its rate-limit class while queued.
    pub fn data_size(&self) -> usize {
        self.data.len()
    }

    /// Returns the exact size of this message once framed: payload plus
    /// the fixed header and authentication tag overhead.
    pub fn framed_size(&self) -> usize {
        FRAME_OVERHEAD + self.data.len()
    }

    /// Seals this message into a transport frame appended to `buffer`.
    /// On failure nothing is appended and the message is unchanged.
    pub fn write(&self, buffer: &mut Vec<u8>, key: &SymmetricKey) -> Result<(), FramingErrorKind> {
        MessageFramer::frame_into(buffer, self, key)
    }

    /// Consumes the message and returns the payload.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_type_roundtrip() {
        for mt in [
            MessageType::ExtenderCommunication,
            MessageType::Noise,
            MessageType::RelayData,
            MessageType::Default,
        ] {
            assert_eq!(MessageType::try_from(mt.to_u8()).unwrap(), mt);
        }
    }

    #[test]
    fn test_unknown_message_type_tag() {
        assert_eq!(
            MessageType::try_from(9),
            Err(ErrorKind::DecodingError(DecodingErrorKind::MessageType))
        );
    }

    #[test]
    fn test_constructors_tag_the_type() {
        assert_eq!(
            Message::extender_communication(vec![1]).message_type(),
            MessageType::ExtenderCommunication
        );
        assert_eq!(Message::noise(vec![1]).message_type(), MessageType::Noise);
        assert_eq!(Message::relay_data(vec![1]).message_type(), MessageType::RelayData);
        assert_eq!(
            Message::new(MessageType::Default, vec![1]).message_type(),
            MessageType::Default
        );
    }

    #[test]
    fn test_sizes() {
        let msg = Message::noise(vec![0; 100]);
        assert_eq!(msg.data_size(), 100);
        assert_eq!(msg.framed_size(), 100 + FRAME_OVERHEAD);
    }
}
