#![warn(missing_docs)]

//! sealwire-protocol: message types, symmetric keys, and transport framing.
//!
//! This crate owns the bytes that cross the wire. A [`Message`] carries an
//! opaque payload tagged with a [`MessageType`]; the [`MessageFramer`]
//! turns one message into one sealed transport frame under a
//! [`SymmetricKey`], and back again on the receiving peer.

/// Transport frame sealing and opening.
pub mod framing;
/// Symmetric key material for frame sealing.
pub mod key;
/// Message types and payloads.
pub mod message;

pub use framing::{MessageFramer, FRAME_HEADER_SIZE, FRAME_OVERHEAD};
pub use key::{SymmetricKey, KEY_SIZE, NONCE_SIZE, TAG_SIZE};
pub use message::{EnumConverter, Message, MessageType};
