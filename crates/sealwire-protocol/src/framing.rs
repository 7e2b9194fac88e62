//! Transport frame sealing and opening.
//!
//! One message becomes one frame:
//!
//! ```text
//! [type: u8][nonce: 12 bytes][payload_len: u16 BE][ciphertext: payload_len + 16]
//! ```
//!
//! The header (type, nonce, length) is fed to the AEAD as associated
//! data, so tampering with any header field fails authentication when the
//! receiving peer opens the frame. The authentication tag is appended to
//! the ciphertext.

use std::{
    convert::TryFrom,
    io::{Cursor, Read},
};

use byteorder::{BigEndian, ReadBytesExt};
use sealwire_core::error::{ErrorKind, FramingErrorKind};

use crate::{
    key::{SymmetricKey, NONCE_SIZE, TAG_SIZE},
    message::{EnumConverter, Message, MessageType},
};

/// Frame header size: type tag, nonce, payload length.
pub const FRAME_HEADER_SIZE: usize = 1 + NONCE_SIZE + 2;

/// Fixed per-frame overhead: header plus authentication tag.
pub const FRAME_OVERHEAD: usize = FRAME_HEADER_SIZE + TAG_SIZE;

/// Seals messages into transport frames and opens them back up.
pub struct MessageFramer;

impl MessageFramer {
    /// Seals `message` into a frame appended to `buffer`.
    ///
    /// Nothing is appended unless the whole frame could be produced, so a
    /// failed call leaves `buffer` exactly as it was.
    pub fn frame_into(
        buffer: &mut Vec<u8>,
        message: &Message,
        key: &SymmetricKey,
    ) -> Result<(), FramingErrorKind> {
        let payload = message.data();
        if payload.len() > u16::MAX as usize {
            return Err(FramingErrorKind::PayloadTooLarge);
        }

        let nonce: [u8; NONCE_SIZE] = rand::random();

        let mut header = [0u8; FRAME_HEADER_SIZE];
        header[0] = message.message_type().to_u8();
        header[1..1 + NONCE_SIZE].copy_from_slice(&nonce);
        header[1 + NONCE_SIZE..].copy_from_slice(&(payload.len() as u16).to_be_bytes());

        let ciphertext = key.seal(&nonce, payload, &header)?;

        buffer.extend_from_slice(&header);
        buffer.extend_from_slice(&ciphertext);
        Ok(())
    }

    /// Opens one frame from the start of `bytes`.
    ///
    /// Returns the recovered message and the number of bytes the frame
    /// occupied, so a caller can walk a buffer holding several
    /// concatenated frames.
    pub fn read_from(bytes: &[u8], key: &SymmetricKey) -> Result<(Message, usize), ErrorKind> {
        let mut cursor = Cursor::new(bytes);

        let tag = cursor.read_u8().map_err(|_| FramingErrorKind::UnexpectedEnd)?;
        let message_type = MessageType::try_from(tag)?;

        let mut nonce = [0u8; NONCE_SIZE];
        cursor.read_exact(&mut nonce).map_err(|_| FramingErrorKind::UnexpectedEnd)?;

        let payload_len =
            cursor.read_u16::<BigEndian>().map_err(|_| FramingErrorKind::UnexpectedEnd)? as usize;

        let frame_len = FRAME_HEADER_SIZE + payload_len + TAG_SIZE;
        if bytes.len() < frame_len {
            return Err(FramingErrorKind::UnexpectedEnd.into());
        }

        let header = &bytes[..FRAME_HEADER_SIZE];
        let ciphertext = &bytes[FRAME_HEADER_SIZE..frame_len];
        let payload = key.open(&nonce, ciphertext, header)?;

        Ok((Message::new(message_type, payload), frame_len))
    }
}
