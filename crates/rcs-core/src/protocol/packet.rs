//! The 2-byte input packet.
//!
//! Wire format:
//! ```text
//! [pressed:1][key:1]
//! ```
//! `pressed` is `1` for key-down and `0` for key-up; `key` is the wire code
//! from [`crate::keymap::map_key`].  There is no header, no length prefix, and
//! no sequence number.  Over UDP each packet is one datagram; over TCP packets
//! are written back-to-back and the receiver reads fixed 2-byte units (see
//! [`crate::protocol::codec::PacketDecoder`]).

use thiserror::Error;

use crate::keymap::key::{KeyState, LogicalKey};
use crate::keymap::{map_key, NO_OP_KEY_CODE};

/// Exact encoded size of an [`InputPacket`] in bytes.
pub const PACKET_SIZE: usize = 2;

/// Remote port the server listens on (TCP and UDP).
pub const DEFAULT_SERVER_PORT: u16 = 666;

/// Errors that can occur while decoding packets.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// The byte slice is shorter than one packet.
    #[error("insufficient data: need {needed} bytes, got {available}")]
    InsufficientData { needed: usize, available: usize },

    /// The first byte is neither `0` (released) nor `1` (pressed).
    #[error("invalid pressed flag: 0x{0:02X}")]
    InvalidPressedFlag(u8),

    /// The key byte is the no-op code, which a sender never transmits.
    #[error("packet carries the no-op key code")]
    NoOpKeyCode,
}

/// One key transition: a press flag plus a one-byte key code.
///
/// Constructed per event, encoded, and dropped.
///
/// # Examples
///
/// ```rust
/// use rcs_core::{InputPacket, KeyState, LogicalKey};
///
/// let packet = InputPacket::from_key(LogicalKey::ArrowUp, KeyState::Pressed).unwrap();
/// assert_eq!(packet.to_bytes(), [1, b'i']);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputPacket {
    /// `true` for key-down, `false` for key-up.
    pub pressed: bool,
    /// Wire key code; never [`NO_OP_KEY_CODE`] for a packet built from a key.
    pub key: u8,
}

impl InputPacket {
    /// Creates a packet from raw parts.
    pub fn new(pressed: bool, key: u8) -> Self {
        Self { pressed, key }
    }

    /// Maps `key` and builds the packet for the given transition.
    ///
    /// Returns `None` when the key maps to [`NO_OP_KEY_CODE`]; such keys
    /// produce no packet at all.
    pub fn from_key(key: LogicalKey, state: KeyState) -> Option<Self> {
        match map_key(key) {
            NO_OP_KEY_CODE => None,
            code => Some(Self::new(state.is_pressed(), code)),
        }
    }

    /// Returns the transition this packet describes.
    pub fn state(&self) -> KeyState {
        KeyState::from(self.pressed)
    }

    /// Encodes the packet as `[pressed, key]`.
    pub fn to_bytes(&self) -> [u8; PACKET_SIZE] {
        [u8::from(self.pressed), self.key]
    }

    /// Decodes one packet from the start of `bytes`.
    ///
    /// Bytes beyond the first [`PACKET_SIZE`] are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError`] if fewer than two bytes are available, the
    /// flag byte is not 0/1, or the key byte is the no-op code.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtocolError> {
        let [flag, key] = match bytes {
            [flag, key, ..] => [*flag, *key],
            _ => {
                return Err(ProtocolError::InsufficientData {
                    needed: PACKET_SIZE,
                    available: bytes.len(),
                })
            }
        };

        let pressed = match flag {
            0 => false,
            1 => true,
            other => return Err(ProtocolError::InvalidPressedFlag(other)),
        };

        if key == NO_OP_KEY_CODE {
            return Err(ProtocolError::NoOpKeyCode);
        }

        Ok(Self::new(pressed, key))
    }
}

impl From<InputPacket> for [u8; PACKET_SIZE] {
    fn from(packet: InputPacket) -> Self {
        packet.to_bytes()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
