//! Stream reassembly for packets received over TCP.
//!
//! TCP is a byte stream: the sender writes two bytes per key transition, but
//! the receiver may see several packets coalesced into one read, or one packet
//! split across two reads.  Because every packet is exactly
//! [`PACKET_SIZE`] bytes, no length prefix is needed to recover the
//! boundaries; the decoder just has to keep the odd byte around until its
//! partner arrives.
//!
//! ```text
//! read #1: [1 'w' 1]      -> yields (pressed, 'w'), keeps [1]
//! read #2: ['a' 0 'w']    -> yields (pressed, 'a'), (released, 'w')
//! ```
//!
//! UDP receivers do not need this: every datagram is one packet and can be
//! decoded directly with [`InputPacket::from_bytes`].

use std::collections::VecDeque;

use crate::protocol::packet::{InputPacket, ProtocolError, PACKET_SIZE};

/// Accumulates stream bytes and yields whole [`InputPacket`]s.
#[derive(Debug, Default)]
pub struct PacketDecoder {
    buffer: VecDeque<u8>,
}

impl PacketDecoder {
    /// Creates an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends freshly read bytes to the internal buffer.
    pub fn push(&mut self, bytes: &[u8]) {
        self.buffer.extend(bytes);
    }

    /// Removes and decodes the next complete packet.
    ///
    /// Returns `None` while fewer than [`PACKET_SIZE`] bytes are buffered.  A
    /// malformed packet is still consumed, so one bad pair does not wedge the
    /// stream.
    pub fn next_packet(&mut self) -> Option<Result<InputPacket, ProtocolError>> {
        if self.buffer.len() < PACKET_SIZE {
            return None;
        }
        let pair: Vec<u8> = self.buffer.drain(..PACKET_SIZE).collect();
        Some(InputPacket::from_bytes(&pair))
    }

    /// Number of buffered bytes that do not yet form a whole packet.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

impl Iterator for PacketDecoder {
    type Item = Result<InputPacket, ProtocolError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_packet()
    }
}

/// Decodes a buffer holding a whole number of packets.
///
/// # Errors
///
/// Returns the first [`ProtocolError`] encountered, or
/// [`ProtocolError::InsufficientData`] if the buffer ends in a partial packet.
///
/// # Examples
///
/// ```rust
/// use rcs_core::{decode_packets, InputPacket};
///
/// let packets = decode_packets(&[1, b'w', 0, b'w']).unwrap();
/// assert_eq!(packets, vec![InputPacket::new(true, b'w'), InputPacket::new(false, b'w')]);
/// ```
pub fn decode_packets(bytes: &[u8]) -> Result<Vec<InputPacket>, ProtocolError> {
    bytes
        .chunks(PACKET_SIZE)
        .map(InputPacket::from_bytes)
        .collect()
}
