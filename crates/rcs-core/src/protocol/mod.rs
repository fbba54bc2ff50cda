//! Protocol module containing the input packet type and the stream decoder.

pub mod codec;
pub mod packet;

pub use codec::{decode_packets, PacketDecoder};
pub use packet::{InputPacket, ProtocolError, DEFAULT_SERVER_PORT, PACKET_SIZE};
