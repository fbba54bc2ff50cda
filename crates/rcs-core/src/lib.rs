//! # rcs-core
//!
//! Shared library for the `rcs` remote-control input client containing the
//! logical key model, the key → wire-byte translation table, and the 2-byte
//! input packet format.
//!
//! It has zero dependencies on OS APIs, window systems, or network sockets,
//! so a receiver written in Rust can reuse the same table and decoder.
//!
//! # Architecture overview (for beginners)
//!
//! The client opens a small window, listens for keyboard events, and for each
//! key press or release of an interesting key it sends two bytes to a remote
//! server:
//!
//! ```text
//! [pressed: 0|1][key code: u8]
//! ```
//!
//! This crate defines:
//!
//! - **`keymap`** – the [`LogicalKey`] type the window layer produces, and the
//!   fixed table that turns a key into its one-byte wire code.  Keys outside
//!   the table map to `0`, which means "do not send".
//!
//! - **`protocol`** – the [`InputPacket`] value type, its exact 2-byte
//!   encoding, and a [`PacketDecoder`] that splits a TCP byte stream back into
//!   packets.

pub mod keymap;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `rcs_core::InputPacket` instead of `rcs_core::protocol::packet::InputPacket`.
pub use keymap::key::{KeyState, LogicalKey, Side};
pub use keymap::{map_key, KeyMapper, NO_OP_KEY_CODE};
pub use protocol::codec::{decode_packets, PacketDecoder};
pub use protocol::packet::{InputPacket, ProtocolError, DEFAULT_SERVER_PORT, PACKET_SIZE};
