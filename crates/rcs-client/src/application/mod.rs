//! Application layer use cases for the client.
//!
//! - **`forward_input`** – Turns key transitions into [`rcs_core::InputPacket`]s
//!   and hands them to a [`forward_input::PacketSink`].  The real sink is the
//!   network transport; tests inject a mock.  Send failures are absorbed here
//!   so the window loop never sees them.

pub mod forward_input;
