//! rcs-client library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does rcs-client do? (for beginners)
//!
//! The client is a small window that acts as a remote keyboard.  While it has
//! focus, every press or release of a movement or action key is sent to a
//! server as two bytes: a press flag and a key code.
//!
//! The client application:
//!
//! 1. Parses `rcs <udp|tcp> <server_ip>` and loads optional TOML settings.
//! 2. Opens the transport: a TCP stream or a connected UDP socket to port 666.
//! 3. Opens the input window and waits for keyboard events.
//! 4. Maps each key to its wire byte and, if it is mapped, writes the packet.
//! 5. Exits when the window is closed.

/// Application layer: the key forwarding use case.
pub mod application;

/// Infrastructure layer: transport, input window, and configuration storage.
pub mod infrastructure;
