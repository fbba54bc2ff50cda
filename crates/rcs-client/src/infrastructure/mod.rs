//! Infrastructure layer for the client application.
//!
//! Contains OS-facing adapters.
//!
//! **Dependency rule**: this layer may depend on `application` and `rcs_core`,
//! but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`network`** – TCP/UDP transport that implements `PacketSink`.
//! - **`window`** – The input window: translates window-system key events into
//!   `LogicalKey`s and drives the forwarding use case.
//! - **`storage`** – TOML configuration file loading.

pub mod network;
pub mod storage;
pub mod window;
