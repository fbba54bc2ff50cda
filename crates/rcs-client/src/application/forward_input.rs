//! ForwardInputUseCase: turns key transitions into packets and sends them.
//!
//! This use case sits at the application layer and delegates the actual write
//! to a [`PacketSink`] implementation.  The TCP/UDP transport lives in the
//! infrastructure layer.
//!
//! # Fire-and-forget
//!
//! A failed send is not retried and is not reported to the caller: the packet
//! is counted as dropped, logged at `debug` level, and the next key event is
//! processed normally.  The remote side sees a missing transition; the local
//! window keeps running.

use rcs_core::{InputPacket, KeyState, LogicalKey};
use thiserror::Error;
use tracing::debug;

/// Error returned by a [`PacketSink`] when a packet could not be written.
#[derive(Debug, Error)]
pub enum SendError {
    /// The underlying socket write failed.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A datagram went out with fewer bytes than the packet holds.
    #[error("short write: sent {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },
}

/// Destination for encoded input packets.
///
/// Implemented by the network transport; tests use a mock.
#[cfg_attr(test, mockall::automock)]
pub trait PacketSink {
    /// Writes one packet.
    fn send_packet(&mut self, packet: InputPacket) -> Result<(), SendError>;
}

/// What happened to one key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardOutcome {
    /// The packet was handed to the sink successfully.
    Sent(InputPacket),
    /// The key has no wire code; the sink was not called.
    Unmapped,
    /// An auto-repeat key-down was skipped because repeats are disabled.
    RepeatSuppressed,
    /// The sink failed; the error was discarded.
    Dropped(InputPacket),
}

/// Running counters, logged when the client shuts down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForwardStats {
    pub sent: u64,
    pub unmapped: u64,
    pub repeats_suppressed: u64,
    pub dropped: u64,
}

/// The Forward Input use case.
pub struct ForwardInputUseCase<S: PacketSink> {
    sink: S,
    forward_repeats: bool,
    stats: ForwardStats,
}

impl<S: PacketSink> ForwardInputUseCase<S> {
    /// Creates a use case writing to `sink`.  Auto-repeat key-downs are forwarded.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            forward_repeats: true,
            stats: ForwardStats::default(),
        }
    }

    /// Enables or disables forwarding of auto-repeat key-downs.
    pub fn with_forward_repeats(mut self, forward_repeats: bool) -> Self {
        self.forward_repeats = forward_repeats;
        self
    }

    /// Handles one key transition reported by the window.
    ///
    /// Never fails: unmapped keys are skipped and send errors are swallowed.
    pub fn handle_key(&mut self, key: LogicalKey, state: KeyState, repeat: bool) -> ForwardOutcome {
        let Some(packet) = InputPacket::from_key(key, state) else {
            self.stats.unmapped += 1;
            return ForwardOutcome::Unmapped;
        };

        if repeat && !self.forward_repeats {
            self.stats.repeats_suppressed += 1;
            return ForwardOutcome::RepeatSuppressed;
        }

        match self.sink.send_packet(packet) {
            Ok(()) => {
                self.stats.sent += 1;
                debug!(pressed = packet.pressed, key = packet.key, "packet sent");
                ForwardOutcome::Sent(packet)
            }
            Err(e) => {
                self.stats.dropped += 1;
                debug!(pressed = packet.pressed, key = packet.key, "packet dropped: {e}");
                ForwardOutcome::Dropped(packet)
            }
        }
    }

    /// Returns a snapshot of the counters.
    pub fn stats(&self) -> ForwardStats {
        self.stats
    }

    /// Returns the underlying sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use mockall::Sequence;
    use rcs_core::Side;

    fn reset_error() -> SendError {
        SendError::Io(std::io::Error::from(std::io::ErrorKind::ConnectionReset))
    }

    #[test]
    fn test_key_down_sends_pressed_packet() {
        // Arrange
        let mut sink = MockPacketSink::new();
        sink.expect_send_packet()
            .with(eq(InputPacket::new(true, b'w')))
            .times(1)
            .returning(|_| Ok(()));
        let mut uc = ForwardInputUseCase::new(sink);

        // Act
        let outcome = uc.handle_key(LogicalKey::Character('w'), KeyState::Pressed, false);

        // Assert
        assert_eq!(outcome, ForwardOutcome::Sent(InputPacket::new(true, b'w')));
        assert_eq!(uc.stats().sent, 1);
    }

    #[test]
    fn test_key_up_sends_released_packet_with_same_code() {
        let mut sink = MockPacketSink::new();
        let mut seq = Sequence::new();
        sink.expect_send_packet()
            .with(eq(InputPacket::new(true, 17)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        sink.expect_send_packet()
            .with(eq(InputPacket::new(false, 17)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        let mut uc = ForwardInputUseCase::new(sink);

        uc.handle_key(LogicalKey::Control(Side::Left), KeyState::Pressed, false);
        uc.handle_key(LogicalKey::Control(Side::Right), KeyState::Released, false);

        assert_eq!(uc.stats().sent, 2);
    }

    #[test]
    fn test_unmapped_key_never_reaches_sink() {
        // Arrange
        let mut sink = MockPacketSink::new();
        sink.expect_send_packet().never();
        let mut uc = ForwardInputUseCase::new(sink);

        // Act
        let down = uc.handle_key(LogicalKey::Tab, KeyState::Pressed, false);
        let up = uc.handle_key(LogicalKey::Character('q'), KeyState::Released, false);

        // Assert
        assert_eq!(down, ForwardOutcome::Unmapped);
        assert_eq!(up, ForwardOutcome::Unmapped);
        assert_eq!(uc.stats().unmapped, 2);
    }

    #[test]
    fn test_send_failure_is_swallowed_and_counted() {
        // Arrange
        let mut sink = MockPacketSink::new();
        sink.expect_send_packet().times(1).returning(|_| Err(reset_error()));
        let mut uc = ForwardInputUseCase::new(sink);

        // Act
        let outcome = uc.handle_key(LogicalKey::Escape, KeyState::Pressed, false);

        // Assert
        assert_eq!(outcome, ForwardOutcome::Dropped(InputPacket::new(true, 27)));
        assert_eq!(uc.stats().dropped, 1);
        assert_eq!(uc.stats().sent, 0);
    }

    #[test]
    fn test_events_after_failure_are_still_forwarded() {
        // Arrange – first write fails, the following ones succeed
        let mut sink = MockPacketSink::new();
        let mut seq = Sequence::new();
        sink.expect_send_packet()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(reset_error()));
        sink.expect_send_packet()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        let mut uc = ForwardInputUseCase::new(sink);

        // Act
        uc.handle_key(LogicalKey::ArrowUp, KeyState::Pressed, false);
        let second = uc.handle_key(LogicalKey::ArrowUp, KeyState::Released, false);
        let third = uc.handle_key(LogicalKey::Space, KeyState::Pressed, false);

        // Assert
        assert_eq!(second, ForwardOutcome::Sent(InputPacket::new(false, b'i')));
        assert_eq!(third, ForwardOutcome::Sent(InputPacket::new(true, b' ')));
        assert_eq!(
            uc.stats(),
            ForwardStats {
                sent: 2,
                unmapped: 0,
                repeats_suppressed: 0,
                dropped: 1,
            }
        );
    }

    #[test]
    fn test_repeats_are_forwarded_by_default() {
        let mut sink = MockPacketSink::new();
        sink.expect_send_packet().times(3).returning(|_| Ok(()));
        let mut uc = ForwardInputUseCase::new(sink);

        for repeat in [false, true, true] {
            uc.handle_key(LogicalKey::Character('d'), KeyState::Pressed, repeat);
        }

        assert_eq!(uc.stats().sent, 3);
    }

    #[test]
    fn test_repeats_suppressed_when_disabled() {
        let mut sink = MockPacketSink::new();
        sink.expect_send_packet().times(1).returning(|_| Ok(()));
        let mut uc = ForwardInputUseCase::new(sink).with_forward_repeats(false);

        uc.handle_key(LogicalKey::Character('d'), KeyState::Pressed, false);
        let repeated = uc.handle_key(LogicalKey::Character('d'), KeyState::Pressed, true);

        assert_eq!(repeated, ForwardOutcome::RepeatSuppressed);
        assert_eq!(uc.stats().repeats_suppressed, 1);
    }

    #[test]
    fn test_send_error_messages() {
        let short = SendError::ShortWrite { written: 1, expected: 2 };
        assert_eq!(short.to_string(), "short write: sent 1 of 2 bytes");
    }
}
