//! Integration tests for the forwarding pipeline over real loopback sockets.
//!
//! # Purpose
//!
//! These tests drive `ForwardInputUseCase` with a real `Transport` the same
//! way the input window does, and check what a server on the other end
//! actually receives:
//!
//! - TCP: the stream carries back-to-back 2-byte packets, in order.
//! - UDP: every packet arrives as its own 2-byte datagram.
//! - Unmapped keys put nothing on the wire.
//! - A dead peer does not surface errors to the caller.

use std::io::Read;
use std::net::{TcpListener, UdpSocket};
use std::time::Duration;

use rcs_client::application::forward_input::{ForwardInputUseCase, ForwardOutcome};
use rcs_client::infrastructure::network::{ConnectOptions, Transport, TransportKind};
use rcs_core::{InputPacket, KeyState, LogicalKey, PacketDecoder, Side, PACKET_SIZE};

const READ_TIMEOUT: Duration = Duration::from_secs(5);

#[test]
fn test_tcp_stream_carries_packets_in_order() {
    // Arrange
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let transport = Transport::connect(
        TransportKind::Tcp,
        "127.0.0.1",
        port,
        &ConnectOptions::default(),
    )
    .expect("connect");
    let (mut server, _) = listener.accept().expect("accept");
    server.set_read_timeout(Some(READ_TIMEOUT)).unwrap();
    let mut uc = ForwardInputUseCase::new(transport);

    // Act
    uc.handle_key(LogicalKey::Character('w'), KeyState::Pressed, false);
    uc.handle_key(LogicalKey::Tab, KeyState::Pressed, false);
    uc.handle_key(LogicalKey::Control(Side::Right), KeyState::Pressed, false);
    uc.handle_key(LogicalKey::Character('w'), KeyState::Released, false);

    // Assert – read exactly three packets' worth of bytes
    let mut received = [0u8; 3 * PACKET_SIZE];
    server.read_exact(&mut received).expect("read packets");

    let mut decoder = PacketDecoder::new();
    decoder.push(&received);
    let packets: Vec<_> = decoder.map(|p| p.expect("valid packet")).collect();
    assert_eq!(
        packets,
        vec![
            InputPacket::new(true, b'w'),
            InputPacket::new(true, 17),
            InputPacket::new(false, b'w'),
        ]
    );
    assert_eq!(uc.stats().sent, 3);
    assert_eq!(uc.stats().unmapped, 1);
}

#[test]
fn test_udp_sends_one_two_byte_datagram_per_packet() {
    // Arrange
    let server = UdpSocket::bind("127.0.0.1:0").expect("bind");
    server.set_read_timeout(Some(READ_TIMEOUT)).unwrap();
    let port = server.local_addr().unwrap().port();
    let transport = Transport::connect(
        TransportKind::Udp,
        "127.0.0.1",
        port,
        &ConnectOptions::default(),
    )
    .expect("connect");
    let mut uc = ForwardInputUseCase::new(transport);

    // Act
    uc.handle_key(LogicalKey::ArrowLeft, KeyState::Pressed, false);
    uc.handle_key(LogicalKey::ArrowLeft, KeyState::Released, false);

    // Assert
    let mut buf = [0u8; 16];
    let first = server.recv(&mut buf).expect("first datagram");
    assert_eq!(&buf[..first], &[1, b'j']);
    let second = server.recv(&mut buf).expect("second datagram");
    assert_eq!(&buf[..second], &[0, b'j']);
}

#[test]
fn test_udp_unmapped_key_sends_nothing() {
    // Arrange
    let server = UdpSocket::bind("127.0.0.1:0").expect("bind");
    server
        .set_read_timeout(Some(Duration::from_millis(200)))
        .unwrap();
    let port = server.local_addr().unwrap().port();
    let transport = Transport::connect(
        TransportKind::Udp,
        "127.0.0.1",
        port,
        &ConnectOptions::default(),
    )
    .expect("connect");
    let mut uc = ForwardInputUseCase::new(transport);

    // Act
    let outcome = uc.handle_key(LogicalKey::Function(3), KeyState::Pressed, false);

    // Assert
    assert_eq!(outcome, ForwardOutcome::Unmapped);
    let mut buf = [0u8; 16];
    assert!(server.recv(&mut buf).is_err(), "no datagram may arrive");
}

#[test]
fn test_tcp_peer_closing_does_not_surface_errors() {
    // Arrange – accept, then close the server side immediately
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let transport = Transport::connect(
        TransportKind::Tcp,
        "127.0.0.1",
        port,
        &ConnectOptions::default(),
    )
    .expect("connect");
    let (server, _) = listener.accept().expect("accept");
    drop(server);
    drop(listener);
    let mut uc = ForwardInputUseCase::new(transport);

    // Act – the first write draws a reset from the peer, later ones fail
    uc.handle_key(LogicalKey::Space, KeyState::Pressed, false);
    std::thread::sleep(Duration::from_millis(100));
    let mut outcomes = Vec::new();
    for _ in 0..50 {
        outcomes.push(uc.handle_key(LogicalKey::Space, KeyState::Released, false));
    }

    // Assert – every call returned normally and the failures were counted
    let stats = uc.stats();
    assert_eq!(stats.sent + stats.dropped, 51);
    assert!(stats.dropped >= 1, "writes to a closed peer must be dropped");
    assert!(outcomes
        .iter()
        .any(|o| matches!(o, ForwardOutcome::Dropped(_))));
    assert_eq!(uc.sink().kind(), TransportKind::Tcp);
}
