//! Network transport for the client application.
//!
//! Opens the single connection the client uses for its whole lifetime and
//! writes packets to it.
//!
//! Architecture:
//! - [`Transport::connect`] resolves the server, then either opens a TCP
//!   stream or binds and connects a UDP socket.
//! - [`Transport`] implements [`PacketSink`]: each packet is one `write_all`
//!   on TCP or one datagram on UDP.
//!
//! # TCP vs UDP (for beginners)
//!
//! On **TCP** the two packet bytes are appended to a byte stream.  TCP keeps
//! them in order and retransmits lost segments, but it does not preserve
//! write boundaries: a receiver reading the socket may get half a packet or
//! several packets at once, so it must always read in units of two bytes
//! (`rcs_core::PacketDecoder` does this).  Nagle's algorithm would also hold
//! tiny writes back waiting for more data, which is why `TCP_NODELAY` is on by
//! default.
//!
//! On **UDP** each packet is its own datagram.  Nothing is retransmitted, so
//! a lost release packet can leave a key "stuck" on the server; that is the
//! price of the lower latency.  The socket is `connect`ed so it only talks to
//! the server and can use plain `send`.

use std::fmt;
use std::io::{self, Write};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpStream, ToSocketAddrs, UdpSocket};
use std::time::Duration;

use rcs_core::{InputPacket, PACKET_SIZE};
use thiserror::Error;
use tracing::debug;

use crate::application::forward_input::{PacketSink, SendError};

/// Errors that can occur while opening the transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Name resolution of the server host failed.
    #[error("could not resolve {host}:{port}: {source}")]
    Resolve {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },
    /// Name resolution succeeded but returned no addresses.
    #[error("{host}:{port} did not resolve to any address")]
    NoAddress { host: String, port: u16 },
    /// Connecting to the server failed on every resolved address.
    #[error("failed to connect over {kind} to {addr}: {source}")]
    ConnectFailed {
        kind: TransportKind,
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    /// A socket option could not be applied.
    #[error("failed to configure socket: {0}")]
    Configure(#[source] io::Error),
}

/// Which transport to use, as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TransportKind {
    Tcp,
    Udp,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Tcp => f.write_str("TCP"),
            TransportKind::Udp => f.write_str("UDP"),
        }
    }
}

/// Socket options applied by [`Transport::connect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Upper bound on the TCP handshake; `None` blocks for the OS default.
    pub connect_timeout: Option<Duration>,
    /// Disable Nagle's algorithm on TCP so every packet leaves immediately.
    pub tcp_nodelay: bool,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            connect_timeout: None,
            tcp_nodelay: true,
        }
    }
}

/// An open connection to the server.
#[derive(Debug)]
pub enum Transport {
    Tcp(TcpStream),
    Udp(UdpSocket),
}

impl Transport {
    /// Resolves `host:port` and opens a transport of the requested kind.
    ///
    /// Each resolved address is tried in order; the error for the last one is
    /// returned if none succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if resolution, connection, or socket setup fails.
    pub fn connect(
        kind: TransportKind,
        host: &str,
        port: u16,
        options: &ConnectOptions,
    ) -> Result<Self, TransportError> {
        let addrs = resolve(host, port)?;

        let mut last_err = None;
        for addr in addrs {
            let attempt = match kind {
                TransportKind::Tcp => connect_tcp(addr, options),
                TransportKind::Udp => connect_udp(addr),
            };
            match attempt {
                Ok(transport) => {
                    debug!("{kind} transport ready to {addr}");
                    return transport.configure(options);
                }
                Err(source) => {
                    debug!("{kind} connect to {addr} failed: {source}");
                    last_err = Some(TransportError::ConnectFailed { kind, addr, source });
                }
            }
        }

        Err(last_err.unwrap_or_else(|| TransportError::NoAddress {
            host: host.to_string(),
            port,
        }))
    }

    /// Returns which kind of transport this is.
    pub fn kind(&self) -> TransportKind {
        match self {
            Transport::Tcp(_) => TransportKind::Tcp,
            Transport::Udp(_) => TransportKind::Udp,
        }
    }

    /// Returns the server address this transport is connected to.
    pub fn peer_addr(&self) -> io::Result<SocketAddr> {
        match self {
            Transport::Tcp(stream) => stream.peer_addr(),
            Transport::Udp(socket) => socket.peer_addr(),
        }
    }

    fn configure(self, options: &ConnectOptions) -> Result<Self, TransportError> {
        if let Transport::Tcp(ref stream) = self {
            stream
                .set_nodelay(options.tcp_nodelay)
                .map_err(TransportError::Configure)?;
        }
        Ok(self)
    }
}

impl PacketSink for Transport {
    fn send_packet(&mut self, packet: InputPacket) -> Result<(), SendError> {
        let bytes = packet.to_bytes();
        match self {
            Transport::Tcp(stream) => stream.write_all(&bytes)?,
            Transport::Udp(socket) => {
                let written = socket.send(&bytes)?;
                if written != PACKET_SIZE {
                    return Err(SendError::ShortWrite {
                        written,
                        expected: PACKET_SIZE,
                    });
                }
            }
        }
        Ok(())
    }
}

fn resolve(host: &str, port: u16) -> Result<Vec<SocketAddr>, TransportError> {
    let addrs: Vec<SocketAddr> = (host, port)
        .to_socket_addrs()
        .map_err(|source| TransportError::Resolve {
            host: host.to_string(),
            port,
            source,
        })?
        .collect();

    if addrs.is_empty() {
        return Err(TransportError::NoAddress {
            host: host.to_string(),
            port,
        });
    }
    Ok(addrs)
}

fn connect_tcp(addr: SocketAddr, options: &ConnectOptions) -> io::Result<Transport> {
    let stream = match options.connect_timeout {
        Some(timeout) => TcpStream::connect_timeout(&addr, timeout)?,
        None => TcpStream::connect(addr)?,
    };
    Ok(Transport::Tcp(stream))
}

fn connect_udp(addr: SocketAddr) -> io::Result<Transport> {
    let socket = UdpSocket::bind(SocketAddr::new(unspecified_for(&addr), 0))?;
    socket.connect(addr)?;
    Ok(Transport::Udp(socket))
}

/// Wildcard local address of the same family as `addr`.
fn unspecified_for(addr: &SocketAddr) -> IpAddr {
    match addr {
        SocketAddr::V4(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        SocketAddr::V6(_) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
