//! rcs: remote-control input client entry point.
//!
//! Opens the transport to the server, then runs the input window until it is
//! closed.
//!
//! # Usage
//!
//! ```text
//! rcs <udp|tcp> <server_ip> [OPTIONS]
//!
//! Options:
//!   --port <PORT>         Server port [default: 666]
//!   --config <PATH>       TOML config file
//!   --log-level <LEVEL>   tracing filter when RUST_LOG is unset
//! ```
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()          -- optional TOML settings
//!  └─ Transport::connect()   -- TCP stream or connected UDP socket (fatal on error)
//!  └─ window::run()          -- winit event loop
//!       └─ KeyboardInput -> translate_event_key -> ForwardInputUseCase -> Transport
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rcs_client::application::forward_input::ForwardInputUseCase;
use rcs_client::infrastructure::network::{Transport, TransportKind};
use rcs_client::infrastructure::storage::config::load_config;
use rcs_client::infrastructure::window;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Remote-control input client.
///
/// Sends every press and release of the movement and action keys to a server
/// as a 2-byte packet.
#[derive(Debug, Parser)]
#[command(name = "rcs", version)]
struct Cli {
    /// Transport to the server.
    #[arg(value_enum, ignore_case = true)]
    transport: TransportKind,

    /// Server IP address or hostname.
    server_ip: String,

    /// Server port; overrides the config file.
    #[arg(long, env = "RCS_PORT")]
    port: Option<u16>,

    /// Path to a TOML config file.
    ///
    /// Without this flag the platform config directory is searched, and a
    /// missing file means built-in defaults.
    #[arg(long, env = "RCS_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is not set; overrides the config file.
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("failed to load configuration")?;

    // Initialise structured logging.  `RUST_LOG` wins over flag and file.
    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.log_level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .init();

    let port = cli.port.unwrap_or(config.network.port);
    info!("rcs starting: {} to {}:{port}", cli.transport, cli.server_ip);

    let transport = Transport::connect(
        cli.transport,
        &cli.server_ip,
        port,
        &config.network.connect_options(),
    )
    .with_context(|| format!("could not open {} transport to {}:{port}", cli.transport, cli.server_ip))?;

    match transport.kind() {
        TransportKind::Tcp => info!("TCP connected to {}:{port}", cli.server_ip),
        TransportKind::Udp => info!("UDP ready to {}:{port}", cli.server_ip),
    }

    let forward =
        ForwardInputUseCase::new(transport).with_forward_repeats(config.input.forward_repeats);

    let stats = window::run(config.window.window_options(), forward).context("input window failed")?;

    info!(
        sent = stats.sent,
        dropped = stats.dropped,
        unmapped = stats.unmapped,
        repeats_suppressed = stats.repeats_suppressed,
        "rcs stopped"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    /// Parses `args` with `RCS_PORT` and `RCS_CONFIG` unset, so the shell
    /// running the tests cannot leak values into the result.
    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        std::env::remove_var("RCS_PORT");
        std::env::remove_var("RCS_CONFIG");
        Cli::try_parse_from(args.iter().copied())
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_two_positionals() {
        let cli = parse(&["rcs", "tcp", "192.168.1.20"]).expect("parse");
        assert_eq!(cli.transport, TransportKind::Tcp);
        assert_eq!(cli.server_ip, "192.168.1.20");
        assert_eq!(cli.port, None);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn test_cli_transport_is_case_insensitive() {
        let cli = parse(&["rcs", "UDP", "10.0.0.2"]).expect("parse");
        assert_eq!(cli.transport, TransportKind::Udp);
    }

    #[test]
    fn test_cli_rejects_missing_server() {
        assert!(parse(&["rcs", "udp"]).is_err());
    }

    #[test]
    fn test_cli_rejects_extra_positional() {
        assert!(parse(&["rcs", "udp", "10.0.0.2", "extra"]).is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_transport() {
        assert!(parse(&["rcs", "sctp", "10.0.0.2"]).is_err());
    }

    #[test]
    fn test_cli_port_flag_overrides_default() {
        let cli = parse(&["rcs", "tcp", "localhost", "--port", "7000"]).expect("parse");
        assert_eq!(cli.port, Some(7000));
    }
}
