//! TOML-based configuration for the client application.
//!
//! Reads `ClientConfig` from the platform-appropriate config file:
//! - Windows:  `%APPDATA%\rcs\config.toml`
//! - Linux:    `~/.config/rcs/config.toml`
//! - macOS:    `~/Library/Application Support/rcs/config.toml`
//!
//! or from an explicit path given with `--config`.  The file is optional:
//! every field has a default, so a missing file, a missing section, or a
//! missing key all fall back to the built-in values.
//!
//! ```toml
//! [network]
//! port = 666
//! connect_timeout_ms = 3000
//! tcp_nodelay = true
//!
//! [window]
//! title = "Doom: Vector Edition: Rust Edition (Input Window)"
//! width = 600
//! height = 550
//! background = [40, 40, 40]
//!
//! [input]
//! forward_repeats = true
//!
//! [logging]
//! log_level = "info"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use rcs_core::DEFAULT_SERVER_PORT;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::network::ConnectOptions;
use crate::infrastructure::window::WindowOptions;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server port and socket settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkConfig {
    /// Remote port for both TCP and UDP.
    #[serde(default = "default_port")]
    pub port: u16,
    /// TCP connect timeout in milliseconds; absent means block until the OS gives up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_ms: Option<u64>,
    /// Set `TCP_NODELAY` on the stream.
    #[serde(default = "default_true")]
    pub tcp_nodelay: bool,
}

/// Input window appearance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Clear colour as `[r, g, b]`.
    #[serde(default = "default_background")]
    pub background: [u8; 3],
}

/// Keyboard handling settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputConfig {
    /// Send auto-repeat key-downs while a key is held.
    #[serde(default = "default_true")]
    pub forward_repeats: bool,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `"info"` or `"rcs_client=debug"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_port() -> u16 {
    DEFAULT_SERVER_PORT
}
fn default_true() -> bool {
    true
}
fn default_title() -> String {
    "Doom: Vector Edition: Rust Edition (Input Window)".to_string()
}
fn default_width() -> u32 {
    600
}
fn default_height() -> u32 {
    550
}
fn default_background() -> [u8; 3] {
    [40, 40, 40]
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            connect_timeout_ms: None,
            tcp_nodelay: default_true(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
            background: default_background(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            forward_repeats: default_true(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl NetworkConfig {
    /// Socket options for [`crate::infrastructure::network::Transport::connect`].
    pub fn connect_options(&self) -> ConnectOptions {
        ConnectOptions {
            connect_timeout: self.connect_timeout_ms.map(Duration::from_millis),
            tcp_nodelay: self.tcp_nodelay,
        }
    }
}

impl WindowConfig {
    /// Options for [`crate::infrastructure::window::run`].
    pub fn window_options(&self) -> WindowOptions {
        WindowOptions {
            title: self.title.clone(),
            width: self.width,
            height: self.height,
            background: self.background,
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Resolves the default config file path, if the platform base directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    platform_config_dir().map(|dir| dir.join("config.toml"))
}

/// Parses a config from TOML text.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] if the TOML is malformed.
pub fn parse_config(content: &str) -> Result<ClientConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Loads the client configuration.
///
/// With an explicit `path` the file must exist.  Without one, the default
/// location is tried and a missing file yields `ClientConfig::default()`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors and
/// [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: Option<&Path>) -> Result<ClientConfig, ConfigError> {
    if let Some(path) = path {
        return read_config(path);
    }

    let Some(path) = default_config_path() else {
        return Ok(ClientConfig::default());
    };

    match read_config(&path) {
        Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            Ok(ClientConfig::default())
        }
        other => other,
    }
}

fn read_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Resolves the platform config base directory including the `rcs` subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("rcs"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("rcs"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("rcs")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
