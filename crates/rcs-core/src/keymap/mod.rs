//! Key code translation table.
//!
//! Turns a [`LogicalKey`] into the single byte that identifies it on the wire.
//! The table is deliberately tiny: movement keys, a few action keys, and
//! Control.  Every other key maps to [`NO_OP_KEY_CODE`] and is never sent.
//!
//! | Key                   | Wire byte     |
//! |-----------------------|---------------|
//! | Arrow Up / Down       | `i` / `k`     |
//! | Arrow Left / Right    | `j` / `l`     |
//! | `w` `a` `s` `d`       | same letter   |
//! | Space                 | `' '` (32)    |
//! | Escape                | 27            |
//! | Enter                 | `'\n'` (10)   |
//! | Left / Right Control  | 17            |
//!
//! Arrow keys are sent as the `ijkl` cluster so the receiver can treat them as
//! a second movement pad next to `wasd`.

pub mod key;

pub use key::{KeyState, LogicalKey, Side};

/// Wire code meaning "no mapping"; keys that map to it are never transmitted.
pub const NO_OP_KEY_CODE: u8 = 0;

/// Wire code for Escape (ASCII ESC).
pub const ESCAPE_KEY_CODE: u8 = 27;

/// Wire code shared by both Control keys (ASCII DC1, the Windows `VK_CONTROL` value).
pub const CONTROL_KEY_CODE: u8 = 17;

/// Wire code for Enter / Return (ASCII LF).
pub const ENTER_KEY_CODE: u8 = b'\n';

/// Every entry of the translation table as `(canonical key, wire byte)`.
///
/// Right Control shares its byte with Left Control; only the left side is
/// listed as canonical so the reverse lookup is unambiguous.
pub const MAPPED_KEYS: &[(LogicalKey, u8)] = &[
    (LogicalKey::ArrowUp, b'i'),
    (LogicalKey::ArrowDown, b'k'),
    (LogicalKey::ArrowLeft, b'j'),
    (LogicalKey::ArrowRight, b'l'),
    (LogicalKey::Character('w'), b'w'),
    (LogicalKey::Character('a'), b'a'),
    (LogicalKey::Character('s'), b's'),
    (LogicalKey::Character('d'), b'd'),
    (LogicalKey::Space, b' '),
    (LogicalKey::Escape, ESCAPE_KEY_CODE),
    (LogicalKey::Enter, ENTER_KEY_CODE),
    (LogicalKey::Control(Side::Left), CONTROL_KEY_CODE),
];

/// Translates a [`LogicalKey`] to its wire byte.
///
/// Returns [`NO_OP_KEY_CODE`] for every key outside the table.  Letters match
/// case-insensitively, so Shift+W still sends `w`.
///
/// # Panics
///
/// This function never panics; every `LogicalKey` is handled.
pub fn map_key(key: LogicalKey) -> u8 {
    match key {
        LogicalKey::ArrowUp => b'i',
        LogicalKey::ArrowDown => b'k',
        LogicalKey::ArrowLeft => b'j',
        LogicalKey::ArrowRight => b'l',
        LogicalKey::Space | LogicalKey::Character(' ') => b' ',
        LogicalKey::Escape => ESCAPE_KEY_CODE,
        LogicalKey::Enter => ENTER_KEY_CODE,
        LogicalKey::Control(_) => CONTROL_KEY_CODE,
        LogicalKey::Character(c) => match c.to_ascii_lowercase() {
            'w' => b'w',
            'a' => b'a',
            's' => b's',
            'd' => b'd',
            _ => NO_OP_KEY_CODE,
        },
        _ => NO_OP_KEY_CODE,
    }
}

/// Translates a wire byte back to its canonical [`LogicalKey`].
///
/// Returns `None` for [`NO_OP_KEY_CODE`] and for bytes the client never sends.
pub fn wire_to_key(code: u8) -> Option<LogicalKey> {
    // Linear scan is fine: the table has a dozen entries and this direction
    // is only used by receivers and diagnostics.
    MAPPED_KEYS
        .iter()
        .find(|&&(_, mapped)| mapped == code && code != NO_OP_KEY_CODE)
        .map(|&(key, _)| key)
}

/// Unified key mapper providing both translation directions.
pub struct KeyMapper;

impl KeyMapper {
    /// Translates a [`LogicalKey`] to its wire byte; see [`map_key`].
    pub fn key_to_wire(key: LogicalKey) -> u8 {
        map_key(key)
    }

    /// Translates a wire byte to its canonical key; see [`wire_to_key`].
    pub fn wire_to_key(code: u8) -> Option<LogicalKey> {
        wire_to_key(code)
    }

    /// Returns `true` when `key` has a non-zero wire code and will be sent.
    pub fn is_mapped(key: LogicalKey) -> bool {
        map_key(key) != NO_OP_KEY_CODE
    }
}
