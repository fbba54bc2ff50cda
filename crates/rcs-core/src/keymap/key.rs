//! Platform-independent key identifiers.
//!
//! The window layer translates whatever the window system reports (winit
//! `Key`s on desktop) into a [`LogicalKey`].  The key mapper only ever sees
//! this type, which keeps the translation table free of OS types.
//!
//! # Logical vs physical keys (for beginners)
//!
//! A *physical* key is a position on the keyboard ("the key left of S").  A
//! *logical* key is what that position means under the active layout ("the
//! letter A" on QWERTY, "the letter Q" on AZERTY).  The remote side of this
//! protocol reacts to letters, so the client works with logical keys: pressing
//! the key labelled `W` sends `w` whatever the physical layout.

use serde::{Deserialize, Serialize};

/// Which side of the keyboard a modifier key sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// A logical keyboard key.
///
/// Printable keys are carried as [`LogicalKey::Character`]; everything the
/// client knows by name has its own variant.  Keys the window system cannot
/// identify become [`LogicalKey::Unidentified`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Control(Side),
    Shift(Side),
    Alt(Side),
    Super(Side),
    /// Function key `F1`..`F12`; the value is the function key number.
    Function(u8),
    /// A key that produces a single printable character.
    Character(char),
    /// A key the window system reported without a usable identity.
    Unidentified,
}

/// Whether a key transition is a press or a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyState {
    Pressed,
    Released,
}

impl KeyState {
    /// Returns `true` for [`KeyState::Pressed`].
    pub fn is_pressed(self) -> bool {
        matches!(self, KeyState::Pressed)
    }
}

impl From<bool> for KeyState {
    fn from(pressed: bool) -> Self {
        if pressed {
            KeyState::Pressed
        } else {
            KeyState::Released
        }
    }
}
