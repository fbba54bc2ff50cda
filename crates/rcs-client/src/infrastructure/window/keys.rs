//! winit key → [`LogicalKey`] translation.
//!
//! winit reports the *logical* key (layout-aware) plus a [`KeyLocation`]
//! telling left and right modifiers apart.  Everything the client does not
//! know by name becomes [`LogicalKey::Unidentified`], which the key mapper
//! then turns into the no-op code.
//!
//! The logical key changes with the modifiers held at the time of the event:
//! `w` pressed on its own and released while Option (macOS) or AltGr is held
//! arrives as `w` then `∑`.  A press and its release must produce the same
//! code, so translation starts from the key *without* modifiers wherever the
//! platform can report it.

use rcs_core::{LogicalKey, Side};
use winit::keyboard::{Key, KeyLocation, NamedKey};

/// Translates a winit logical key and its location into a [`LogicalKey`].
pub fn translate_key(key: &Key, location: KeyLocation) -> LogicalKey {
    match key {
        Key::Named(named) => translate_named(*named, location),
        Key::Character(text) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => LogicalKey::Character(c),
                // Dead-key compositions and IME output can carry several chars.
                _ => LogicalKey::Unidentified,
            }
        }
        _ => LogicalKey::Unidentified,
    }
}

/// Translates the key of a keyboard event.
///
/// `unmodified` is the key with modifiers ignored, when the platform provides
/// one; otherwise `logical` is used as reported.
pub fn translate_event_key(
    logical: &Key,
    unmodified: Option<&Key>,
    location: KeyLocation,
) -> LogicalKey {
    translate_key(unmodified.unwrap_or(logical), location)
}

fn translate_named(named: NamedKey, location: KeyLocation) -> LogicalKey {
    let side = side_of(location);
    match named {
        NamedKey::ArrowUp => LogicalKey::ArrowUp,
        NamedKey::ArrowDown => LogicalKey::ArrowDown,
        NamedKey::ArrowLeft => LogicalKey::ArrowLeft,
        NamedKey::ArrowRight => LogicalKey::ArrowRight,
        NamedKey::Space => LogicalKey::Space,
        NamedKey::Enter => LogicalKey::Enter,
        NamedKey::Escape => LogicalKey::Escape,
        NamedKey::Tab => LogicalKey::Tab,
        NamedKey::Backspace => LogicalKey::Backspace,
        NamedKey::Control => LogicalKey::Control(side),
        NamedKey::Shift => LogicalKey::Shift(side),
        NamedKey::Alt => LogicalKey::Alt(side),
        NamedKey::Super => LogicalKey::Super(side),
        NamedKey::F1 => LogicalKey::Function(1),
        NamedKey::F2 => LogicalKey::Function(2),
        NamedKey::F3 => LogicalKey::Function(3),
        NamedKey::F4 => LogicalKey::Function(4),
        NamedKey::F5 => LogicalKey::Function(5),
        NamedKey::F6 => LogicalKey::Function(6),
        NamedKey::F7 => LogicalKey::Function(7),
        NamedKey::F8 => LogicalKey::Function(8),
        NamedKey::F9 => LogicalKey::Function(9),
        NamedKey::F10 => LogicalKey::Function(10),
        NamedKey::F11 => LogicalKey::Function(11),
        NamedKey::F12 => LogicalKey::Function(12),
        _ => LogicalKey::Unidentified,
    }
}

fn side_of(location: KeyLocation) -> Side {
    match location {
        KeyLocation::Right => Side::Right,
        _ => Side::Left,
    }
}
