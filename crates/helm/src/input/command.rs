use std::collections::BTreeMap;
use std::ops::BitOr;
use serde::{Deserialize, Serialize};

/// A raw key code. Printable keys use their ASCII value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Key(pub u32);

impl Key {
    pub const RETURN: Key = Key(13);
    pub const ESCAPE: Key = Key(27);
    pub const PLUS: Key = Key(b'+' as u32);
    pub const MINUS: Key = Key(b'-' as u32);
    pub const EQUALS: Key = Key(b'=' as u32);
    pub const KP_MINUS: Key = Key(0x4000_0056);
    pub const KP_PLUS: Key = Key(0x4000_0057);

    pub const fn char(c: char) -> Key {
        Key(c as u32)
    }

    /// The digit on a number-row key.
    pub fn digit(self) -> Option<u8> {
        if (u32::from(b'0')..=u32::from(b'9')).contains(&self.0) {
            Some((self.0 - u32::from(b'0')) as u8)
        } else {
            None
        }
    }

    pub fn is_zoom_out(self) -> bool {
        self == Key::MINUS || self == Key::KP_MINUS
    }

    pub fn is_zoom_in(self) -> bool {
        self == Key::PLUS || self == Key::KP_PLUS || self == Key::EQUALS
    }
}

/// Game commands a key may be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Command(u32);

impl Command {
    pub const NONE: Command = Command(0);
    pub const MAP: Command = Command(1 << 0);
    pub const INFO: Command = Command(1 << 1);
    pub const HAIL: Command = Command(1 << 2);
    pub const AMMO: Command = Command(1 << 3);
    pub const SCAN: Command = Command(1 << 4);
    pub const DEPLOY: Command = Command(1 << 5);

    const NAMES: [(Command, &'static str); 6] = [
        (Self::MAP, "map"),
        (Self::INFO, "info"),
        (Self::HAIL, "hail"),
        (Self::AMMO, "ammo"),
        (Self::SCAN, "scan"),
        (Self::DEPLOY, "deploy"),
    ];

    pub fn from_name(name: &str) -> Option<Command> {
        Self::NAMES.iter().find(|(_, n)| *n == name).map(|(c, _)| *c)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Any bit of `other` is set.
    pub const fn has(self, other: Command) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for Command {
    type Output = Command;

    fn bitor(self, rhs: Command) -> Command {
        Command(self.0 | rhs.0)
    }
}

/// An overlay the player asked for during input handling, opened on the next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayRequest {
    #[default]
    None,
    Map,
    Info,
    Hail,
}

impl OverlayRequest {
    /// Map wins over info, info over hail.
    pub fn from_command(command: Command) -> Self {
        if command.has(Command::MAP) {
            OverlayRequest::Map
        } else if command.has(Command::INFO) {
            OverlayRequest::Info
        } else if command.has(Command::HAIL) {
            OverlayRequest::Hail
        } else {
            OverlayRequest::None
        }
    }
}

/// Key bindings, stored as command name → key code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keymap {
    pub bindings: BTreeMap<String, Key>,
}

impl Default for Keymap {
    fn default() -> Self {
        let bindings = [
            ("map", 'm'),
            ("info", 'i'),
            ("hail", 't'),
            ("ammo", 'a'),
            ("scan", 's'),
            ("deploy", 'f'),
        ]
        .into_iter()
        .map(|(name, c)| (name.to_string(), Key::char(c)))
        .collect();
        Self { bindings }
    }
}

impl Keymap {
    /// All commands bound to `key`.
    pub fn command_for(&self, key: Key) -> Command {
        self.bindings
            .iter()
            .filter(|(_, &bound)| bound == key)
            .filter_map(|(name, _)| Command::from_name(name))
            .fold(Command::NONE, |acc, c| acc | c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keymap_resolves_commands() {
        let keymap = Keymap::default();
        assert_eq!(keymap.command_for(Key::char('m')), Command::MAP);
        assert_eq!(keymap.command_for(Key::char('t')), Command::HAIL);
        assert!(keymap.command_for(Key::MINUS).is_empty());
    }

    #[test]
    fn overlay_priority() {
        assert_eq!(OverlayRequest::from_command(Command::HAIL | Command::MAP), OverlayRequest::Map);
        assert_eq!(OverlayRequest::from_command(Command::HAIL | Command::INFO), OverlayRequest::Info);
        assert_eq!(OverlayRequest::from_command(Command::AMMO), OverlayRequest::None);
    }

    #[test]
    fn digits() {
        assert_eq!(Key::char('7').digit(), Some(7));
        assert_eq!(Key::char('a').digit(), None);
    }
}
