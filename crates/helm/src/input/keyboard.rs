use std::cell::Cell;
use std::ops::BitOr;
use std::rc::Rc;

/// Held modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1 << 0);
    pub const CONTROL: Modifiers = Modifiers(1 << 1);
    pub const ALT: Modifiers = Modifiers(1 << 2);
    pub const GUI: Modifiers = Modifiers(1 << 3);

    pub const fn has(self, other: Modifiers) -> bool {
        self.0 & other.0 != 0
    }

    pub fn shift(self) -> bool {
        self.has(Self::SHIFT)
    }

    pub fn control(self) -> bool {
        self.has(Self::CONTROL)
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

/// Live keyboard state, shared between the input layer (which writes it as
/// key events arrive) and anything that needs to know what is held right now.
///
/// Decisions that read this see the modifiers at decision time, not at the
/// time of the event that triggered them.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    modifiers: Rc<Cell<Modifiers>>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers.get()
    }

    pub fn set_modifiers(&self, modifiers: Modifiers) {
        self.modifiers.set(modifiers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let a = KeyboardState::new();
        let b = a.clone();
        a.set_modifiers(Modifiers::SHIFT | Modifiers::CONTROL);
        assert!(b.modifiers().shift());
        assert!(b.modifiers().control());
        assert!(!b.modifiers().has(Modifiers::ALT));
    }
}
