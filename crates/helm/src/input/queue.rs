use glam::Vec2;
use crate::input::command::Key;
use crate::input::keyboard::Modifiers;

/// Which mouse button went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

/// Input event types the panel stack understands. Positions are in screen
/// space, already scaled by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A mouse button went down at `pos`.
    PointerDown { pos: Vec2, button: MouseButton, clicks: u32 },
    /// The left button was released at `pos`.
    PointerUp { pos: Vec2 },
    /// The cursor moved; `pressed` when the left button is held.
    PointerMove { pos: Vec2, delta: Vec2, pressed: bool },
    /// Wheel or trackpad scroll.
    Scroll { delta: Vec2 },
    /// A key was pressed. `modifiers` is the full held set after this press.
    KeyDown { key: Key, modifiers: Modifiers, repeat: bool },
    /// A key was released.
    KeyUp { key: Key, modifiers: Modifiers },
    /// A touch began.
    FingerDown { pos: Vec2, finger: i32 },
    /// A touch moved.
    FingerMove { pos: Vec2, finger: i32 },
    /// A touch ended.
    FingerUp { pos: Vec2, finger: i32 },
}

/// Input gathered between frames, in arrival order.
#[derive(Debug, Default)]
pub struct InputQueue(Vec<InputEvent>);

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.0.push(event);
    }

    /// Take everything queued since the last drain.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.0)
    }
}
