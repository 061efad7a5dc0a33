use glam::Vec2;
use crate::input::keyboard::Modifiers;

/// Box-selection drag in progress on the main view.
///
/// A drag may only start from a click that was accepted, and any modal
/// interruption cancels it so a stale rectangle cannot survive a dialog.
#[derive(Debug, Clone, Default)]
pub struct DragSelect {
    can_drag: bool,
    is_dragging: bool,
    source: Vec2,
    point: Vec2,
    shift: bool,
    control: bool,
}

impl DragSelect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a potential drag at `at`, remembering which modifiers were held.
    pub fn begin(&mut self, at: Vec2, modifiers: Modifiers) {
        self.can_drag = true;
        self.source = at;
        self.point = at;
        self.shift = modifiers.shift();
        self.control = modifiers.control();
    }

    /// Extend the drag. Returns false if dragging is not allowed right now.
    pub fn extend(&mut self, delta: Vec2) -> bool {
        if !self.can_drag {
            return false;
        }
        self.point += delta;
        self.is_dragging = true;
        true
    }

    /// Finish the drag at `at`. Returns the selection box when the drag
    /// covered more than `threshold` units.
    pub fn release(&mut self, at: Vec2, threshold: f32) -> Option<(Vec2, Vec2)> {
        if !self.is_dragging {
            return None;
        }
        self.is_dragging = false;
        self.point = at;
        if self.point.distance(self.source) > threshold {
            Some((self.source, self.point))
        } else {
            None
        }
    }

    /// Forbid further dragging until the next accepted click.
    pub fn cancel(&mut self) {
        self.can_drag = false;
    }

    /// Stop showing a drag that is no longer allowed.
    pub fn clear_dragging(&mut self) {
        self.is_dragging = false;
    }

    pub fn can_drag(&self) -> bool {
        self.can_drag
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn shift(&self) -> bool {
        self.shift
    }

    pub fn control(&self) -> bool {
        self.control
    }

    /// Rectangle outline as four line segments, in draw order.
    pub fn outline(&self) -> [(Vec2, Vec2); 4] {
        let (s, p) = (self.source, self.point);
        let a = Vec2::new(s.x, p.y);
        let b = Vec2::new(p.x, s.y);
        [(s, a), (a, p), (p, b), (b, s)]
    }
}
