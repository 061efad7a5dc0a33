use crate::api::types::SurfaceId;
use crate::input::command::{Command, Keymap};
use crate::input::keyboard::KeyboardState;
use crate::input::queue::{InputEvent, MouseButton};
use crate::render::draw::DrawList;
use crate::ui::surface::{Surface, Ui};

/// Pushes and pops requested since the last commit.
#[derive(Default)]
struct Pending {
    to_push: Vec<Box<dyn Surface>>,
    to_pop: Vec<SurfaceId>,
    committed_top: Option<SurfaceId>,
}

impl Ui for Pending {
    fn push(&mut self, surface: Box<dyn Surface>) {
        log::debug!("push {} ({:?})", surface.name(), surface.id());
        self.to_push.push(surface);
    }

    fn pop(&mut self, id: SurfaceId) {
        self.to_pop.push(id);
    }

    fn is_top(&self, id: SurfaceId) -> bool {
        self.committed_top == Some(id)
    }

    fn top(&self) -> Option<SurfaceId> {
        self.to_push.last().map(|s| s.id()).or(self.committed_top)
    }
}

/// The stack of modal surfaces. Bottom is the root (normally the flight
/// view), top is the one receiving input.
pub struct PanelStack {
    stack: Vec<Box<dyn Surface>>,
    pending: Pending,
    keymap: Keymap,
    keyboard: KeyboardState,
}

impl PanelStack {
    pub fn new(keymap: Keymap, keyboard: KeyboardState) -> Self {
        Self {
            stack: Vec::with_capacity(8),
            pending: Pending::default(),
            keymap,
            keyboard,
        }
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    /// Offer an input event to the surfaces, top first, until one consumes it
    /// or traps everything. Then commit any pushes or pops it caused.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        let command = match *event {
            InputEvent::KeyDown { key, modifiers, .. } => {
                self.keyboard.set_modifiers(modifiers);
                self.keymap.command_for(key)
            }
            InputEvent::KeyUp { modifiers, .. } => {
                self.keyboard.set_modifiers(modifiers);
                Command::NONE
            }
            _ => Command::NONE,
        };

        let mut handled = false;
        {
            let Self { stack, pending, .. } = self;
            for surface in stack.iter_mut().rev() {
                // Surfaces about to be popped cannot handle anything else.
                if pending.to_pop.contains(&surface.id()) {
                    continue;
                }
                handled = dispatch(surface.as_mut(), pending, event, command);
                if handled || surface.traps_all_events() {
                    break;
                }
            }
        }

        self.push_or_pop();
        handled
    }

    /// Commit pending changes, then step every surface bottom-up.
    pub fn step_all(&mut self) {
        self.push_or_pop();

        let Self { stack, pending, .. } = self;
        for surface in stack.iter_mut() {
            surface.step(pending);
        }
    }

    /// Draw from the topmost full-screen surface upward.
    pub fn draw_all(&mut self, out: &mut DrawList) {
        let start = self
            .stack
            .iter()
            .rposition(|s| s.is_full_screen())
            .unwrap_or(0);

        let Self { stack, pending, .. } = self;
        for surface in stack[start..].iter_mut() {
            out.surfaces.push(surface.name());
            surface.draw(&*pending, out);
        }
    }

    /// Apply queued pushes, then queued pops.
    pub fn push_or_pop(&mut self) {
        self.stack.append(&mut self.pending.to_push);

        for id in self.pending.to_pop.drain(..) {
            if let Some(index) = self.stack.iter().position(|s| s.id() == id) {
                let surface = self.stack.remove(index);
                log::debug!("pop {} ({:?})", surface.name(), id);
            }
        }
        self.pending.committed_top = self.stack.last().map(|s| s.id());
    }

    /// The committed top surface.
    pub fn top_surface(&self) -> Option<&dyn Surface> {
        self.stack.last().map(|s| s.as_ref())
    }

    /// Committed surface count.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty() && self.pending.to_push.is_empty()
    }

    /// Whether the committed top surface lets the host run the simulation faster.
    pub fn allows_fast_forward(&self) -> bool {
        self.stack.last().map_or(false, |s| s.allows_fast_forward())
    }
}

impl Ui for PanelStack {
    fn push(&mut self, surface: Box<dyn Surface>) {
        self.pending.push(surface);
    }

    fn pop(&mut self, id: SurfaceId) {
        self.pending.pop(id);
    }

    fn is_top(&self, id: SurfaceId) -> bool {
        self.pending.is_top(id)
    }

    fn top(&self) -> Option<SurfaceId> {
        self.pending.top()
    }
}

fn dispatch(surface: &mut dyn Surface, ui: &mut dyn Ui, event: &InputEvent, command: Command) -> bool {
    match *event {
        InputEvent::PointerDown { pos, button: MouseButton::Left, clicks } => surface.click(ui, pos, clicks),
        InputEvent::PointerDown { pos, button: MouseButton::Right, .. } => surface.rclick(ui, pos),
        InputEvent::PointerUp { pos } => surface.release(ui, pos),
        InputEvent::PointerMove { delta, pressed: true, .. } => surface.drag(ui, delta),
        InputEvent::PointerMove { pos, pressed: false, .. } => surface.hover(ui, pos),
        InputEvent::Scroll { delta } => surface.scroll(ui, delta),
        InputEvent::KeyDown { key, modifiers, repeat } => surface.key_down(ui, key, modifiers, command, !repeat),
        InputEvent::KeyUp { .. } => false,
        InputEvent::FingerDown { pos, finger } => surface.finger_down(ui, pos, finger),
        InputEvent::FingerMove { pos, finger } => surface.finger_move(ui, pos, finger),
        InputEvent::FingerUp { pos, finger } => surface.finger_up(ui, pos, finger),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use crate::input::command::Key;
    use crate::input::keyboard::Modifiers;
    use crate::ui::panels::Dialog;

    /// Records what reached it; optionally lets input fall through.
    struct TestSurface {
        id: SurfaceId,
        traps: bool,
        clicks: u32,
        steps: u32,
        full_screen: bool,
    }

    impl TestSurface {
        fn new(traps: bool) -> Self {
            Self { id: SurfaceId::next(), traps, clicks: 0, steps: 0, full_screen: false }
        }
    }

    impl Surface for TestSurface {
        fn id(&self) -> SurfaceId {
            self.id
        }

        fn name(&self) -> &'static str {
            "passive"
        }

        fn step(&mut self, _ui: &mut dyn Ui) {
            self.steps += 1;
        }

        fn click(&mut self, _ui: &mut dyn Ui, _at: Vec2, _clicks: u32) -> bool {
            self.clicks += 1;
            false
        }

        fn traps_all_events(&self) -> bool {
            self.traps
        }

        fn is_full_screen(&self) -> bool {
            self.full_screen
        }
    }

    fn click() -> InputEvent {
        InputEvent::PointerDown { pos: Vec2::ZERO, button: MouseButton::Left, clicks: 1 }
    }

    #[test]
    fn pushes_are_deferred_until_commit() {
        let mut ui = PanelStack::new(Keymap::default(), KeyboardState::new());
        let root = TestSurface::new(true);
        let root_id = root.id;
        ui.push(Box::new(root));
        assert_eq!(ui.top(), Some(root_id));
        assert!(!ui.is_top(root_id));

        ui.push_or_pop();
        assert!(ui.is_top(root_id));

        let dialog = Dialog::new("hello");
        let dialog_id = dialog.id();
        ui.push(Box::new(dialog));
        // Absolute top sees the pending push; committed top does not.
        assert_eq!(ui.top(), Some(dialog_id));
        assert!(ui.is_top(root_id));

        ui.step_all();
        assert!(ui.is_top(dialog_id));
        assert_eq!(ui.len(), 2);
    }

    #[test]
    fn trapping_surface_blocks_lower_ones() {
        let mut ui = PanelStack::new(Keymap::default(), KeyboardState::new());
        ui.push(Box::new(TestSurface::new(true)));
        ui.push(Box::new(TestSurface::new(false)));
        ui.push_or_pop();

        // The passive top surface ignores the click and does not trap, so it falls through
        // to the root, which also ignores it.
        assert!(!ui.handle(&click()));
        ui.push(Box::new(TestSurface::new(true)));
        ui.push_or_pop();
        assert!(!ui.handle(&click()));
        assert_eq!(ui.len(), 3);
    }

    #[test]
    fn dialog_pops_itself_on_return() {
        let mut ui = PanelStack::new(Keymap::default(), KeyboardState::new());
        let root = TestSurface::new(true);
        let root_id = root.id;
        ui.push(Box::new(root));
        ui.push(Box::new(Dialog::new("Docking clamps released.")));
        ui.push_or_pop();
        assert!(!ui.is_top(root_id));

        let enter = InputEvent::KeyDown { key: Key::RETURN, modifiers: Modifiers::NONE, repeat: false };
        assert!(ui.handle(&enter));
        assert!(ui.is_top(root_id));
        assert_eq!(ui.len(), 1);
    }

    #[test]
    fn key_events_update_ambient_modifiers() {
        let keyboard = KeyboardState::new();
        let mut ui = PanelStack::new(Keymap::default(), keyboard.clone());
        ui.handle(&InputEvent::KeyDown { key: Key::char('x'), modifiers: Modifiers::SHIFT, repeat: false });
        assert!(keyboard.modifiers().shift());
        ui.handle(&InputEvent::KeyUp { key: Key::char('x'), modifiers: Modifiers::NONE });
        assert!(!keyboard.modifiers().shift());
    }

    #[test]
    fn draw_starts_at_topmost_full_screen() {
        let mut ui = PanelStack::new(Keymap::default(), KeyboardState::new());
        ui.push(Box::new(TestSurface::new(true)));
        let mut full = TestSurface::new(true);
        full.full_screen = true;
        ui.push(Box::new(full));
        ui.push(Box::new(Dialog::new("top")));
        ui.push_or_pop();

        let mut out = DrawList::new();
        ui.draw_all(&mut out);
        assert_eq!(out.surfaces, vec!["passive", "dialog"]);
    }

    #[test]
    fn step_all_steps_every_surface() {
        let mut ui = PanelStack::new(Keymap::default(), KeyboardState::new());
        ui.push(Box::new(TestSurface::new(true)));
        ui.step_all();
        ui.step_all();
        assert_eq!(ui.len(), 1);
        assert!(ui.top_surface().is_some());
    }
}
