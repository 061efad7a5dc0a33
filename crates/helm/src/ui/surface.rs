use glam::Vec2;
use crate::api::types::SurfaceId;
use crate::input::command::{Command, Key};
use crate::input::keyboard::Modifiers;
use crate::render::draw::DrawList;

/// The view of the panel stack a surface gets while handling input or stepping.
///
/// Pushes and pops are deferred until the stack commits them, so a surface
/// may safely pop itself from inside one of its own handlers.
pub trait Ui {
    /// Queue `surface` to go on top of the stack.
    fn push(&mut self, surface: Box<dyn Surface>);

    /// Queue the surface with this id for removal.
    fn pop(&mut self, id: SurfaceId);

    /// Whether `id` is on top of the committed stack. Surfaces pushed
    /// since the last commit are not considered.
    fn is_top(&self, id: SurfaceId) -> bool;

    /// The absolute top, including surfaces pushed but not yet committed.
    fn top(&self) -> Option<SurfaceId>;
}

/// A modal UI layer. Only the top surface receives input.
///
/// Every handler has a default that ignores the input; returning `true`
/// consumes it.
#[allow(unused_variables)]
pub trait Surface {
    fn id(&self) -> SurfaceId;

    /// Short name, used in logs and draw listings.
    fn name(&self) -> &'static str;

    /// The text this surface shows, if it is primarily a message.
    fn caption(&self) -> Option<&str> {
        None
    }

    /// Advance one frame.
    fn step(&mut self, ui: &mut dyn Ui) {}

    fn draw(&mut self, ui: &dyn Ui, out: &mut DrawList) {}

    fn key_down(
        &mut self,
        ui: &mut dyn Ui,
        key: Key,
        modifiers: Modifiers,
        command: Command,
        is_new_press: bool,
    ) -> bool {
        false
    }

    fn click(&mut self, ui: &mut dyn Ui, at: Vec2, clicks: u32) -> bool {
        false
    }

    fn rclick(&mut self, ui: &mut dyn Ui, at: Vec2) -> bool {
        false
    }

    fn hover(&mut self, ui: &mut dyn Ui, at: Vec2) -> bool {
        false
    }

    fn drag(&mut self, ui: &mut dyn Ui, delta: Vec2) -> bool {
        false
    }

    fn release(&mut self, ui: &mut dyn Ui, at: Vec2) -> bool {
        false
    }

    fn scroll(&mut self, ui: &mut dyn Ui, delta: Vec2) -> bool {
        false
    }

    fn finger_down(&mut self, ui: &mut dyn Ui, at: Vec2, finger: i32) -> bool {
        false
    }

    fn finger_move(&mut self, ui: &mut dyn Ui, at: Vec2, finger: i32) -> bool {
        false
    }

    fn finger_up(&mut self, ui: &mut dyn Ui, at: Vec2, finger: i32) -> bool {
        false
    }

    /// Whether input this surface ignores is kept from surfaces below it.
    fn traps_all_events(&self) -> bool {
        true
    }

    /// Full-screen surfaces hide everything below them when drawing.
    fn is_full_screen(&self) -> bool {
        false
    }

    fn allows_fast_forward(&self) -> bool {
        false
    }
}
