//! The modal surfaces the flight controller opens.
//!
//! These are deliberately small: each knows how it is dismissed and what it
//! reports back, while the text layout is left to the rendering backend.

use std::sync::Arc;
use glam::Vec2;
use crate::api::types::SurfaceId;
use crate::input::command::{Command, Key};
use crate::input::keyboard::Modifiers;
use crate::render::draw::DrawList;
use crate::ui::completion::{Completion, CompletionSender};
use crate::ui::surface::{Surface, Ui};
use crate::world::government::GovernmentRef;
use crate::world::planet::{Planet, StellarObject};
use crate::world::ship::ShipHandle;

const TEXT_COLOR: [f32; 4] = [0.9, 0.9, 0.9, 1.0];

fn is_dismiss_key(key: Key) -> bool {
    key == Key::RETURN || key == Key::ESCAPE
}

/// A message with an OK button.
pub struct Dialog {
    id: SurfaceId,
    message: String,
}

impl Dialog {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            id: SurfaceId::next(),
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Surface for Dialog {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn name(&self) -> &'static str {
        "dialog"
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.message)
    }

    fn draw(&mut self, _ui: &dyn Ui, out: &mut DrawList) {
        out.text(self.message.clone(), Vec2::ZERO, 14, TEXT_COLOR);
    }

    fn key_down(&mut self, ui: &mut dyn Ui, key: Key, _: Modifiers, _: Command, _: bool) -> bool {
        if is_dismiss_key(key) {
            ui.pop(self.id);
        }
        true
    }
}

/// The galaxy map.
pub struct MapPanel {
    id: SurfaceId,
}

impl MapPanel {
    pub fn new() -> Self {
        Self { id: SurfaceId::next() }
    }
}

impl Default for MapPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for MapPanel {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn name(&self) -> &'static str {
        "map"
    }

    fn key_down(&mut self, ui: &mut dyn Ui, key: Key, _: Modifiers, command: Command, _: bool) -> bool {
        if key == Key::ESCAPE || command.has(Command::MAP) {
            ui.pop(self.id);
        }
        true
    }

    fn is_full_screen(&self) -> bool {
        true
    }
}

/// The player's fleet and status overview.
pub struct InfoPanel {
    id: SurfaceId,
}

impl InfoPanel {
    pub fn new() -> Self {
        Self { id: SurfaceId::next() }
    }
}

impl Default for InfoPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for InfoPanel {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn name(&self) -> &'static str {
        "player info"
    }

    fn key_down(&mut self, ui: &mut dyn Ui, key: Key, _: Modifiers, command: Command, _: bool) -> bool {
        if key == Key::ESCAPE || command.has(Command::INFO) {
            ui.pop(self.id);
        }
        true
    }

    fn is_full_screen(&self) -> bool {
        true
    }
}

/// Who is being hailed.
#[derive(Debug, Clone)]
pub enum HailTarget {
    Ship(ShipHandle),
    Planet(StellarObject),
}

/// A conversation with another ship or a planet.
///
/// Pressing `b` pays off a hailed ship's government; when the surface is then
/// dismissed the controller is told so it can call off their attack.
pub struct HailPanel {
    id: SurfaceId,
    target: HailTarget,
    caption: String,
    bribed: Option<GovernmentRef>,
    completions: CompletionSender,
}

impl HailPanel {
    pub const BRIBE_KEY: Key = Key::char('b');

    pub fn new(target: HailTarget, completions: CompletionSender) -> Self {
        let caption = match &target {
            HailTarget::Ship(ship) => {
                let ship = ship.read();
                format!("Hailing the {} \"{}\".", ship.model_name, ship.name)
            }
            HailTarget::Planet(object) => format!("Hailing {}.", object.name),
        };
        Self {
            id: SurfaceId::next(),
            target,
            caption,
            bribed: None,
            completions,
        }
    }

    pub fn target(&self) -> &HailTarget {
        &self.target
    }
}

impl Surface for HailPanel {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn name(&self) -> &'static str {
        "hail"
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.caption)
    }

    fn draw(&mut self, _ui: &dyn Ui, out: &mut DrawList) {
        out.text(self.caption.clone(), Vec2::ZERO, 14, TEXT_COLOR);
    }

    fn key_down(&mut self, ui: &mut dyn Ui, key: Key, _: Modifiers, _: Command, _: bool) -> bool {
        if key == Self::BRIBE_KEY {
            if let HailTarget::Ship(ship) = &self.target {
                self.bribed = Some(ship.read().government.clone());
            }
        } else if is_dismiss_key(key) {
            if let Some(government) = self.bribed.take() {
                self.completions.send(Completion::HailBribe(government));
            }
            ui.pop(self.id);
        }
        true
    }
}

/// The landed view. Departing reports back so the flight view can be rebuilt.
pub struct PlanetPanel {
    id: SurfaceId,
    planet: Arc<Planet>,
    completions: CompletionSender,
}

impl PlanetPanel {
    pub const DEPART_KEY: Key = Key::char('d');

    pub fn new(planet: Arc<Planet>, completions: CompletionSender) -> Self {
        Self {
            id: SurfaceId::next(),
            planet,
            completions,
        }
    }

    pub fn planet(&self) -> &Planet {
        &self.planet
    }
}

impl Surface for PlanetPanel {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn name(&self) -> &'static str {
        "planet"
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.planet.name)
    }

    fn key_down(&mut self, ui: &mut dyn Ui, key: Key, _: Modifiers, _: Command, _: bool) -> bool {
        if key == Self::DEPART_KEY || key == Key::ESCAPE {
            self.completions.send(Completion::LandingComplete);
            ui.pop(self.id);
        }
        true
    }

    fn is_full_screen(&self) -> bool {
        true
    }
}

/// Plunder a disabled hostile ship.
pub struct BoardingPanel {
    id: SurfaceId,
    target: ShipHandle,
    caption: String,
}

impl BoardingPanel {
    pub fn new(target: ShipHandle) -> Self {
        let caption = format!("Boarding {}.", target.read().name);
        Self {
            id: SurfaceId::next(),
            target,
            caption,
        }
    }

    pub fn target(&self) -> &ShipHandle {
        &self.target
    }
}

impl Surface for BoardingPanel {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn name(&self) -> &'static str {
        "boarding"
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.caption)
    }

    fn key_down(&mut self, ui: &mut dyn Ui, key: Key, _: Modifiers, _: Command, _: bool) -> bool {
        if is_dismiss_key(key) {
            ui.pop(self.id);
        }
        true
    }
}
