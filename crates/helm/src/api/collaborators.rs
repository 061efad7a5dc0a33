use std::sync::Arc;
use glam::Vec2;
use crate::api::error::SaveError;
use crate::api::types::{NarrativeId, SystemId};
use crate::core::event::ShipEvent;
use crate::render::draw::DrawList;
use crate::ui::surface::Ui;
use crate::world::government::GovernmentRef;
use crate::world::planet::Planet;
use crate::world::ship::{Ship, ShipHandle};

/// The world simulation the controller drives. Tick computation may happen
/// on another thread; everything here is called from the frame thread.
pub trait Simulation {
    /// Block until the tick requested by the last `resume` has finished.
    fn join(&mut self);

    /// Finish the in-flight tick (joining it first) and publish its results.
    /// `active` is false while a modal surface covers the flight view.
    fn step_async(&mut self, active: bool);

    /// Events produced since the last call, oldest first.
    fn drain_produced_events(&mut self) -> Vec<ShipEvent>;

    /// Start computing the next tick.
    fn resume(&mut self);

    /// Withhold the next tick.
    fn suspend(&mut self);

    /// Lay out ships around the planet the player is departing.
    fn place(&mut self);

    /// Make every ship of `government` stop targeting the player's fleet.
    fn break_targeting(&mut self, government: &GovernmentRef);

    /// A click (`from == to`) or box selection in screen space.
    fn click(&mut self, from: Vec2, to: Vec2, shift: bool, control: bool);

    fn rclick(&mut self, at: Vec2);

    /// Select, or with `control` assign, escort group `group`.
    fn select_group(&mut self, group: u8, shift: bool, control: bool);

    fn finger_down(&mut self, at: Vec2, finger: i32) -> bool;

    fn finger_move(&mut self, at: Vec2, finger: i32) -> bool;

    fn finger_up(&mut self, at: Vec2, finger: i32) -> bool;

    fn draw(&self, out: &mut DrawList);
}

/// Which kind of interaction a narrative could not be offered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockedTrigger {
    Boarding,
    Assisting,
}

/// Narrative units (missions) attached to ships the player interacts with.
pub trait NarrativeState {
    /// A narrative that triggers on boarding `target`, if any.
    fn find_boarding_narrative(&mut self, target: &ShipHandle) -> Option<NarrativeId>;

    /// Whether the player's fleet has room for what `narrative` would add.
    fn has_space(&self, narrative: NarrativeId, flagship: &Ship) -> bool;

    /// Offer `narrative` to the player. May push a surface.
    fn offer(&mut self, narrative: NarrativeId, target: &ShipHandle, ui: &mut dyn Ui);

    /// Tell the player why a narrative could not be offered. May push a surface.
    fn handle_blocked_narrative(&mut self, trigger: BlockedTrigger, ui: &mut dyn Ui);
}

/// The player's fleet, location and progress.
pub trait Player: NarrativeState {
    fn flagship(&self) -> Option<ShipHandle>;

    fn ships(&self) -> &[ShipHandle];

    fn fleet_size(&self) -> usize {
        self.ships().len()
    }

    fn current_system(&self) -> Option<SystemId>;

    /// Whether the current system can refuel `ship`.
    fn system_has_fuel_for(&self, ship: &Ship) -> bool;

    /// The planet the player has just landed on, if any.
    fn landed_planet(&self) -> Option<Arc<Planet>>;

    fn land(&mut self, ui: &mut dyn Ui);

    fn take_off(&mut self);

    fn save(&self) -> Result<(), SaveError>;

    fn days_since_start(&self) -> u32;

    /// Whether to suggest letting fighters ferry cargo.
    fn display_carrier_help(&self) -> bool;

    fn map_zoom(&self) -> i32;

    /// Number of secondary weapons currently selected to fire.
    fn selected_secondary_count(&self) -> usize;

    /// Update conditions and narratives for `event`. May push a surface.
    fn handle_event(&mut self, event: &ShipEvent, ui: &mut dyn Ui);
}

/// Entry points surfaces use to report their dismissal.
pub trait PanelCallbacks {
    fn on_landing_complete(&mut self);

    fn on_hail_bribe_complete(&mut self, government: &GovernmentRef);
}
