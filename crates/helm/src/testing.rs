//! Fakes and builders shared by the unit tests.

use std::cell::Cell;
use std::collections::VecDeque;
use std::sync::Arc;
use glam::Vec2;
use crate::api::collaborators::{BlockedTrigger, NarrativeState, Player, Simulation};
use crate::api::config::ControllerConfig;
use crate::api::error::SaveError;
use crate::api::types::{GovernmentId, NarrativeId, ShipId, SurfaceId, SystemId};
use crate::core::event::{EventKind, ShipEvent};
use crate::core::frame::FrameController;
use crate::input::keyboard::KeyboardState;
use crate::render::draw::DrawList;
use crate::ui::panels::Dialog;
use crate::ui::surface::{Surface, Ui};
use crate::world::government::{Government, GovernmentRef};
use crate::world::planet::Planet;
use crate::world::ship::{Outfit, Ship, ShipHandle};

pub(crate) const SOL: SystemId = SystemId(1);

pub(crate) fn player_government() -> GovernmentRef {
    Arc::new(Government::player(GovernmentId(0)))
}

pub(crate) fn hostile_government(id: u32, name: &str) -> GovernmentRef {
    Arc::new(Government::new(GovernmentId(id), name).with_enemy(true))
}

pub(crate) fn ally_government() -> GovernmentRef {
    Arc::new(Government::new(GovernmentId(2), "Republic"))
}

/// A ship in Sol.
pub(crate) fn ship(id: u32, government: GovernmentRef) -> ShipHandle {
    ShipHandle::new(Ship::new(ShipId(id), government).with_name(format!("Ship {id}")).in_system(SOL))
}

/// A player-owned ship in Sol with room for cargo and passengers.
pub(crate) fn flagship() -> ShipHandle {
    ShipHandle::new(
        Ship::new(ShipId(1), player_government())
            .with_name("Flagship")
            .with_capacity(20, 4)
            .in_system(SOL),
    )
}

pub(crate) fn outfit(name: &str, category: &str) -> Outfit {
    Outfit::new(name, category)
}

/// Default tuning without any help text, so no tutorial interrupts a test
/// unless it adds one.
pub(crate) fn quiet_config() -> ControllerConfig {
    ControllerConfig {
        help_messages: Default::default(),
        ..ControllerConfig::default()
    }
}

pub(crate) type TestController = FrameController<FakeSimulation, FakePlayer>;

pub(crate) fn controller(player: FakePlayer) -> (TestController, FakeUi) {
    let controller = FrameController::new(
        FakeSimulation::default(),
        player,
        quiet_config(),
        KeyboardState::new(),
    );
    let ui = FakeUi::rooted(controller.id);
    (controller, ui)
}

/// One frame as the panel stack runs it: commit, then step.
pub(crate) fn frame(controller: &mut TestController, ui: &mut FakeUi) {
    ui.commit();
    controller.step(ui);
}

/// A panel stack whose root is a surface the test holds directly.
pub(crate) struct FakeUi {
    root: Option<SurfaceId>,
    surfaces: Vec<Box<dyn Surface>>,
    pending: Vec<Box<dyn Surface>>,
    to_pop: Vec<SurfaceId>,
}

impl FakeUi {
    pub(crate) fn new() -> Self {
        Self {
            root: None,
            surfaces: Vec::new(),
            pending: Vec::new(),
            to_pop: Vec::new(),
        }
    }

    pub(crate) fn rooted(root: SurfaceId) -> Self {
        Self {
            root: Some(root),
            ..Self::new()
        }
    }

    fn committed_top(&self) -> Option<SurfaceId> {
        self.surfaces.last().map(|s| s.id()).or(self.root)
    }

    pub(crate) fn commit(&mut self) {
        self.surfaces.append(&mut self.pending);
        let to_pop = std::mem::take(&mut self.to_pop);
        self.surfaces.retain(|s| !to_pop.contains(&s.id()));
    }

    /// Close the top surface above the root, as if the player dismissed it.
    pub(crate) fn dismiss_top(&mut self) {
        self.commit();
        self.surfaces.pop();
    }

    /// Committed surfaces above the root, bottom first.
    pub(crate) fn names(&self) -> Vec<&'static str> {
        self.surfaces.iter().map(|s| s.name()).collect()
    }

    pub(crate) fn captions(&self) -> Vec<String> {
        self.surfaces
            .iter()
            .filter_map(|s| s.caption().map(str::to_string))
            .collect()
    }

    pub(crate) fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

impl Ui for FakeUi {
    fn push(&mut self, surface: Box<dyn Surface>) {
        self.pending.push(surface);
    }

    fn pop(&mut self, id: SurfaceId) {
        self.to_pop.push(id);
    }

    fn is_top(&self, id: SurfaceId) -> bool {
        self.committed_top() == Some(id)
    }

    fn top(&self) -> Option<SurfaceId> {
        self.pending.last().map(|s| s.id()).or_else(|| self.committed_top())
    }
}

/// Records every call; produces scripted events, one batch per step.
#[derive(Default)]
pub(crate) struct FakeSimulation {
    pub calls: Vec<&'static str>,
    pub steps: Vec<bool>,
    script: VecDeque<Vec<ShipEvent>>,
    produced: Vec<ShipEvent>,
    pub clicks: Vec<(Vec2, Vec2, bool, bool)>,
    pub rclicks: Vec<Vec2>,
    pub groups: Vec<(u8, bool, bool)>,
    pub broken: Vec<GovernmentId>,
    pub fingers: Vec<(&'static str, i32)>,
}

impl FakeSimulation {
    /// Have the next step produce `events`.
    pub(crate) fn queue_events(&mut self, events: Vec<ShipEvent>) {
        self.script.push_back(events);
    }

    pub(crate) fn count(&self, call: &str) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }
}

impl Simulation for FakeSimulation {
    fn join(&mut self) {
        self.calls.push("join");
    }

    fn step_async(&mut self, active: bool) {
        self.calls.push("step");
        self.steps.push(active);
        if let Some(batch) = self.script.pop_front() {
            self.produced.extend(batch);
        }
    }

    fn drain_produced_events(&mut self) -> Vec<ShipEvent> {
        std::mem::take(&mut self.produced)
    }

    fn resume(&mut self) {
        self.calls.push("resume");
    }

    fn suspend(&mut self) {
        self.calls.push("suspend");
    }

    fn place(&mut self) {
        self.calls.push("place");
    }

    fn break_targeting(&mut self, government: &GovernmentRef) {
        self.broken.push(government.id);
    }

    fn click(&mut self, from: Vec2, to: Vec2, shift: bool, control: bool) {
        self.clicks.push((from, to, shift, control));
    }

    fn rclick(&mut self, at: Vec2) {
        self.rclicks.push(at);
    }

    fn select_group(&mut self, group: u8, shift: bool, control: bool) {
        self.groups.push((group, shift, control));
    }

    fn finger_down(&mut self, _at: Vec2, finger: i32) -> bool {
        self.fingers.push(("down", finger));
        true
    }

    fn finger_move(&mut self, _at: Vec2, finger: i32) -> bool {
        self.fingers.push(("move", finger));
        true
    }

    fn finger_up(&mut self, _at: Vec2, finger: i32) -> bool {
        self.fingers.push(("up", finger));
        true
    }

    fn draw(&self, out: &mut DrawList) {
        out.text("world", Vec2::ZERO, 10, [1.0; 4]);
    }
}

/// A scriptable player.
pub(crate) struct FakePlayer {
    pub government: GovernmentRef,
    pub flagship: Option<ShipHandle>,
    pub ships: Vec<ShipHandle>,
    pub system: Option<SystemId>,
    pub has_fuel: bool,
    pub landed: Option<Arc<Planet>>,
    pub days: u32,
    pub carrier_help: bool,
    pub map_zoom: i32,
    pub secondary_selected: usize,
    pub fail_save: bool,
    pub saves: Cell<u32>,
    pub landings: u32,
    pub take_offs: u32,
    /// Every event passed to `handle_event`, by kind.
    pub handled: Vec<EventKind>,
    /// `handle_event` opens a dialog for events of these kinds.
    pub dialog_on: EventKind,
    pub narrative: Option<NarrativeId>,
    pub narrative_has_space: bool,
    pub offer_pushes_dialog: bool,
    pub blocked_destroys_target: bool,
    pub offers: Vec<NarrativeId>,
    pub blocked: Vec<BlockedTrigger>,
    last_boarded: Option<ShipHandle>,
}

impl FakePlayer {
    pub(crate) fn new() -> Self {
        Self {
            government: player_government(),
            flagship: None,
            ships: Vec::new(),
            system: Some(SOL),
            has_fuel: true,
            landed: None,
            days: 0,
            carrier_help: false,
            map_zoom: 0,
            secondary_selected: 0,
            fail_save: false,
            saves: Cell::new(0),
            landings: 0,
            take_offs: 0,
            handled: Vec::new(),
            dialog_on: EventKind::NONE,
            narrative: None,
            narrative_has_space: false,
            offer_pushes_dialog: false,
            blocked_destroys_target: false,
            offers: Vec::new(),
            blocked: Vec::new(),
            last_boarded: None,
        }
    }

    pub(crate) fn with_flagship(flagship: ShipHandle) -> Self {
        let government = flagship.read().government.clone();
        Self {
            government,
            ships: vec![flagship.clone()],
            flagship: Some(flagship),
            ..Self::new()
        }
    }
}

impl NarrativeState for FakePlayer {
    fn find_boarding_narrative(&mut self, target: &ShipHandle) -> Option<NarrativeId> {
        self.last_boarded = Some(target.clone());
        self.narrative
    }

    fn has_space(&self, _narrative: NarrativeId, _flagship: &Ship) -> bool {
        self.narrative_has_space
    }

    fn offer(&mut self, narrative: NarrativeId, _target: &ShipHandle, ui: &mut dyn Ui) {
        self.offers.push(narrative);
        if self.offer_pushes_dialog {
            ui.push(Box::new(Dialog::new("Will you help us?")));
        }
    }

    fn handle_blocked_narrative(&mut self, trigger: BlockedTrigger, _ui: &mut dyn Ui) {
        self.blocked.push(trigger);
        if self.blocked_destroys_target {
            if let Some(target) = &self.last_boarded {
                target.write().is_destroyed = true;
            }
        }
    }
}

impl Player for FakePlayer {
    fn flagship(&self) -> Option<ShipHandle> {
        self.flagship.clone()
    }

    fn ships(&self) -> &[ShipHandle] {
        &self.ships
    }

    fn current_system(&self) -> Option<SystemId> {
        self.system
    }

    fn system_has_fuel_for(&self, _ship: &Ship) -> bool {
        self.has_fuel
    }

    fn landed_planet(&self) -> Option<Arc<Planet>> {
        self.landed.clone()
    }

    fn land(&mut self, _ui: &mut dyn Ui) {
        self.landings += 1;
    }

    fn take_off(&mut self) {
        self.landed = None;
        self.take_offs += 1;
    }

    fn save(&self) -> Result<(), SaveError> {
        self.saves.set(self.saves.get() + 1);
        if self.fail_save {
            Err(SaveError::NoPath)
        } else {
            Ok(())
        }
    }

    fn days_since_start(&self) -> u32 {
        self.days
    }

    fn display_carrier_help(&self) -> bool {
        self.carrier_help
    }

    fn map_zoom(&self) -> i32 {
        self.map_zoom
    }

    fn selected_secondary_count(&self) -> usize {
        self.secondary_selected
    }

    fn handle_event(&mut self, event: &ShipEvent, ui: &mut dyn Ui) {
        self.handled.push(event.kind());
        if event.kind().intersects(self.dialog_on) {
            ui.push(Box::new(Dialog::new("Mission update.")));
        }
    }
}
