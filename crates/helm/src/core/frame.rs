use std::time::Instant;
use glam::Vec2;
use crate::api::collaborators::{PanelCallbacks, Player, Simulation};
use crate::api::config::{ControllerConfig, Preferences};
use crate::api::types::{Importance, SurfaceId};
use crate::core::event_queue::EventQueue;
use crate::core::hail::{resolve_hail, HailOutcome};
use crate::core::help::{gate_help, LostTracker};
use crate::core::load::LoadMeter;
use crate::core::messages::MessageLog;
use crate::input::command::{Command, Key, OverlayRequest};
use crate::input::drag::DragSelect;
use crate::input::keyboard::{KeyboardState, Modifiers};
use crate::render::draw::DrawList;
use crate::ui::completion::{completion_channel, Completion, CompletionReceiver, CompletionSender};
use crate::ui::panels::{HailPanel, HailTarget, InfoPanel, MapPanel, PlanetPanel};
use crate::ui::surface::{Surface, Ui};
use crate::world::government::GovernmentRef;

const LOAD_COLOR: [f32; 4] = [0.6, 0.6, 0.6, 1.0];
const DRAG_LINE_WIDTH: f32 = 0.8;
const FRAME_DT: f64 = 1.0 / 60.0;

/// The flight view: the root surface that runs the simulation and turns what
/// happens in it into dialogs and panels.
///
/// Each frame it decides whether the simulation may advance (only while this
/// is the top surface), feeds the simulation's events to the player, and
/// stops handling events the moment one of them opens a surface. An event
/// left at the head of the queue is picked up again on a later frame without
/// repeating what was already done for it.
pub struct FrameController<S: Simulation, P: Player> {
    pub(crate) id: SurfaceId,
    pub(crate) simulation: S,
    pub(crate) player: P,
    pub(crate) config: ControllerConfig,
    pub(crate) preferences: Preferences,
    keyboard: KeyboardState,
    pub(crate) queue: EventQueue,
    show: OverlayRequest,
    lost: LostTracker,
    drag: DragSelect,
    can_click: bool,
    messages: MessageLog,
    load: LoadMeter,
    completion_tx: CompletionSender,
    completion_rx: CompletionReceiver,
}

impl<S: Simulation, P: Player> FrameController<S, P> {
    pub fn new(simulation: S, player: P, config: ControllerConfig, keyboard: KeyboardState) -> Self {
        let (completion_tx, completion_rx) = completion_channel();
        let load = LoadMeter::new(config.load_sample_frames, FRAME_DT);
        Self {
            id: SurfaceId::next(),
            simulation,
            player,
            config,
            preferences: Preferences::default(),
            keyboard,
            queue: EventQueue::new(),
            show: OverlayRequest::None,
            lost: LostTracker::new(),
            drag: DragSelect::new(),
            can_click: false,
            messages: MessageLog::new(),
            load,
            completion_tx,
            completion_rx,
        }
    }

    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// Post messages to a log shared with the host.
    pub fn with_messages(mut self, messages: MessageLog) -> Self {
        self.messages = messages;
        self
    }

    pub fn simulation(&self) -> &S {
        &self.simulation
    }

    pub fn simulation_mut(&mut self) -> &mut S {
        &mut self.simulation
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn queue(&self) -> &EventQueue {
        &self.queue
    }

    pub fn lost(&self) -> &LostTracker {
        &self.lost
    }

    pub fn overlay_request(&self) -> OverlayRequest {
        self.show
    }

    /// Whether clicks reach the simulation. False for the frame after
    /// another surface covered this one.
    pub fn can_click(&self) -> bool {
        self.can_click
    }

    pub fn drag_select(&self) -> &DragSelect {
        &self.drag
    }

    /// Handed to surfaces that report back when they close.
    pub fn completion_sender(&self) -> CompletionSender {
        self.completion_tx.clone()
    }

    fn apply_completions(&mut self) {
        let pending: Vec<Completion> = self.completion_rx.try_iter().collect();
        for completion in pending {
            match completion {
                Completion::LandingComplete => self.on_landing_complete(),
                Completion::HailBribe(government) => self.on_hail_bribe_complete(&government),
            }
        }
    }

    /// Open whatever the last frame's input asked for. Returns whether a
    /// surface was pushed.
    fn open_requested_overlay(&mut self, ui: &mut dyn Ui) -> bool {
        match std::mem::take(&mut self.show) {
            OverlayRequest::None => false,
            OverlayRequest::Map => {
                ui.push(Box::new(MapPanel::new()));
                true
            }
            OverlayRequest::Info => {
                ui.push(Box::new(InfoPanel::new()));
                true
            }
            OverlayRequest::Hail => self.show_hail_panel(ui),
        }
    }

    fn show_hail_panel(&mut self, ui: &mut dyn Ui) -> bool {
        let flagship = self.player.flagship();
        let outcome = resolve_hail(
            flagship.as_ref(),
            self.player.current_system(),
            self.keyboard.modifiers(),
            &self.config.wormhole_hail,
        );
        let target = match outcome {
            HailOutcome::Refused(message) => {
                self.messages.add(message, Importance::High);
                return false;
            }
            HailOutcome::Ship(ship) => HailTarget::Ship(ship),
            HailOutcome::Planet(object) => HailTarget::Planet(object),
        };
        ui.push(Box::new(HailPanel::new(target, self.completion_tx.clone())));
        true
    }

    /// Push the landing surface if the player has just landed somewhere
    /// other than a wormhole. Returns whether it did.
    fn land_if_arrived(&mut self, ui: &mut dyn Ui) -> bool {
        let Some(planet) = self.player.landed_planet().filter(|p| !p.is_wormhole) else {
            return false;
        };
        log::info!("landed on {}", planet.name);
        ui.push(Box::new(PlanetPanel::new(planet, self.completion_tx.clone())));
        self.player.land(ui);
        // Save now in case the process is killed while landed.
        if let Err(err) = self.player.save() {
            log::warn!("failed to save after landing: {}", err);
        }
        true
    }

    fn step_help(&mut self, ui: &mut dyn Ui) -> bool {
        let Some(flagship) = self.player.flagship() else {
            return true;
        };
        gate_help(
            &self.player,
            &flagship,
            &mut self.preferences,
            &self.config,
            &mut self.lost,
            ui,
        )
    }

    fn set_button_conditions(&self, out: &mut DrawList) {
        let zoom = self.player.map_zoom();
        if zoom >= self.config.map_max_zoom {
            out.set_condition("max zoom");
        }
        if zoom <= self.config.map_min_zoom {
            out.set_condition("min zoom");
        }

        let Some(flagship) = self.player.flagship() else {
            return;
        };
        let (has_stellar, target, targets_asteroid, can_cloak, has_secondary) = {
            let ship = flagship.read();
            (
                ship.target_stellar.is_some(),
                ship.target_ship(),
                ship.targets_asteroid,
                ship.attribute("cloak") != 0.0,
                ship.outfits.iter().any(|stack| stack.outfit.has_icon),
            )
        };

        if has_stellar {
            out.set_condition("can hail");
        }

        let mut has_fighters = false;
        let mut has_reserve = false;
        for ship in self.player.ships() {
            let ship = ship.read();
            if ship.can_be_carried && !ship.is_parked && !ship.is_destroyed {
                has_fighters = true;
                if !ship.has_deploy_order {
                    has_reserve = true;
                    break;
                }
            }
        }
        if has_fighters {
            out.set_condition(if has_reserve { "can deploy" } else { "can recall" });
        }

        if let Some(target) = target {
            out.set_condition("can hail");
            out.set_condition("can scan");
            if !target.read().is_yours() {
                out.set_condition("can attack");
            }
        } else if targets_asteroid {
            out.set_condition("targeting asteroid");
        } else if can_cloak {
            out.set_condition("can cloak");
        }

        if has_secondary {
            out.set_condition("has secondary");
            if self.player.selected_secondary_count() > 0 {
                out.set_condition("secondary selected");
            }
        }
    }
}

impl<S: Simulation, P: Player> PanelCallbacks for FrameController<S, P> {
    /// The landing surface closed: put the fleet back in space and run one
    /// tick so the new positions are filled in before the next frame.
    fn on_landing_complete(&mut self) {
        log::info!("departing");
        self.player.take_off();
        self.simulation.place();
        self.simulation.resume();
        self.simulation.join();
        self.simulation.step_async(true);
        // The step above ran while the landing surface was still on top as
        // far as the simulation knew, so the next tick must be started here.
        self.simulation.resume();
    }

    fn on_hail_bribe_complete(&mut self, government: &GovernmentRef) {
        log::info!("bribed {}", government.name);
        self.simulation.break_targeting(government);
    }
}

impl<S: Simulation + 'static, P: Player + 'static> Surface for FrameController<S, P> {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn name(&self) -> &'static str {
        "main"
    }

    fn step(&mut self, ui: &mut dyn Ui) {
        self.apply_completions();

        // Only surfaces already committed count; anything pushed since
        // last frame has not been drawn yet.
        let mut is_active = ui.is_top(self.id);

        if self.open_requested_overlay(ui) {
            is_active = false;
        }

        if is_active && self.land_if_arrived(ui) {
            is_active = false;
        }

        if is_active {
            is_active = self.step_help(ui);
        }

        self.simulation.step_async(is_active);

        let produced = self.simulation.drain_produced_events();
        if !produced.is_empty() {
            log::trace!("{} new ship events", produced.len());
        }
        self.queue.splice(produced);
        self.step_events(&mut is_active, ui);

        if is_active {
            self.simulation.resume();
        } else {
            self.simulation.suspend();
            self.drag.cancel();
        }
        self.can_click = is_active;
    }

    fn draw(&mut self, ui: &dyn Ui, out: &mut DrawList) {
        let started = Instant::now();
        self.simulation.draw(out);

        if self.drag.is_dragging() {
            if self.drag.can_drag() {
                for (from, to) in self.drag.outline() {
                    out.line(from, to, DRAG_LINE_WIDTH, self.config.drag_color);
                }
            } else {
                self.drag.clear_dragging();
            }
        }

        if self.preferences.show_load {
            out.text(self.load.label(), Vec2::new(10.0, 5.0), 14, LOAD_COLOR);
            self.load.record(started.elapsed());
        }

        if ui.top() == Some(self.id) && self.preferences.show_buttons_on_map {
            self.set_button_conditions(out);
        }
    }

    fn key_down(
        &mut self,
        _ui: &mut dyn Ui,
        key: Key,
        modifiers: Modifiers,
        command: Command,
        _is_new_press: bool,
    ) -> bool {
        if command.has(Command::MAP | Command::INFO | Command::HAIL) {
            self.show = OverlayRequest::from_command(command);
        } else if command.has(Command::AMMO) {
            let usage = self.preferences.toggle_ammo_usage();
            self.messages.add(
                format!("Your escorts will now expend ammo: {}.", usage.as_str()),
                Importance::High,
            );
        } else if key.is_zoom_out() && command.is_empty() {
            self.preferences.zoom_view_out();
        } else if key.is_zoom_in() && command.is_empty() {
            self.preferences.zoom_view_in();
        } else if let Some(group) = key.digit().filter(|_| command.is_empty()) {
            let control = modifiers.control() || modifiers.has(Modifiers::GUI);
            self.simulation.select_group(group, modifiers.shift(), control);
        } else {
            return false;
        }
        true
    }

    fn click(&mut self, _ui: &mut dyn Ui, at: Vec2, _clicks: u32) -> bool {
        // Swallow clicks meant for a surface that just closed.
        if !self.can_click {
            return true;
        }
        let modifiers = self.keyboard.modifiers();
        self.drag.begin(at, modifiers);
        self.simulation.click(at, at, self.drag.shift(), self.drag.control());
        true
    }

    fn rclick(&mut self, _ui: &mut dyn Ui, at: Vec2) -> bool {
        self.simulation.rclick(at);
        true
    }

    fn drag(&mut self, _ui: &mut dyn Ui, delta: Vec2) -> bool {
        self.drag.extend(delta);
        true
    }

    fn release(&mut self, _ui: &mut dyn Ui, at: Vec2) -> bool {
        if let Some((from, to)) = self.drag.release(at, self.config.drag_threshold) {
            self.simulation.click(from, to, self.drag.shift(), self.drag.control());
        }
        true
    }

    fn scroll(&mut self, _ui: &mut dyn Ui, delta: Vec2) -> bool {
        if delta.y < 0.0 {
            self.preferences.zoom_view_out();
        } else if delta.y > 0.0 {
            self.preferences.zoom_view_in();
        } else {
            return false;
        }
        true
    }

    fn finger_down(&mut self, _ui: &mut dyn Ui, at: Vec2, finger: i32) -> bool {
        if !self.can_click {
            return false;
        }
        self.simulation.finger_down(at, finger)
    }

    fn finger_move(&mut self, _ui: &mut dyn Ui, at: Vec2, finger: i32) -> bool {
        if !self.can_click {
            return false;
        }
        self.simulation.finger_move(at, finger)
    }

    fn finger_up(&mut self, _ui: &mut dyn Ui, at: Vec2, finger: i32) -> bool {
        self.simulation.finger_up(at, finger)
    }

    fn is_full_screen(&self) -> bool {
        true
    }

    fn allows_fast_forward(&self) -> bool {
        true
    }
}
