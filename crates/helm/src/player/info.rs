use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use serde::Serialize;
use crate::api::collaborators::{BlockedTrigger, NarrativeState, Player};
use crate::api::error::SaveError;
use crate::api::types::{NarrativeId, SystemId};
use crate::core::event::{EventKind, ShipEvent};
use crate::player::mission::Mission;
use crate::ui::panels::Dialog;
use crate::ui::surface::Ui;
use crate::world::planet::Planet;
use crate::world::ship::{Ship, ShipHandle};

/// What gets written to disk on save.
#[derive(Serialize)]
struct PlayerSummary<'a> {
    name: &'a str,
    system: Option<SystemId>,
    days: u32,
    planet: Option<&'a str>,
    fleet: Vec<String>,
    conditions: &'a BTreeMap<String, i64>,
    missions: Vec<&'a str>,
}

/// The player's fleet, whereabouts, condition counters and missions.
pub struct PlayerInfo {
    name: String,
    ships: Vec<ShipHandle>,
    system: Option<SystemId>,
    fuel_systems: HashSet<SystemId>,
    landed: Option<Arc<Planet>>,
    days: u32,
    conditions: BTreeMap<String, i64>,
    missions: Vec<Mission>,
    map_zoom: i32,
    selected_secondary: usize,
    save_path: Option<PathBuf>,
    /// Mission found by the last boarding, for the blocked message.
    last_boarding: Option<NarrativeId>,
}

impl PlayerInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ships: Vec::new(),
            system: None,
            fuel_systems: HashSet::new(),
            landed: None,
            days: 0,
            conditions: BTreeMap::new(),
            missions: Vec::new(),
            map_zoom: 0,
            selected_secondary: 0,
            save_path: None,
            last_boarding: None,
        }
    }

    // -- Builder pattern --

    pub fn with_ship(mut self, ship: ShipHandle) -> Self {
        self.ships.push(ship);
        self
    }

    pub fn in_system(mut self, system: SystemId) -> Self {
        self.system = Some(system);
        self
    }

    pub fn with_fuel_in(mut self, system: SystemId) -> Self {
        self.fuel_systems.insert(system);
        self
    }

    pub fn with_mission(mut self, mission: Mission) -> Self {
        self.missions.push(mission);
        self
    }

    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = Some(path.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_ship(&mut self, ship: ShipHandle) {
        self.ships.push(ship);
    }

    pub fn set_system(&mut self, system: SystemId) {
        self.system = Some(system);
    }

    /// Record that the flagship has touched down on `planet`.
    pub fn set_landed(&mut self, planet: Arc<Planet>) {
        self.landed = Some(planet);
    }

    pub fn advance_day(&mut self) {
        self.days += 1;
    }

    pub fn set_map_zoom(&mut self, zoom: i32) {
        self.map_zoom = zoom;
    }

    pub fn set_selected_secondary(&mut self, count: usize) {
        self.selected_secondary = count;
    }

    pub fn condition(&self, name: &str) -> i64 {
        self.conditions.get(name).copied().unwrap_or(0)
    }

    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    fn mission_mut(&mut self, id: NarrativeId) -> Option<&mut Mission> {
        self.missions.iter_mut().find(|m| m.id == id)
    }

    fn add_condition(&mut self, name: &str, amount: i64) {
        *self.conditions.entry(name.to_string()).or_insert(0) += amount;
    }
}

impl NarrativeState for PlayerInfo {
    fn find_boarding_narrative(&mut self, target: &ShipHandle) -> Option<NarrativeId> {
        let target = target.id();
        let found = self.missions.iter().find(|m| m.is_offered_by(target)).map(|m| m.id);
        self.last_boarding = found;
        found
    }

    fn has_space(&self, narrative: NarrativeId, flagship: &Ship) -> bool {
        self.missions
            .iter()
            .find(|m| m.id == narrative)
            .map_or(false, |m| m.has_space(flagship))
    }

    fn offer(&mut self, narrative: NarrativeId, target: &ShipHandle, ui: &mut dyn Ui) {
        let Some(mission) = self.mission_mut(narrative) else {
            log::warn!("offered unknown mission {:?}", narrative);
            return;
        };
        mission.accept();
        let text = mission.offer_text.clone();
        log::info!("accepted mission \"{}\" from ship {:?}", mission.name, target.id());
        ui.push(Box::new(Dialog::new(text)));
    }

    fn handle_blocked_narrative(&mut self, trigger: BlockedTrigger, ui: &mut dyn Ui) {
        let Some(id) = self.last_boarding.take() else {
            return;
        };
        if let Some(mission) = self.missions.iter().find(|m| m.id == id) {
            ui.push(Box::new(Dialog::new(mission.blocked_message(trigger))));
        }
    }
}

impl Player for PlayerInfo {
    /// The first ship that is neither parked, destroyed, nor carried.
    fn flagship(&self) -> Option<ShipHandle> {
        self.ships
            .iter()
            .find(|ship| {
                let ship = ship.read();
                !ship.is_parked && !ship.is_destroyed && !ship.can_be_carried
            })
            .cloned()
    }

    fn ships(&self) -> &[ShipHandle] {
        &self.ships
    }

    fn current_system(&self) -> Option<SystemId> {
        self.system
    }

    fn system_has_fuel_for(&self, _ship: &Ship) -> bool {
        self.system.map_or(false, |system| self.fuel_systems.contains(&system))
    }

    fn landed_planet(&self) -> Option<Arc<Planet>> {
        self.landed.clone()
    }

    fn land(&mut self, _ui: &mut dyn Ui) {
        let Some(planet) = self.landed.clone() else {
            return;
        };
        self.add_condition("landings", 1);
        self.add_condition(&format!("visited {}", planet.name), 1);
    }

    fn take_off(&mut self) {
        if let Some(planet) = self.landed.take() {
            log::info!("taking off from {}", planet.name);
        }
    }

    fn save(&self) -> Result<(), SaveError> {
        let path = self.save_path.as_ref().ok_or(SaveError::NoPath)?;
        let summary = PlayerSummary {
            name: &self.name,
            system: self.system,
            days: self.days,
            planet: self.landed.as_deref().map(|p| p.name.as_str()),
            fleet: self.ships.iter().map(|s| s.read().name.clone()).collect(),
            conditions: &self.conditions,
            missions: self
                .missions
                .iter()
                .filter(|m| m.is_accepted())
                .map(|m| m.name.as_str())
                .collect(),
        };
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(path, json).map_err(|source| SaveError::Io {
            path: path.clone(),
            source,
        })?;
        log::debug!("saved {} to {}", self.name, path.display());
        Ok(())
    }

    fn days_since_start(&self) -> u32 {
        self.days
    }

    /// A carrier is in the fleet and one of its fighters has a hold.
    fn display_carrier_help(&self) -> bool {
        let mut has_carrier = false;
        let mut has_cargo_fighter = false;
        for ship in &self.ships {
            let ship = ship.read();
            if ship.is_parked || ship.is_destroyed {
                continue;
            }
            has_carrier |= !ship.bays.is_empty();
            has_cargo_fighter |= ship.can_be_carried && ship.cargo_capacity > 0;
        }
        has_carrier && has_cargo_fighter
    }

    fn map_zoom(&self) -> i32 {
        self.map_zoom
    }

    fn selected_secondary_count(&self) -> usize {
        self.selected_secondary
    }

    fn handle_event(&mut self, event: &ShipEvent, ui: &mut dyn Ui) {
        if event.actor_is_player() {
            for (kind, name) in EventKind::NAMED {
                if event.kind().contains(kind) {
                    self.add_condition(&format!("ships {name}"), 1);
                }
            }
        }
        if event.target_is_player() && event.kind().contains(EventKind::DESTROY) {
            self.add_condition("ships lost", 1);
        }

        let dialogs: Vec<String> = self
            .missions
            .iter_mut()
            .flat_map(|mission| mission.fire_triggers(event))
            .collect();
        for dialog in dialogs {
            ui.push(Box::new(Dialog::new(dialog)));
        }
    }
}
