use serde::{Deserialize, Serialize};
use crate::api::collaborators::BlockedTrigger;
use crate::api::types::{NarrativeId, ShipId};
use crate::core::event::{EventKind, ShipEvent};
use crate::world::ship::Ship;

/// A dialog shown the first time something of `kind` happens to `ship`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpcTrigger {
    pub ship: ShipId,
    pub kind: EventKind,
    pub dialog: String,
    #[serde(default)]
    fired: bool,
}

impl NpcTrigger {
    pub fn new(ship: ShipId, kind: EventKind, dialog: impl Into<String>) -> Self {
        Self {
            ship,
            kind,
            dialog: dialog.into(),
            fired: false,
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

/// A narrative unit: offered when the flagship boards its target ship, and
/// afterwards reacting to what happens to the ships it names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    pub id: NarrativeId,
    pub name: String,
    /// Boarding this ship offers the mission.
    pub boarding_target: Option<ShipId>,
    /// Tons of cargo the mission puts in the flagship's hold.
    pub cargo: i32,
    pub passengers: i32,
    pub offer_text: String,
    /// Shown when the fleet has no room. `{action}` becomes "boarding" or
    /// "assisting".
    pub blocked_text: String,
    #[serde(default)]
    pub triggers: Vec<NpcTrigger>,
    #[serde(default)]
    accepted: bool,
}

impl Mission {
    pub fn new(id: NarrativeId, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            offer_text: format!("{name}: will you help?"),
            blocked_text: "You do not have enough space to accept a mission found while {action} this ship."
                .to_string(),
            name,
            boarding_target: None,
            cargo: 0,
            passengers: 0,
            triggers: Vec::new(),
            accepted: false,
        }
    }

    pub fn on_boarding(mut self, ship: ShipId) -> Self {
        self.boarding_target = Some(ship);
        self
    }

    pub fn with_cargo(mut self, tons: i32) -> Self {
        self.cargo = tons;
        self
    }

    pub fn with_passengers(mut self, passengers: i32) -> Self {
        self.passengers = passengers;
        self
    }

    pub fn with_offer(mut self, text: impl Into<String>) -> Self {
        self.offer_text = text.into();
        self
    }

    pub fn with_blocked(mut self, text: impl Into<String>) -> Self {
        self.blocked_text = text.into();
        self
    }

    pub fn with_trigger(mut self, trigger: NpcTrigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Not yet accepted, and offered by boarding `target`.
    pub fn is_offered_by(&self, target: ShipId) -> bool {
        !self.accepted && self.boarding_target == Some(target)
    }

    pub fn has_space(&self, flagship: &Ship) -> bool {
        self.cargo <= flagship.free_cargo() && self.passengers <= flagship.free_bunks()
    }

    pub fn blocked_message(&self, trigger: BlockedTrigger) -> String {
        let action = match trigger {
            BlockedTrigger::Boarding => "boarding",
            BlockedTrigger::Assisting => "assisting",
        };
        self.blocked_text.replace("{action}", action)
    }

    /// Dialogs for unfired triggers matching `event`. Each trigger fires once.
    pub fn fire_triggers(&mut self, event: &ShipEvent) -> Vec<String> {
        if !self.accepted {
            return Vec::new();
        }
        let Some(target) = event.target().map(|t| t.id()) else {
            return Vec::new();
        };
        self.triggers
            .iter_mut()
            .filter(|t| !t.fired && t.ship == target && event.kind().intersects(t.kind))
            .map(|t| {
                t.fired = true;
                t.dialog.clone()
            })
            .collect()
    }
}
