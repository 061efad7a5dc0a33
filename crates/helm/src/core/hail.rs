use crate::api::types::SystemId;
use crate::input::keyboard::Modifiers;
use crate::world::planet::StellarObject;
use crate::world::ship::ShipHandle;

/// What a hail request turned into.
#[derive(Debug, Clone)]
pub enum HailOutcome {
    /// Nothing to open; tell the player why.
    Refused(String),
    Ship(ShipHandle),
    Planet(StellarObject),
}

impl HailOutcome {
    pub fn opens_panel(&self) -> bool {
        !matches!(self, HailOutcome::Refused(_))
    }
}

fn refused(message: impl Into<String>) -> HailOutcome {
    HailOutcome::Refused(message.into())
}

/// Decide whether the flagship can hail its current target.
///
/// Holding shift while a planet is targeted hails the planet even if a ship
/// is also targeted. `modifiers` must be the keys held now, not those of the
/// keypress that asked for the hail.
pub fn resolve_hail(
    flagship: Option<&ShipHandle>,
    current_system: Option<SystemId>,
    modifiers: Modifiers,
    wormhole_phrase: &str,
) -> HailOutcome {
    let Some(flagship) = flagship else {
        return refused("Unable to send hail: you have no flagship.");
    };

    // Copy what is needed out of the flagship so no two ship locks are held at once.
    let (target_ship, target_stellar) = {
        let ship = flagship.read();
        if ship.is_destroyed {
            return refused("Unable to send hail: your flagship has been destroyed.");
        }
        if ship.zoom < 1.0 {
            return refused("Unable to send hail: your flagship is landing or taking off.");
        }
        if ship.is_entering_hyperspace {
            return refused("Unable to send hail: your flagship is entering hyperspace.");
        }
        if ship.cloaking == 1.0 {
            return refused("Unable to send hail: your flagship is cloaked.");
        }
        (ship.target_ship(), ship.target_stellar.clone())
    };

    let target_ship = if modifiers.shift() && target_stellar.is_some() {
        None
    } else {
        target_ship
    };

    if let Some(target) = target_ship {
        let verdict = {
            let ship = target.read();
            // Out of system is reported generically: the player cannot tell
            // whether the target is mid-jump.
            if ship.zoom < 1.0
                || ship.is_destroyed
                || ship.system != current_system
                || ship.cloaking == 1.0
            {
                Some(format!("Unable to hail target {}.", ship.noun))
            } else if ship.is_entering_hyperspace {
                Some(format!("Unable to send hail: {} is entering hyperspace.", ship.noun))
            } else {
                None
            }
        };
        return match verdict {
            Some(message) => HailOutcome::Refused(message),
            None => HailOutcome::Ship(target),
        };
    }

    let Some(object) = target_stellar else {
        return refused("Unable to send hail: no target selected.");
    };
    match &object.planet {
        None => refused("Unable to send hail."),
        Some(planet) if planet.is_wormhole => refused(wormhole_phrase),
        Some(planet) if planet.is_inhabited => HailOutcome::Planet(object),
        Some(planet) => refused(format!("Unable to send hail: {} is not inhabited.", planet.noun)),
    }
}
