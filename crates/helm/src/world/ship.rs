use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, Weak};
use glam::Vec2;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use crate::api::types::{ShipId, SystemId};
use crate::world::government::GovernmentRef;
use crate::world::planet::StellarObject;

/// An installable or carriable piece of equipment.
#[derive(Debug, Clone)]
pub struct Outfit {
    pub name: String,
    pub plural_name: String,
    pub category: String,
    /// Tons per unit.
    pub mass: f64,
    /// Negative for raw materials that can only be hauled, never installed.
    pub installable: f64,
    /// Secondary weapons carry an icon on the main buttons.
    pub has_icon: bool,
}

impl Outfit {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            plural_name: format!("{}s", name),
            name,
            category: category.into(),
            mass: 1.0,
            installable: 1.0,
            has_icon: false,
        }
    }

    pub fn with_plural(mut self, plural: impl Into<String>) -> Self {
        self.plural_name = plural.into();
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Mark as a mined material: carried by the ton, never installed.
    pub fn minable(mut self) -> Self {
        self.installable = -1.0;
        self
    }

    pub fn with_icon(mut self) -> Self {
        self.has_icon = true;
        self
    }

    /// Name to show next to a count.
    pub fn display_for(&self, count: i32) -> &str {
        if count == 1 {
            &self.name
        } else {
            &self.plural_name
        }
    }
}

/// A number of identical outfits.
#[derive(Debug, Clone)]
pub struct OutfitStack {
    pub outfit: Arc<Outfit>,
    pub count: i32,
}

/// Everything in a ship's hold.
#[derive(Debug, Clone, Default)]
pub struct Cargo {
    /// Commodity name → tons.
    pub commodities: BTreeMap<String, i32>,
    pub outfits: Vec<OutfitStack>,
}

impl Cargo {
    /// Tons of hold space in use.
    pub fn used(&self) -> i32 {
        let commodities: i32 = self.commodities.values().sum();
        let outfits: i32 = self
            .outfits
            .iter()
            .map(|s| (f64::from(s.count) * s.outfit.mass).ceil() as i32)
            .sum();
        commodities + outfits
    }

    pub fn is_empty(&self) -> bool {
        self.commodities.values().all(|&t| t == 0) && self.outfits.iter().all(|s| s.count == 0)
    }
}

/// A fighter or drone bay, possibly holding a carried ship.
#[derive(Debug, Clone, Default)]
pub struct Bay {
    pub occupant: Option<BayOccupant>,
}

/// The model names of a carried ship, as a scan reports them.
#[derive(Debug, Clone)]
pub struct BayOccupant {
    pub model_name: String,
    pub plural_model_name: String,
}

/// A simulated ship. Owned behind a [`ShipHandle`] so both the simulation
/// worker and the frame thread can see it.
#[derive(Debug, Clone)]
pub struct Ship {
    pub id: ShipId,
    pub name: String,
    pub model_name: String,
    pub plural_model_name: String,
    /// What the ship calls itself in messages ("ship", "drone", "station").
    pub noun: String,
    pub government: GovernmentRef,
    pub system: Option<SystemId>,
    pub position: Vec2,
    /// Below 1.0 while landing or taking off.
    pub zoom: f32,
    /// 1.0 when fully cloaked.
    pub cloaking: f32,
    pub is_destroyed: bool,
    pub is_disabled: bool,
    pub is_targetable: bool,
    pub is_entering_hyperspace: bool,
    pub is_hyperspacing: bool,
    pub can_be_carried: bool,
    pub is_parked: bool,
    pub has_deploy_order: bool,
    pub jumps_remaining: u32,
    pub cargo_capacity: i32,
    pub bunks: i32,
    pub crew: i32,
    pub passengers: i32,
    pub cargo: Cargo,
    pub outfits: Vec<OutfitStack>,
    pub bays: Vec<Bay>,
    pub attributes: HashMap<String, f64>,
    pub target_stellar: Option<StellarObject>,
    pub targets_asteroid: bool,
    target_ship: Option<WeakShip>,
}

impl Ship {
    /// Create a ship in space, targetable, with no cargo or outfits.
    pub fn new(id: ShipId, government: GovernmentRef) -> Self {
        Self {
            id,
            name: String::new(),
            model_name: "Ship".to_string(),
            plural_model_name: "Ships".to_string(),
            noun: "ship".to_string(),
            government,
            system: None,
            position: Vec2::ZERO,
            zoom: 1.0,
            cloaking: 0.0,
            is_destroyed: false,
            is_disabled: false,
            is_targetable: true,
            is_entering_hyperspace: false,
            is_hyperspacing: false,
            can_be_carried: false,
            is_parked: false,
            has_deploy_order: false,
            jumps_remaining: 1,
            cargo_capacity: 0,
            bunks: 0,
            crew: 0,
            passengers: 0,
            cargo: Cargo::default(),
            outfits: Vec::new(),
            bays: Vec::new(),
            attributes: HashMap::new(),
            target_stellar: None,
            targets_asteroid: false,
            target_ship: None,
        }
    }

    // -- Builder pattern --

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>, plural: impl Into<String>) -> Self {
        self.model_name = model.into();
        self.plural_model_name = plural.into();
        self
    }

    pub fn with_noun(mut self, noun: impl Into<String>) -> Self {
        self.noun = noun.into();
        self
    }

    pub fn in_system(mut self, system: SystemId) -> Self {
        self.system = Some(system);
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn with_capacity(mut self, cargo: i32, bunks: i32) -> Self {
        self.cargo_capacity = cargo;
        self.bunks = bunks;
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: f64) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn add_outfit(&mut self, outfit: Arc<Outfit>, count: i32) {
        if let Some(stack) = self.outfits.iter_mut().find(|s| Arc::ptr_eq(&s.outfit, &outfit)) {
            stack.count += count;
        } else {
            self.outfits.push(OutfitStack { outfit, count });
        }
    }

    pub fn attribute(&self, name: &str) -> f64 {
        self.attributes.get(name).copied().unwrap_or(0.0)
    }

    pub fn free_cargo(&self) -> i32 {
        self.cargo_capacity - self.cargo.used()
    }

    pub fn free_bunks(&self) -> i32 {
        self.bunks - self.crew - self.passengers
    }

    /// The currently targeted ship, if it still exists.
    pub fn target_ship(&self) -> Option<ShipHandle> {
        self.target_ship.as_ref().and_then(WeakShip::upgrade)
    }

    pub fn set_target_ship(&mut self, target: Option<&ShipHandle>) {
        self.target_ship = target.map(ShipHandle::downgrade);
    }

    /// Whether the ship flies for the player.
    pub fn is_yours(&self) -> bool {
        self.government.is_player
    }
}

/// Shared reference to a ship. Cheap to clone; events and targets hold these.
#[derive(Clone)]
pub struct ShipHandle(Arc<RwLock<Ship>>);

impl ShipHandle {
    pub fn new(ship: Ship) -> Self {
        ShipHandle(Arc::new(RwLock::new(ship)))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Ship> {
        self.0.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Ship> {
        self.0.write()
    }

    /// Whether both handles refer to the same ship.
    pub fn ptr_eq(&self, other: &ShipHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn downgrade(&self) -> WeakShip {
        WeakShip(Arc::downgrade(&self.0))
    }

    pub fn id(&self) -> ShipId {
        self.read().id
    }

    pub fn is_destroyed(&self) -> bool {
        self.read().is_destroyed
    }
}

impl fmt::Debug for ShipHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_read() {
            Some(ship) => write!(f, "ShipHandle({:?})", ship.id),
            None => f.write_str("ShipHandle(<locked>)"),
        }
    }
}

/// Non-owning ship reference, used for targets.
#[derive(Clone, Debug)]
pub struct WeakShip(Weak<RwLock<Ship>>);

impl WeakShip {
    pub fn upgrade(&self) -> Option<ShipHandle> {
        self.0.upgrade().map(ShipHandle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::GovernmentId;
    use crate::world::government::Government;

    fn gov() -> GovernmentRef {
        Arc::new(Government::new(GovernmentId(3), "Merchant"))
    }

    #[test]
    fn target_is_dropped_with_the_ship() {
        let hunter = ShipHandle::new(Ship::new(ShipId(1), gov()));
        let prey = ShipHandle::new(Ship::new(ShipId(2), gov()));
        hunter.write().set_target_ship(Some(&prey));
        assert!(hunter.read().target_ship().unwrap().ptr_eq(&prey));

        drop(prey);
        assert!(hunter.read().target_ship().is_none());
    }

    #[test]
    fn free_space_accounts_for_cargo_and_people() {
        let mut ship = Ship::new(ShipId(1), gov()).with_capacity(20, 4);
        ship.crew = 1;
        ship.cargo.commodities.insert("Food".into(), 5);
        ship.cargo.outfits.push(OutfitStack {
            outfit: Arc::new(Outfit::new("Iron", "Minerals").with_mass(0.5).minable()),
            count: 3,
        });
        // 5 tons of food, ceil(1.5) tons of iron
        assert_eq!(ship.free_cargo(), 13);
        assert_eq!(ship.free_bunks(), 3);
    }

    #[test]
    fn adding_same_outfit_stacks() {
        let mut ship = Ship::new(ShipId(1), gov());
        let laser = Arc::new(Outfit::new("Laser", "Guns"));
        ship.add_outfit(laser.clone(), 1);
        ship.add_outfit(laser, 2);
        assert_eq!(ship.outfits.len(), 1);
        assert_eq!(ship.outfits[0].count, 3);
    }
}
