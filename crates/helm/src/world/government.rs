use std::collections::HashMap;
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use crate::api::types::GovernmentId;
use crate::core::event::EventKind;
use crate::world::ship::Ship;

/// Shared, immutable government record.
pub type GovernmentRef = Arc<Government>;

/// Per-unit fines a government levies on goods it has outlawed.
/// Keys are commodity names or outfit display names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinePolicy {
    #[serde(default)]
    pub illegal: HashMap<String, i64>,
}

/// A faction ships belong to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Government {
    pub id: GovernmentId,
    pub name: String,
    /// The government the player flies under.
    #[serde(default)]
    pub is_player: bool,
    /// Hostile to the player.
    #[serde(default)]
    pub is_enemy: bool,
    #[serde(default)]
    pub fines: FinePolicy,
}

impl Government {
    pub fn new(id: GovernmentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_player: false,
            is_enemy: false,
            fines: FinePolicy::default(),
        }
    }

    pub fn player(id: GovernmentId) -> Self {
        Self {
            is_player: true,
            ..Self::new(id, "Escort")
        }
    }

    pub fn with_enemy(mut self, is_enemy: bool) -> Self {
        self.is_enemy = is_enemy;
        self
    }

    pub fn with_fine(mut self, item: impl Into<String>, per_unit: i64) -> Self {
        self.fines.illegal.insert(item.into(), per_unit);
        self
    }

    /// Work out the penalty for what a scan of `target` turned up.
    /// Returns the message to show the player, or `None` when nothing illegal was found.
    pub fn fine(&self, kind: EventKind, target: &Ship) -> Option<String> {
        if self.fines.illegal.is_empty() {
            return None;
        }

        let mut total = 0i64;
        let mut cargo_found = false;
        let mut outfits_found = false;

        if kind.contains(EventKind::SCAN_CARGO) {
            for (name, &tons) in target.cargo.commodities.iter() {
                if let Some(&rate) = self.fines.illegal.get(name) {
                    if tons > 0 {
                        total += rate * i64::from(tons);
                        cargo_found = true;
                    }
                }
            }
            for stack in &target.cargo.outfits {
                if let Some(&rate) = self.fines.illegal.get(&stack.outfit.name) {
                    if stack.count > 0 {
                        total += rate * i64::from(stack.count);
                        cargo_found = true;
                    }
                }
            }
        }
        if kind.contains(EventKind::SCAN_OUTFITS) {
            for stack in &target.outfits {
                if let Some(&rate) = self.fines.illegal.get(&stack.outfit.name) {
                    if stack.count > 0 {
                        total += rate * i64::from(stack.count);
                        outfits_found = true;
                    }
                }
            }
        }

        if total <= 0 {
            return None;
        }
        let what = match (cargo_found, outfits_found) {
            (true, true) => "cargo and outfits",
            (true, false) => "cargo",
            _ => "outfits",
        };
        Some(format!(
            "The {} authorities fine you {} credits for carrying illegal {}.",
            self.name, total, what
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::ship::{Outfit, Ship};
    use crate::api::types::ShipId;

    fn republic() -> Government {
        Government::new(GovernmentId(2), "Republic")
            .with_fine("Illegal Substances", 1000)
            .with_fine("Nuclear Missile", 50_000)
    }

    #[test]
    fn clean_ship_is_not_fined() {
        let target = Ship::new(ShipId(1), Arc::new(Government::player(GovernmentId(1))));
        assert!(republic().fine(EventKind::SCAN_CARGO, &target).is_none());
    }

    #[test]
    fn cargo_scan_fines_only_cargo() {
        let mut target = Ship::new(ShipId(1), Arc::new(Government::player(GovernmentId(1))));
        target.cargo.commodities.insert("Illegal Substances".into(), 3);
        target.add_outfit(Arc::new(Outfit::new("Nuclear Missile", "Secondary Weapons")), 1);

        let msg = republic().fine(EventKind::SCAN_CARGO, &target).unwrap();
        assert!(msg.contains("3000 credits"), "{}", msg);
        assert!(msg.ends_with("illegal cargo."));

        let msg = republic()
            .fine(EventKind::SCAN_CARGO | EventKind::SCAN_OUTFITS, &target)
            .unwrap();
        assert!(msg.contains("53000 credits"), "{}", msg);
        assert!(msg.contains("cargo and outfits"));
    }
}
