use std::sync::atomic::{AtomicU32, Ordering};
use serde::{Deserialize, Serialize};

/// Unique identifier for a ship in the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShipId(pub u32);

/// Unique identifier for a government (faction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GovernmentId(pub u32);

/// Unique identifier for a star system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SystemId(pub u32);

/// Identifier of a narrative unit (mission) owned by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NarrativeId(pub u32);

/// Identity of a UI surface on the panel stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u32);

static NEXT_SURFACE: AtomicU32 = AtomicU32::new(1);

impl SurfaceId {
    /// Allocate a fresh, process-unique surface id.
    pub fn next() -> Self {
        SurfaceId(NEXT_SURFACE.fetch_add(1, Ordering::Relaxed))
    }
}

/// How loudly a transient message should be announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Importance {
    Low,
    #[default]
    Normal,
    High,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_ids_are_unique() {
        let a = SurfaceId::next();
        let b = SurfaceId::next();
        assert_ne!(a, b);
    }
}
