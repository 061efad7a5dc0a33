use std::ops::{BitOr, BitOrAssign};
use serde::{Deserialize, Serialize};
use crate::world::government::GovernmentRef;
use crate::world::ship::ShipHandle;

/// What happened to a ship during a tick. A single event may carry several kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventKind(u32);

impl EventKind {
    pub const NONE: EventKind = EventKind(0);
    pub const DISABLE: EventKind = EventKind(1 << 0);
    pub const BOARD: EventKind = EventKind(1 << 1);
    pub const CAPTURE: EventKind = EventKind(1 << 2);
    pub const DESTROY: EventKind = EventKind(1 << 3);
    pub const SCAN_CARGO: EventKind = EventKind(1 << 4);
    pub const SCAN_OUTFITS: EventKind = EventKind(1 << 5);
    pub const ASSIST: EventKind = EventKind(1 << 6);
    pub const PROVOKE: EventKind = EventKind(1 << 7);
    pub const ATROCITY: EventKind = EventKind(1 << 8);
    pub const JUMP: EventKind = EventKind(1 << 9);
    pub const ENCOUNTER: EventKind = EventKind(1 << 10);

    /// Each single-bit kind with the condition name it counts toward.
    pub const NAMED: [(EventKind, &'static str); 11] = [
        (Self::DISABLE, "disabled"),
        (Self::BOARD, "boarded"),
        (Self::CAPTURE, "captured"),
        (Self::DESTROY, "destroyed"),
        (Self::SCAN_CARGO, "scanned cargo"),
        (Self::SCAN_OUTFITS, "scanned outfits"),
        (Self::ASSIST, "assisted"),
        (Self::PROVOKE, "provoked"),
        (Self::ATROCITY, "atrocity"),
        (Self::JUMP, "jumped"),
        (Self::ENCOUNTER, "encountered"),
    ];

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// All bits of `other` are set.
    pub const fn contains(self, other: EventKind) -> bool {
        self.0 & other.0 == other.0
    }

    /// Any bit of `other` is set.
    pub const fn intersects(self, other: EventKind) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for EventKind {
    type Output = EventKind;

    fn bitor(self, rhs: EventKind) -> EventKind {
        EventKind(self.0 | rhs.0)
    }
}

impl BitOrAssign for EventKind {
    fn bitor_assign(&mut self, rhs: EventKind) {
        self.0 |= rhs.0;
    }
}

/// One state change produced by the simulation in one tick.
///
/// Immutable once built. The governments are captured at construction, so a
/// later capture of either ship does not rewrite history; only the liveness of
/// the referenced ships can change before the event is handled.
#[derive(Debug, Clone)]
pub struct ShipEvent {
    kind: EventKind,
    actor: Option<ShipHandle>,
    target: Option<ShipHandle>,
    actor_government: Option<GovernmentRef>,
    target_government: Option<GovernmentRef>,
}

impl ShipEvent {
    pub fn new(actor: Option<&ShipHandle>, target: Option<&ShipHandle>, kind: EventKind) -> Self {
        Self {
            kind,
            actor_government: actor.map(|a| a.read().government.clone()),
            target_government: target.map(|t| t.read().government.clone()),
            actor: actor.cloned(),
            target: target.cloned(),
        }
    }

    /// An event raised by a government rather than a ship (e.g. a planetary scan).
    pub fn from_government(actor: GovernmentRef, target: &ShipHandle, kind: EventKind) -> Self {
        Self {
            kind,
            actor: None,
            target_government: Some(target.read().government.clone()),
            target: Some(target.clone()),
            actor_government: Some(actor),
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn actor(&self) -> Option<&ShipHandle> {
        self.actor.as_ref()
    }

    pub fn target(&self) -> Option<&ShipHandle> {
        self.target.as_ref()
    }

    pub fn actor_government(&self) -> Option<&GovernmentRef> {
        self.actor_government.as_ref()
    }

    pub fn target_government(&self) -> Option<&GovernmentRef> {
        self.target_government.as_ref()
    }

    pub fn actor_is_player(&self) -> bool {
        self.actor_government.as_ref().map_or(false, |g| g.is_player)
    }

    pub fn target_is_player(&self) -> bool {
        self.target_government.as_ref().map_or(false, |g| g.is_player)
    }
}
