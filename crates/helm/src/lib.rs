pub mod api;
pub mod core;
pub mod input;
pub mod player;
pub mod render;
pub mod ui;
pub mod world;

#[cfg(test)]
mod testing;

// Re-export key types at crate root for convenience
pub use api::collaborators::{BlockedTrigger, NarrativeState, PanelCallbacks, Player, Simulation};
pub use api::config::{AmmoUsage, ControllerConfig, Preferences};
pub use api::error::SaveError;
pub use api::types::{GovernmentId, Importance, NarrativeId, ShipId, SurfaceId, SystemId};
pub use crate::core::event::{EventKind, ShipEvent};
pub use crate::core::event_queue::EventQueue;
pub use crate::core::frame::FrameController;
pub use crate::core::hail::{resolve_hail, HailOutcome};
pub use crate::core::help::LostTracker;
pub use crate::core::load::LoadMeter;
pub use crate::core::messages::{Message, MessageLog};
pub use crate::core::scan::scan_report;
pub use input::command::{Command, Key, Keymap, OverlayRequest};
pub use input::drag::DragSelect;
pub use input::keyboard::{KeyboardState, Modifiers};
pub use input::queue::{InputEvent, InputQueue, MouseButton};
pub use player::info::PlayerInfo;
pub use player::mission::{Mission, NpcTrigger};
pub use render::draw::{DrawList, LineInstance, TextItem};
pub use ui::completion::{completion_channel, Completion, CompletionSender};
pub use ui::panels::{BoardingPanel, Dialog, HailPanel, HailTarget, InfoPanel, MapPanel, PlanetPanel};
pub use ui::stack::PanelStack;
pub use ui::surface::{Surface, Ui};
pub use world::government::{Government, GovernmentRef};
pub use world::planet::{Planet, StellarObject};
pub use world::ship::{Bay, BayOccupant, Cargo, Outfit, OutfitStack, Ship, ShipHandle, WeakShip};
