//! Read-mostly view of the simulated world the controller makes decisions from.

pub mod government;
pub mod planet;
pub mod ship;
