pub mod command;
pub mod drag;
pub mod keyboard;
pub mod queue;
