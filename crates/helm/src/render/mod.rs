//! Screen-space output handed to the rendering backend.

pub mod draw;
