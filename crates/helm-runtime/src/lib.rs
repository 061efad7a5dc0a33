pub mod logging;
pub mod runner;
pub mod threaded;

pub use logging::init_logging;
pub use runner::Runner;
pub use threaded::{ThreadedSimulation, TickWorld, WorldInput};
