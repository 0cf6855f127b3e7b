pub mod calendar;
pub mod simulation;
pub mod tick;

pub use simulation::Simulation;
pub use tick::{run_world_tick, TickContext};
