pub mod events;
pub mod state;
pub mod unit;

pub use events::{EventLog, GameEvent, LogEntry};
pub use state::World;
pub use unit::Unit;
