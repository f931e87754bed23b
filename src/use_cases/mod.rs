// Use cases layer: the authoritative game loop and its event types.

pub mod game;
pub mod types;

pub use types::{GameEvent, Snapshot};
