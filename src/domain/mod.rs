// Domain layer: core simulation state and rules.

pub mod state;
pub mod systems;
pub mod tuning;
pub mod world;

pub use state::{Player, PlayerCommand, PlayerSnapshot, Projectile, ProjectileSnapshot};
pub use world::World;
