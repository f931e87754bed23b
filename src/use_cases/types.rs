// Use-case level inputs/outputs for the game loop.

use crate::domain::state::{PlayerCommand, PlayerSnapshot, ProjectileSnapshot};

#[derive(Debug, Clone)]
pub enum GameEvent {
    Join { player_id: u64 },
    Leave { player_id: u64 },
    Command { player_id: u64, command: PlayerCommand },
}

/// Full-state view of one store, broadcast to every connected client.
///
/// The two stores broadcast independently; a single ordered channel carries
/// both kinds so clients observe mutations in processing order.
#[derive(Debug, Clone)]
pub enum Snapshot {
    Players(Vec<PlayerSnapshot>),
    Projectiles(Vec<ProjectileSnapshot>),
}
