// Authoritative stores for players and projectiles.

use crate::domain::state::{Player, PlayerSnapshot, Projectile, ProjectileSnapshot};
use crate::domain::systems::projectiles;
use crate::domain::tuning::player::PlayerTuning;
use crate::domain::tuning::projectile::ProjectileTuning;
use std::collections::HashMap;

/// Single-owner container for all mutable game state.
///
/// Exactly one task owns a `World` and applies events to it one at a time, so
/// no locking exists at this layer. The container is constructed once at
/// startup and handed to the game loop by value.
pub struct World {
    // Player entities keyed by connection identity. An entry exists if and
    // only if that identity currently has a live connection.
    players: HashMap<u64, Player>,
    // Live projectiles in creation order.
    projectiles: Vec<Projectile>,

    player_tuning: PlayerTuning,
    projectile_tuning: ProjectileTuning,
}

impl World {
    pub fn new(player_tuning: PlayerTuning, projectile_tuning: ProjectileTuning) -> Self {
        Self {
            players: HashMap::new(),
            projectiles: Vec::new(),
            player_tuning,
            projectile_tuning,
        }
    }

    /// Creates the player entity for a freshly connected identity.
    ///
    /// Identities are never reused, so a connect can only insert.
    pub fn connect(&mut self, identity: u64) {
        self.players.insert(
            identity,
            Player {
                x: self.player_tuning.spawn_x,
                y: self.player_tuning.spawn_y,
                score: 0,
                name: default_name(identity),
            },
        );
    }

    /// Removes the player entity and every projectile it owns.
    ///
    /// Idempotent: a duplicate or late disconnect for an unknown identity
    /// leaves both stores untouched.
    pub fn disconnect(&mut self, identity: u64) {
        self.players.remove(&identity);
        self.projectiles.retain(|p| p.owner != identity);
    }

    /// Adds the deltas to the player's position. Returns whether a player
    /// entity existed and was mutated.
    // TODO: clamp positions and cap name length here once the gameplay rules
    // settle; today both are intentionally unbounded.
    pub fn apply_move(&mut self, identity: u64, dx: f32, dy: f32) -> bool {
        let Some(player) = self.players.get_mut(&identity) else {
            return false;
        };
        player.x += dx;
        player.y += dy;
        true
    }

    /// Increments the player's score by exactly one. Returns whether a player
    /// entity existed and was mutated.
    pub fn apply_score(&mut self, identity: u64) -> bool {
        let Some(player) = self.players.get_mut(&identity) else {
            return false;
        };
        player.score += 1;
        true
    }

    /// Replaces the player's display name verbatim. Returns whether a player
    /// entity existed and was mutated.
    pub fn apply_rename(&mut self, identity: u64, name: String) -> bool {
        let Some(player) = self.players.get_mut(&identity) else {
            return false;
        };
        player.name = name;
        true
    }

    /// Appends a projectile owned by `identity`.
    ///
    /// Ownership is deliberately not checked against the player store: a shot
    /// racing a disconnect still spawns, and such an orphan is only cleaned
    /// up by the off-screen bound.
    pub fn apply_shoot(&mut self, identity: u64, x: f32, y: f32) {
        self.projectiles.push(Projectile {
            x,
            y,
            owner: identity,
        });
    }

    /// Advances projectile physics by one fixed step and prunes projectiles
    /// that left the playfield.
    pub fn tick(&mut self) {
        projectiles::step(&mut self.projectiles, &self.projectile_tuning);
    }

    pub fn player_snapshot(&self) -> Vec<PlayerSnapshot> {
        self.players
            .iter()
            .map(|(id, p)| PlayerSnapshot {
                id: *id,
                x: p.x,
                y: p.y,
                score: p.score,
                name: p.name.clone(),
            })
            .collect()
    }

    pub fn projectile_snapshot(&self) -> Vec<ProjectileSnapshot> {
        self.projectiles.iter().map(ProjectileSnapshot::from).collect()
    }

    pub fn contains_player(&self, identity: u64) -> bool {
        self.players.contains_key(&identity)
    }
}

// "Player " plus the leading digits of the identity, matching what clients
// show until the player picks a name.
fn default_name(identity: u64) -> String {
    let id = identity.to_string();
    let short = &id[..id.len().min(4)];
    format!("Player {short}")
}
