use crate::domain::state::Projectile;
use crate::domain::tuning::projectile::ProjectileTuning;

/// Advances every projectile by one fixed step and drops the ones that have
/// left the playfield. Runs once per tick, whether or not any projectile
/// exists.
pub fn step(projectiles: &mut Vec<Projectile>, tuning: &ProjectileTuning) {
    for p in projectiles.iter_mut() {
        p.y -= tuning.step_per_tick;
    }

    // Strictly below the bound despawns; a projectile sitting exactly on it
    // survives one more tick.
    projectiles.retain(|p| p.y >= tuning.despawn_y);
}
