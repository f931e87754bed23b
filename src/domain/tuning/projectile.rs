/// Gameplay tuning for projectiles.

#[derive(Debug, Clone, Copy)]
pub struct ProjectileTuning {
    /// Distance a projectile travels toward the top of the screen per tick,
    /// in pixels. Applied as a decrement on `y`.
    pub step_per_tick: f32,

    /// Projectiles whose `y` drops below this bound are despawned.
    pub despawn_y: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            step_per_tick: 12.0,
            despawn_y: 0.0,
        }
    }
}
