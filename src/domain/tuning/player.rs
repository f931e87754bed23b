/// Gameplay tuning for player entities.
///
/// Keep this separate from runtime/server configuration (tick rates, buffer
/// sizes, etc.).
#[derive(Debug, Clone, Copy)]
pub struct PlayerTuning {
    /// Spawn position on the x axis, in pixels.
    pub spawn_x: f32,

    /// Spawn position on the y axis, in pixels.
    pub spawn_y: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            spawn_x: 500.0,
            spawn_y: 600.0,
        }
    }
}
