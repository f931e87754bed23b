// Wire protocol DTOs and conversions for client-facing messages.

use crate::domain::state::{PlayerCommand, PlayerSnapshot, ProjectileSnapshot};
use crate::use_cases::Snapshot;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Messages the server sends to connected clients over the WebSocket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    // Assigned identity for the connection, sent once right after the
    // upgrade. Snapshots key players by this value.
    #[serde(rename = "identity")]
    Identity { player_id: String },
    // Full snapshot of every connected player, keyed by identity.
    #[serde(rename = "player-state")]
    PlayerState(BTreeMap<String, PlayerStateDto>),
    // Full snapshot of every live projectile, in creation order.
    #[serde(rename = "projectile-state")]
    ProjectileState(Vec<ProjectileStateDto>),
}

/// Messages the client sends to the server over the WebSocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ClientMessage {
    Move(MoveDto),
    Shoot(ShootDto),
    Point,
    Name(String),
}

/// Position delta payload. Fields a client omits or garbles degrade to zero
/// instead of failing the command.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveDto {
    #[serde(default, deserialize_with = "lenient_f32")]
    pub dx: f32,
    #[serde(default, deserialize_with = "lenient_f32")]
    pub dy: f32,
}

/// Projectile spawn payload, tolerant of malformed coordinates the same way.
#[derive(Debug, Clone, Deserialize)]
pub struct ShootDto {
    #[serde(default, deserialize_with = "lenient_f32")]
    pub x: f32,
    #[serde(default, deserialize_with = "lenient_f32")]
    pub y: f32,
}

impl From<ClientMessage> for PlayerCommand {
    fn from(msg: ClientMessage) -> Self {
        match msg {
            ClientMessage::Move(m) => PlayerCommand::Move { dx: m.dx, dy: m.dy },
            ClientMessage::Shoot(s) => PlayerCommand::Shoot { x: s.x, y: s.y },
            ClientMessage::Point => PlayerCommand::Point,
            ClientMessage::Name(name) => PlayerCommand::Rename(name),
        }
    }
}

// Accepts any JSON value where a number is expected; non-numeric values
// coerce to 0.0 rather than rejecting the whole message.
fn lenient_f32<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().map(|v| v as f32).unwrap_or(0.0))
}

/// Per-player entry inside a `player-state` snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerStateDto {
    pub x: f32,
    pub y: f32,
    pub score: u32,
    pub name: String,
}

impl From<&PlayerSnapshot> for PlayerStateDto {
    fn from(player: &PlayerSnapshot) -> Self {
        Self {
            x: player.x,
            y: player.y,
            score: player.score,
            name: player.name.clone(),
        }
    }
}

/// Per-projectile entry inside a `projectile-state` snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectileStateDto {
    pub x: f32,
    pub y: f32,
    pub owner: String,
}

impl From<&ProjectileSnapshot> for ProjectileStateDto {
    fn from(projectile: &ProjectileSnapshot) -> Self {
        Self {
            x: projectile.x,
            y: projectile.y,
            owner: projectile.owner.to_string(),
        }
    }
}

impl From<Snapshot> for ServerMessage {
    fn from(snapshot: Snapshot) -> Self {
        match snapshot {
            Snapshot::Players(players) => ServerMessage::PlayerState(
                players
                    .iter()
                    .map(|p| (p.id.to_string(), PlayerStateDto::from(p)))
                    .collect(),
            ),
            Snapshot::Projectiles(projectiles) => {
                ServerMessage::ProjectileState(projectiles.iter().map(Into::into).collect())
            }
        }
    }
}
