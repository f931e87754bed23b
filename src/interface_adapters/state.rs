use crate::use_cases::GameEvent;
use axum::extract::ws::Utf8Bytes;
use tokio::sync::{broadcast, mpsc, watch};

#[derive(Clone)]
pub struct AppState {
    // Inbound events flowing from the network into the game loop.
    pub input_tx: mpsc::Sender<GameEvent>,
    // Serialized snapshots, shared across all connections.
    pub snapshot_bytes_tx: broadcast::Sender<Utf8Bytes>,
    // Latest serialized player snapshot for lag recovery.
    pub players_latest_tx: watch::Sender<Utf8Bytes>,
    // Latest serialized projectile snapshot for lag recovery.
    pub projectiles_latest_tx: watch::Sender<Utf8Bytes>,
}
