use super::types::{GameEvent, Snapshot};
use crate::domain::state::PlayerCommand;
use crate::domain::world::World;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tracing::info;

/// The single event-serialization point for all shared game state.
///
/// Every mutation source funnels through here: client events arrive on
/// `input_rx` and are applied one at a time, while the free-running interval
/// advances projectile physics on a fixed cadence regardless of command
/// activity. Broadcast sends never block; a send result is ignored because
/// "no subscribers" is a normal state between connections.
pub async fn world_task(
    mut world: World,
    mut input_rx: mpsc::Receiver<GameEvent>,
    snapshot_tx: broadcast::Sender<Snapshot>,
    tick_interval: Duration,
) {
    let mut interval = tokio::time::interval(tick_interval);

    loop {
        tokio::select! {
            event = input_rx.recv() => {
                let Some(event) = event else {
                    // All input senders dropped; the server is shutting down.
                    break;
                };
                handle_event(&mut world, event, &snapshot_tx);
            }
            _ = interval.tick() => {
                world.tick();
                // Ticks always rebroadcast, even when the store is empty or
                // unchanged; clients resync from full snapshots.
                let _ = snapshot_tx.send(Snapshot::Projectiles(world.projectile_snapshot()));
            }
        }
    }
}

// Applies one event and broadcasts the store(s) it mutated.
fn handle_event(world: &mut World, event: GameEvent, snapshot_tx: &broadcast::Sender<Snapshot>) {
    match event {
        GameEvent::Join { player_id } => {
            info!(player_id, "player joined");
            world.connect(player_id);
            let _ = snapshot_tx.send(Snapshot::Players(world.player_snapshot()));
        }
        GameEvent::Leave { player_id } => {
            info!(player_id, "player left");
            world.disconnect(player_id);
            // Players first, then projectiles: clients drop the entity before
            // they drop its shots.
            let _ = snapshot_tx.send(Snapshot::Players(world.player_snapshot()));
            let _ = snapshot_tx.send(Snapshot::Projectiles(world.projectile_snapshot()));
        }
        GameEvent::Command { player_id, command } => match command {
            PlayerCommand::Move { dx, dy } => {
                if world.apply_move(player_id, dx, dy) {
                    let _ = snapshot_tx.send(Snapshot::Players(world.player_snapshot()));
                }
            }
            PlayerCommand::Point => {
                if world.apply_score(player_id) {
                    let _ = snapshot_tx.send(Snapshot::Players(world.player_snapshot()));
                }
            }
            PlayerCommand::Rename(name) => {
                if world.apply_rename(player_id, name) {
                    let _ = snapshot_tx.send(Snapshot::Players(world.player_snapshot()));
                }
            }
            PlayerCommand::Shoot { x, y } => {
                world.apply_shoot(player_id, x, y);
                let _ = snapshot_tx.send(Snapshot::Projectiles(world.projectile_snapshot()));
            }
        },
    }
}
