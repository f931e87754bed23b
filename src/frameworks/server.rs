// Framework bootstrap for the game server runtime.

use crate::domain::tuning::player::PlayerTuning;
use crate::domain::tuning::projectile::ProjectileTuning;
use crate::domain::world::World;
use crate::frameworks::config;
use crate::interface_adapters::net::{snapshot_serializer, ws_handler};
use crate::interface_adapters::state::AppState;
use crate::use_cases::game::world_task;
use crate::use_cases::{GameEvent, Snapshot};

use axum::{Router, extract::ws::Utf8Bytes, routing::get};
use std::io::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state();

    // Start the Web Server
    let app = Router::new()
        .route("/ws", get(ws_handler))
        .with_state(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::from(([127, 0, 0, 1], config::http_port()));

    // Bind TCP listener with error handling
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener).await
}

fn build_state() -> Arc<AppState> {
    // Setup Channels
    // input_tx/rx: All client events go to the single game loop task.
    let (input_tx, input_rx) = mpsc::channel::<GameEvent>(config::INPUT_CHANNEL_CAPACITY);

    // snapshot_tx/rx: Store snapshots are broadcast to all clients.
    let (snapshot_tx, _snapshot_rx) =
        broadcast::channel::<Snapshot>(config::SNAPSHOT_BROADCAST_CAPACITY);

    // snapshot_bytes_tx/rx: Serialized snapshots shared across all clients,
    // with per-store latests kept for lag recovery.
    let (snapshot_bytes_tx, _snapshot_bytes_rx) =
        broadcast::channel::<Utf8Bytes>(config::SNAPSHOT_BROADCAST_CAPACITY);
    let (players_latest_tx, _players_latest_rx) = watch::channel::<Utf8Bytes>(Utf8Bytes::from(""));
    let (projectiles_latest_tx, _projectiles_latest_rx) =
        watch::channel::<Utf8Bytes>(Utf8Bytes::from(""));

    // The world is constructed once here and owned by the game loop task;
    // nothing else holds a reference to the stores.
    let world = World::new(PlayerTuning::default(), ProjectileTuning::default());

    // Spawn the Game Loop (World Task)
    // This runs independently in its own task.
    tokio::spawn(world_task(
        world,
        input_rx,
        snapshot_tx.clone(),
        config::TICK_INTERVAL,
    ));

    // Spawn the snapshot serializer task in the adapter layer.
    tokio::spawn(snapshot_serializer(
        snapshot_tx.subscribe(),
        snapshot_bytes_tx.clone(),
        players_latest_tx.clone(),
        projectiles_latest_tx.clone(),
    ));

    Arc::new(AppState {
        input_tx,
        snapshot_bytes_tx,
        players_latest_tx,
        projectiles_latest_tx,
    })
}
