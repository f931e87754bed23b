// Network adapter for client-facing WebSocket sessions.

pub mod client;

pub use client::{snapshot_serializer, ws_handler};
