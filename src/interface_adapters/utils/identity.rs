use std::{
    sync::{
        OnceLock,
        atomic::{AtomicU64, Ordering},
    },
    time::{SystemTime, UNIX_EPOCH},
};

fn now_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

/// Allocates the identity token for one connection.
///
/// Tokens are process-unique and monotonically increasing, so an identity is
/// never reused after its connection goes away. Seeding the counter from the
/// wall clock keeps tokens from colliding across quick process restarts,
/// which would otherwise confuse clients holding stale snapshots.
pub fn next_identity() -> u64 {
    static COUNTER: OnceLock<AtomicU64> = OnceLock::new();
    let counter = COUNTER.get_or_init(|| AtomicU64::new(now_nanos()));
    counter.fetch_add(1, Ordering::Relaxed)
}
