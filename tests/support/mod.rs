// Shared primitives for one-time server bootstrapping across integration tests.
use std::{
    // `Arc` shares data between threads; `OnceLock` writes a value only once.
    sync::{Arc, OnceLock},
    // Sleep durations are used in readiness polling loops.
    time::Duration,
};

use futures::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message;

// Global base URL used by all tests after the server publishes its bound address.
static SERVER_URL: OnceLock<String> = OnceLock::new();
// One-time guard that ensures the server bootstrap path runs only once.
static SERVER_READY: OnceLock<()> = OnceLock::new();

// Ensure the test server is running and return the shared base URL.
pub fn ensure_server() -> &'static str {
    // Run initialization exactly once even if multiple tests call this function.
    SERVER_READY.get_or_init(|| {
        // Local one-time slot where the server thread publishes its selected URL.
        let published_url = Arc::new(OnceLock::<String>::new());
        // Clone so the spawned thread can write into the same shared slot.
        let published_url_thread = Arc::clone(&published_url);
        // Spawn an OS thread so the server outlives individual `#[tokio::test]` runtimes.
        std::thread::spawn(move || {
            // Each server thread owns its own Tokio runtime.
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            // Run async server startup and serving on this dedicated runtime.
            runtime.block_on(async move {
                // Bind to an ephemeral port to avoid collisions with local services.
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                // Capture the exact address that was assigned by the OS.
                let addr = listener.local_addr().expect("get local addr");
                // Publish the final base URL so test code can target the right server.
                let _ = published_url_thread.set(format!("http://{}", addr));
                // Start serving requests until the test process exits.
                arcade_server::run(listener).await.expect("server failed");
            });
        });
        // Block until URL is published and the bound port starts accepting connections.
        wait_for_server_url_and_readiness(published_url);
    });

    // Return the stable shared URL used by all tests in this binary.
    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

// Wait for URL publication and then wait for the server socket to accept TCP connections.
fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    // Poll until the server thread publishes the base URL.
    let base_url = loop {
        // If the URL is published, clone it and stop waiting.
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        // Avoid a tight loop while waiting for the background thread.
        std::thread::sleep(Duration::from_millis(10));
    };

    // Persist the URL globally so every test gets the same endpoint.
    let _ = SERVER_URL.set(base_url.clone());

    // Strip the scheme so we can use host:port for raw TCP readiness checks.
    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    // Retry for a short period to avoid racing server bind/accept.
    for _ in 0..100 {
        // Successful connect means the server socket is accepting connections.
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        // Wait briefly before the next readiness probe.
        std::thread::sleep(Duration::from_millis(20));
    }

    // Fail fast if startup never reached an accepting state.
    panic!("server did not become ready in time");
}

// Connected WebSocket client used by the tests below.
pub type WsClient = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

// Upper bound for any single wait; snapshots arrive every tick, so a match
// either comes quickly or not at all.
const WAIT_DEADLINE: Duration = Duration::from_secs(10);

// Open a WebSocket session and complete the identity handshake.
pub async fn connect_player(base_url: &str) -> (WsClient, String) {
    let ws_url = format!("{}/ws", base_url.replacen("http", "ws", 1));
    let (mut socket, _response) = tokio_tungstenite::connect_async(ws_url)
        .await
        .expect("websocket connect should succeed");

    // The identity message is the first thing the server sends.
    let identity = wait_for_message(&mut socket, |msg| msg["type"] == "identity").await;
    let player_id = identity["data"]["player_id"]
        .as_str()
        .expect("identity should carry a player id")
        .to_string();

    (socket, player_id)
}

// Read messages until one satisfies the predicate, skipping the rest.
// Broadcasts are full-state, so skipped intermediates carry no information.
pub async fn wait_for_message<F>(socket: &mut WsClient, mut predicate: F) -> serde_json::Value
where
    F: FnMut(&serde_json::Value) -> bool,
{
    tokio::time::timeout(WAIT_DEADLINE, async {
        loop {
            let msg = socket
                .next()
                .await
                .expect("socket closed while waiting for a message")
                .expect("websocket error while waiting for a message");
            if let Message::Text(text) = msg {
                let value: serde_json::Value =
                    serde_json::from_str(&text).expect("server should send valid json");
                if predicate(&value) {
                    return value;
                }
            }
        }
    })
    .await
    .expect("timed out waiting for a matching message")
}

// Send one command with the standard {"type", "data"} envelope.
pub async fn send_command(socket: &mut WsClient, command: serde_json::Value) {
    send_raw(socket, command.to_string()).await;
}

// Send an arbitrary text frame (used to probe malformed-input tolerance).
pub async fn send_raw(socket: &mut WsClient, text: String) {
    socket
        .send(Message::Text(text))
        .await
        .expect("websocket send should succeed");
}
