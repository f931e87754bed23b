mod support;

use serde_json::json;

// Each test only asserts on its own player id: the server world is shared
// across tests in this binary, so snapshots can contain other tests' players.

#[tokio::test]
async fn connect_assigns_identity_and_spawns_player() {
    let base_url = support::ensure_server();
    let (mut socket, player_id) = support::connect_player(base_url).await;

    let state = support::wait_for_message(&mut socket, |msg| {
        msg["type"] == "player-state" && !msg["data"][player_id.as_str()].is_null()
    })
    .await;

    let me = &state["data"][player_id.as_str()];
    assert_eq!(me["x"].as_f64(), Some(500.0));
    assert_eq!(me["y"].as_f64(), Some(600.0));
    assert_eq!(me["score"].as_u64(), Some(0));
    let name = me["name"].as_str().expect("player should have a name");
    assert!(name.starts_with("Player "), "unexpected default name {name}");
}

#[tokio::test]
async fn move_command_shifts_position_by_the_deltas() {
    let base_url = support::ensure_server();
    let (mut socket, player_id) = support::connect_player(base_url).await;

    support::send_command(&mut socket, json!({"type": "move", "data": {"dx": 5, "dy": -20}})).await;

    support::wait_for_message(&mut socket, |msg| {
        msg["type"] == "player-state"
            && msg["data"][player_id.as_str()]["x"].as_f64() == Some(505.0)
            && msg["data"][player_id.as_str()]["y"].as_f64() == Some(580.0)
    })
    .await;
}

#[tokio::test]
async fn point_commands_accumulate_score_one_by_one() {
    let base_url = support::ensure_server();
    let (mut socket, player_id) = support::connect_player(base_url).await;

    support::send_command(&mut socket, json!({"type": "point"})).await;
    support::send_command(&mut socket, json!({"type": "point"})).await;

    support::wait_for_message(&mut socket, |msg| {
        msg["type"] == "player-state"
            && msg["data"][player_id.as_str()]["score"].as_u64() == Some(2)
    })
    .await;
}

#[tokio::test]
async fn name_command_replaces_the_display_name_verbatim() {
    let base_url = support::ensure_server();
    let (mut socket, player_id) = support::connect_player(base_url).await;

    support::send_command(&mut socket, json!({"type": "name", "data": "Ace of Spades"})).await;

    support::wait_for_message(&mut socket, |msg| {
        msg["type"] == "player-state"
            && msg["data"][player_id.as_str()]["name"].as_str() == Some("Ace of Spades")
    })
    .await;
}

#[tokio::test]
async fn malformed_messages_never_take_the_session_down() {
    let base_url = support::ensure_server();
    let (mut socket, player_id) = support::connect_player(base_url).await;

    // Outright invalid JSON is tolerated (up to the per-connection limit).
    support::send_raw(&mut socket, "this is not json".to_string()).await;
    // A junk delta coerces to zero instead of failing the command.
    support::send_command(&mut socket, json!({"type": "move", "data": {"dx": "junk", "dy": 7}})).await;
    // A follow-up valid command still lands on the same session.
    support::send_command(&mut socket, json!({"type": "move", "data": {"dx": 3}})).await;

    support::wait_for_message(&mut socket, |msg| {
        msg["type"] == "player-state"
            && msg["data"][player_id.as_str()]["x"].as_f64() == Some(503.0)
            && msg["data"][player_id.as_str()]["y"].as_f64() == Some(607.0)
    })
    .await;
}

#[tokio::test]
async fn disconnect_removes_the_player_from_everyone_else_s_view() {
    let base_url = support::ensure_server();
    let (mut leaver, leaver_id) = support::connect_player(base_url).await;
    let (mut observer, _observer_id) = support::connect_player(base_url).await;

    // The observer sees the other session spawn...
    support::wait_for_message(&mut observer, |msg| {
        msg["type"] == "player-state" && !msg["data"][leaver_id.as_str()].is_null()
    })
    .await;

    // ...and sees it vanish once the connection closes.
    leaver.close(None).await.expect("close should succeed");
    support::wait_for_message(&mut observer, |msg| {
        msg["type"] == "player-state" && msg["data"][leaver_id.as_str()].is_null()
    })
    .await;
}
