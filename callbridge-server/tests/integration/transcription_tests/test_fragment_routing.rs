use callbridge_core::{ConnectionId, PEER_FALLBACK_LABEL, ServerMessage};
use callbridge_server::CallCommand;
use serde_json::json;
use tokio::sync::mpsc;

use crate::integration::{create_test_switchboard, init_tracing};
use crate::utils::{Delivery, connect, send_client, settle};

async fn start_call(
    cmd_tx: &mpsc::Sender<CallCommand>,
    delivery_rx: &mut mpsc::UnboundedReceiver<Delivery>,
    caller_name: Option<&str>,
) -> (ConnectionId, ConnectionId) {
    let a = connect(cmd_tx, delivery_rx).await.expect("connect A");
    let b = connect(cmd_tx, delivery_rx).await.expect("connect B");

    send_client(
        cmd_tx,
        a,
        json!({ "event": "callUser", "data": { "userToCall": b, "signalData": {}, "name": caller_name } }),
    )
    .await
    .expect("callUser");
    send_client(
        cmd_tx,
        b,
        json!({ "event": "answerCall", "data": { "signal": {}, "to": a } }),
    )
    .await
    .expect("answerCall");
    (a, b)
}

fn sender_names(messages: &[ServerMessage]) -> Vec<String> {
    messages
        .iter()
        .filter_map(|m| match m {
            ServerMessage::Transcription { sender_name, .. } => Some(sender_name.clone()),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_fragment_reaches_only_the_peer() {
    init_tracing();

    let (cmd_tx, mut delivery_rx, signaling) = create_test_switchboard();
    let (a, b) = start_call(&cmd_tx, &mut delivery_rx, Some("Alice")).await;
    let c = connect(&cmd_tx, &mut delivery_rx).await.expect("connect C");

    send_client(
        &cmd_tx,
        a,
        json!({ "event": "sendTranscription", "data": { "transcript": "hello", "sender": "Alice" } }),
    )
    .await
    .expect("sendTranscription");
    settle(&cmd_tx, &mut delivery_rx).await.expect("settle");

    let to_b = signaling.calls_to(&b).await;
    assert_eq!(sender_names(&to_b), vec!["Alice".to_string()]);
    assert!(matches!(
        to_b.last(),
        Some(ServerMessage::Transcription { transcript, .. }) if transcript == "hello"
    ));
    assert!(signaling.calls_to(&c).await.is_empty());
    assert!(sender_names(&signaling.calls_to(&a).await).is_empty());
}

#[tokio::test]
async fn test_fragment_without_sender_uses_display_name() {
    init_tracing();

    let (cmd_tx, mut delivery_rx, signaling) = create_test_switchboard();
    let (a, b) = start_call(&cmd_tx, &mut delivery_rx, Some("Alice")).await;

    send_client(
        &cmd_tx,
        a,
        json!({ "event": "sendTranscription", "data": { "transcript": "one" } }),
    )
    .await
    .expect("from A");
    send_client(
        &cmd_tx,
        b,
        json!({ "event": "sendTranscription", "data": { "transcript": "two", "sender": null } }),
    )
    .await
    .expect("from B");
    settle(&cmd_tx, &mut delivery_rx).await.expect("settle");

    assert_eq!(sender_names(&signaling.calls_to(&b).await), vec!["Alice"]);
    // B never announced a name.
    assert_eq!(
        sender_names(&signaling.calls_to(&a).await),
        vec![PEER_FALLBACK_LABEL]
    );
}

#[tokio::test]
async fn test_fragment_from_unpaired_connection_is_dropped() {
    init_tracing();

    let (cmd_tx, mut delivery_rx, signaling) = create_test_switchboard();
    let a = connect(&cmd_tx, &mut delivery_rx).await.expect("connect A");
    let b = connect(&cmd_tx, &mut delivery_rx).await.expect("connect B");

    send_client(
        &cmd_tx,
        a,
        json!({ "event": "sendTranscription", "data": { "transcript": "anyone?" } }),
    )
    .await
    .expect("sendTranscription");
    settle(&cmd_tx, &mut delivery_rx).await.expect("settle");

    assert!(signaling.calls_to(&a).await.is_empty());
    assert!(signaling.calls_to(&b).await.is_empty());
}
