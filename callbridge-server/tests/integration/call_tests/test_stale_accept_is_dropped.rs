use callbridge_core::ServerMessage;
use serde_json::json;

use crate::integration::{create_test_switchboard, init_tracing};
use crate::utils::{connect, send_client, settle};

#[tokio::test]
async fn test_stale_accept_is_dropped() {
    init_tracing();

    let (cmd_tx, mut delivery_rx, signaling) = create_test_switchboard();
    let a = connect(&cmd_tx, &mut delivery_rx).await.expect("connect A");
    let b = connect(&cmd_tx, &mut delivery_rx).await.expect("connect B");
    let c = connect(&cmd_tx, &mut delivery_rx).await.expect("connect C");

    send_client(
        &cmd_tx,
        a,
        json!({ "event": "callUser", "data": { "userToCall": b, "signalData": { "sdp": "x" } } }),
    )
    .await
    .expect("callUser");

    // C was never called, and B answers the wrong caller.
    send_client(
        &cmd_tx,
        c,
        json!({ "event": "answerCall", "data": { "signal": { "sdp": "evil" }, "to": a } }),
    )
    .await
    .expect("answerCall from C");
    send_client(
        &cmd_tx,
        b,
        json!({ "event": "answerCall", "data": { "signal": { "sdp": "lost" }, "to": c } }),
    )
    .await
    .expect("answerCall to C");
    settle(&cmd_tx, &mut delivery_rx).await.expect("settle");

    assert!(signaling.calls_to(&a).await.is_empty());
    assert!(signaling.calls_to(&c).await.is_empty());

    // The real answer still goes through, exactly once.
    for _ in 0..2 {
        send_client(
            &cmd_tx,
            b,
            json!({ "event": "answerCall", "data": { "signal": { "sdp": "y" }, "to": a } }),
        )
        .await
        .expect("answerCall");
    }
    settle(&cmd_tx, &mut delivery_rx).await.expect("settle");

    assert_eq!(
        signaling.calls_to(&a).await,
        vec![ServerMessage::CallAccepted {
            signal: json!({ "sdp": "y" }),
            name: None,
        }]
    );
}

#[tokio::test]
async fn test_caller_cannot_accept_its_own_call() {
    init_tracing();

    let (cmd_tx, mut delivery_rx, signaling) = create_test_switchboard();
    let a = connect(&cmd_tx, &mut delivery_rx).await.expect("connect A");
    let b = connect(&cmd_tx, &mut delivery_rx).await.expect("connect B");

    send_client(
        &cmd_tx,
        a,
        json!({ "event": "callUser", "data": { "userToCall": b, "signalData": {} } }),
    )
    .await
    .expect("callUser");
    send_client(
        &cmd_tx,
        a,
        json!({ "event": "answerCall", "data": { "signal": {}, "to": b } }),
    )
    .await
    .expect("answerCall");
    settle(&cmd_tx, &mut delivery_rx).await.expect("settle");

    assert_eq!(signaling.calls_to(&b).await.len(), 1);
    assert!(signaling.calls_to(&a).await.is_empty());
}
