use crate::{CallCommand, SignalingService};
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use callbridge_core::{ClientMessage, ConnectionId};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(service): State<SignalingService>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, service))
}

async fn handle_socket(socket: WebSocket, service: SignalingService) {
    let conn_id = ConnectionId::new();
    info!("New WebSocket connection: {}", conn_id);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    // The socket must be reachable before the switchboard answers with `me`.
    service.add_socket(conn_id, tx);
    if let Err(e) = service
        .call_cmd_tx
        .send(CallCommand::Register { conn_id })
        .await
    {
        error!("Switchboard died: {}", e);
        service.remove_socket(&conn_id);
        return;
    }

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let service = service.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(client_msg) => {
                            let cmd = CallCommand::from_client(conn_id, client_msg);
                            if let Err(e) = service.call_cmd_tx.send(cmd).await {
                                error!("Switchboard died: {}", e);
                                break;
                            }
                        }
                        Err(e) => warn!("Invalid ClientMessage from {}: {:?}", conn_id, e),
                    },
                    Message::Close(_) => break,
                    Message::Binary(_) => debug!("Ignoring binary frame from {}", conn_id),
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    // Cleanup runs whichever half finished first.
    let _ = service
        .call_cmd_tx
        .send(CallCommand::Disconnect { conn_id })
        .await;
    service.remove_socket(&conn_id);
    info!("WebSocket disconnected: {}", conn_id);
}
