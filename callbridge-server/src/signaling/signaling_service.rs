use crate::call::CallCommand;
use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use callbridge_core::{ConnectionId, ServerMessage};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, warn};

struct SignalingInner {
    sockets: DashMap<ConnectionId, mpsc::UnboundedSender<Message>>,
}

/// Holds the write half of every open socket and the switchboard's inbox.
///
/// Cheap to clone; clones share the same socket map.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
    pub(crate) call_cmd_tx: mpsc::Sender<CallCommand>,
}

impl SignalingService {
    pub fn new(call_cmd_tx: mpsc::Sender<CallCommand>) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                sockets: DashMap::new(),
            }),
            call_cmd_tx,
        }
    }

    pub fn add_socket(&self, conn_id: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.sockets.insert(conn_id, tx);
    }

    pub fn remove_socket(&self, conn_id: &ConnectionId) {
        self.inner.sockets.remove(conn_id);
    }

    pub fn socket_count(&self) -> usize {
        self.inner.sockets.len()
    }

    pub fn send_message(&self, conn_id: ConnectionId, msg: ServerMessage) {
        let Some(socket) = self.inner.sockets.get(&conn_id) else {
            warn!("Attempted to send {:?} to disconnected connection {}", msg, conn_id);
            return;
        };
        match serde_json::to_string(&msg) {
            Ok(json) => {
                if let Err(e) = socket.send(Message::Text(json.into())) {
                    error!("Failed to send WS message to {}: {:?}", conn_id, e);
                }
            }
            Err(e) => error!("Failed to serialize server message: {}", e),
        }
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn send_identity(&self, conn_id: ConnectionId) {
        self.send_message(conn_id, ServerMessage::Me { id: conn_id });
    }

    async fn send_incoming_call(
        &self,
        to: ConnectionId,
        from: ConnectionId,
        name: Option<String>,
        signal: Value,
    ) {
        self.send_message(to, ServerMessage::CallUser { signal, from, name });
    }

    async fn send_call_accepted(&self, to: ConnectionId, name: Option<String>, signal: Value) {
        self.send_message(to, ServerMessage::CallAccepted { signal, name });
    }

    async fn send_call_ended(&self, to: ConnectionId) {
        self.send_message(to, ServerMessage::CallEnded);
    }

    async fn send_transcription(
        &self,
        to: ConnectionId,
        sender_name: String,
        transcript: String,
        sent_at: DateTime<Utc>,
    ) {
        self.send_message(
            to,
            ServerMessage::Transcription {
                transcript,
                sender_name,
                sent_at,
            },
        );
    }
}
