use crate::model::connection::ConnectionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Frames a browser client sends over its signaling socket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ClientMessage {
    /// Ring another connection, carrying the caller's negotiation offer.
    CallUser {
        user_to_call: ConnectionId,
        signal_data: Value,
        /// Id the client believes it has. The server substitutes the real one.
        #[serde(default)]
        from: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
    /// Accept an incoming call from `to`, carrying the callee's answer.
    AnswerCall {
        signal: Value,
        to: ConnectionId,
        #[serde(default)]
        name: Option<String>,
    },
    SendTranscription {
        transcript: String,
        #[serde(default)]
        sender: Option<String>,
    },
    /// Ask the server to repeat the `me` frame.
    GetMe,
    LeaveCall,
}

/// Frames the server pushes to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ServerMessage {
    Me {
        id: ConnectionId,
    },
    /// Incoming call notification delivered to the callee.
    CallUser {
        signal: Value,
        from: ConnectionId,
        name: Option<String>,
    },
    CallAccepted {
        signal: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    CallEnded,
    Transcription {
        transcript: String,
        sender_name: String,
        sent_at: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeKind {
    CallInitiate,
    CallAccept,
}

/// Negotiation payload travelling between the two parties of a call.
///
/// `payload` is never inspected; it is forwarded exactly as received.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalEnvelope {
    pub kind: EnvelopeKind,
    pub from: ConnectionId,
    pub to: ConnectionId,
    pub payload: Value,
    pub display_name: Option<String>,
}
