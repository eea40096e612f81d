use async_trait::async_trait;
use callbridge_core::ConnectionId;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Delivery side of the switchboard: whatever owns the client sockets
/// implements this so the switchboard can push frames to a connection.
///
/// Delivery is fire-and-forget. A connection that is already gone simply
/// misses the frame.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Tell a connection which id it was assigned.
    async fn send_identity(&self, conn_id: ConnectionId);

    /// Ring `to` with the caller's offer.
    async fn send_incoming_call(
        &self,
        to: ConnectionId,
        from: ConnectionId,
        name: Option<String>,
        signal: Value,
    );

    /// Hand the callee's answer back to the caller.
    async fn send_call_accepted(&self, to: ConnectionId, name: Option<String>, signal: Value);

    async fn send_call_ended(&self, to: ConnectionId);

    async fn send_transcription(
        &self,
        to: ConnectionId,
        sender_name: String,
        transcript: String,
        sent_at: DateTime<Utc>,
    );
}
