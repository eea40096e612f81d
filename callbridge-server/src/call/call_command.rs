use callbridge_core::{
    ClientMessage, ConnectionId, EnvelopeKind, SignalEnvelope, TranscriptFragment,
};

/// Work items for the switchboard, sent by the socket handlers.
#[derive(Debug)]
pub enum CallCommand {
    /// Transport handshake finished; the connection is live.
    Register { conn_id: ConnectionId },

    /// Repeat the identity frame for a connection.
    Identify { conn_id: ConnectionId },

    /// Call initiation or acceptance.
    Signal(SignalEnvelope),

    Transcript {
        conn_id: ConnectionId,
        fragment: TranscriptFragment,
    },

    /// The client hung up but keeps its connection.
    Leave { conn_id: ConnectionId },

    /// Transport closed, cleanly or not.
    Disconnect { conn_id: ConnectionId },
}

impl CallCommand {
    pub fn from_client(conn_id: ConnectionId, msg: ClientMessage) -> Self {
        match msg {
            ClientMessage::CallUser {
                user_to_call,
                signal_data,
                from,
                name,
            } => {
                if let Some(claimed) = from.filter(|claimed| *claimed != conn_id.to_string()) {
                    tracing::warn!(
                        "Connection {} claimed to call as '{}', using its real id",
                        conn_id,
                        claimed
                    );
                }
                CallCommand::Signal(SignalEnvelope {
                    kind: EnvelopeKind::CallInitiate,
                    from: conn_id,
                    to: user_to_call,
                    payload: signal_data,
                    display_name: name,
                })
            }
            ClientMessage::AnswerCall { signal, to, name } => CallCommand::Signal(SignalEnvelope {
                kind: EnvelopeKind::CallAccept,
                from: conn_id,
                to,
                payload: signal,
                display_name: name,
            }),
            ClientMessage::SendTranscription { transcript, sender } => CallCommand::Transcript {
                conn_id,
                fragment: TranscriptFragment::new(transcript, sender),
            },
            ClientMessage::GetMe => CallCommand::Identify { conn_id },
            ClientMessage::LeaveCall => CallCommand::Leave { conn_id },
        }
    }
}
