use crate::call::call_command::CallCommand;
use crate::call::pairing::PairingTable;
use crate::call::registry::ConnectionRegistry;
use crate::error::{SwitchboardError, SwitchboardResult};
use crate::signaling::SignalingOutput;
use callbridge_core::{ConnectionId, EnvelopeKind, SignalEnvelope, TranscriptFragment};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Owns the connection registry and the pairing table.
///
/// All state changes happen on the switchboard task, one command at a time,
/// so a disconnect can never interleave with a half-applied pairing update.
pub struct Switchboard {
    registry: ConnectionRegistry,
    pairings: PairingTable,
    command_rx: mpsc::Receiver<CallCommand>,
    signaling: Arc<dyn SignalingOutput>,
}

impl Switchboard {
    pub fn new(
        command_rx: mpsc::Receiver<CallCommand>,
        signaling: Arc<dyn SignalingOutput>,
    ) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            pairings: PairingTable::new(),
            command_rx,
            signaling,
        }
    }

    pub async fn run(mut self) {
        info!("Switchboard event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }

        info!(
            "Command channel closed, switchboard shutting down with {} connections and {} calls",
            self.registry.len(),
            self.pairings.len()
        );
    }

    async fn handle_command(&mut self, cmd: CallCommand) {
        match cmd {
            CallCommand::Register { conn_id } => self.register(conn_id).await,

            CallCommand::Identify { conn_id } => {
                if self.registry.contains(&conn_id) {
                    self.signaling.send_identity(conn_id).await;
                }
            }

            CallCommand::Signal(envelope) => {
                let result = match envelope.kind {
                    EnvelopeKind::CallInitiate => self.on_call_initiate(envelope).await,
                    EnvelopeKind::CallAccept => self.on_call_accept(envelope).await,
                };
                if let Err(e) = result {
                    warn!("Dropped signal: {}", e);
                }
            }

            CallCommand::Transcript { conn_id, fragment } => {
                if let Err(e) = self.on_fragment(conn_id, fragment).await {
                    debug!("Dropped transcript fragment: {}", e);
                }
            }

            CallCommand::Leave { conn_id } => {
                info!("Connection {} left its call", conn_id);
                self.end_call(&conn_id).await;
            }

            CallCommand::Disconnect { conn_id } => self.disconnect(conn_id).await,
        }
    }

    async fn register(&mut self, conn_id: ConnectionId) {
        if self.registry.register(conn_id).is_some() {
            // The evicted holder of this id loses its call as if it disconnected.
            self.end_call(&conn_id).await;
        }
        info!("Connection {} registered ({} live)", conn_id, self.registry.len());
        self.signaling.send_identity(conn_id).await;
    }

    async fn on_call_initiate(&mut self, envelope: SignalEnvelope) -> SwitchboardResult<()> {
        let SignalEnvelope {
            from,
            to,
            payload,
            display_name,
            ..
        } = envelope;

        if !self.registry.contains(&from) {
            return Err(SwitchboardError::NotConnected(from));
        }
        if !self.registry.contains(&to) {
            return Err(SwitchboardError::NotConnected(to));
        }

        self.registry.set_display_name(&from, display_name.as_deref());
        let pairing_id = self.pairings.begin(from, to)?;
        info!("Call {:?} pending: {} -> {}", pairing_id, from, to);

        let name = display_name.or_else(|| self.registry.display_name(&from).map(String::from));
        self.signaling.send_incoming_call(to, from, name, payload).await;
        Ok(())
    }

    async fn on_call_accept(&mut self, envelope: SignalEnvelope) -> SwitchboardResult<()> {
        let SignalEnvelope {
            from: callee,
            to: caller,
            payload,
            display_name,
            ..
        } = envelope;

        let pairing = self.pairings.accept(&callee, &caller)?;
        info!("Call {:?} active: {} <-> {}", pairing.id, caller, callee);

        self.registry.set_display_name(&callee, display_name.as_deref());
        self.signaling
            .send_call_accepted(caller, display_name, payload)
            .await;
        Ok(())
    }

    async fn on_fragment(
        &mut self,
        conn_id: ConnectionId,
        fragment: TranscriptFragment,
    ) -> SwitchboardResult<()> {
        let peer = self
            .pairings
            .lookup_peer(&conn_id)
            .ok_or(SwitchboardError::NoPeer(conn_id))?;

        let sender_name = fragment.sender_label(self.registry.display_name(&conn_id));
        self.signaling
            .send_transcription(peer, sender_name, fragment.text, Utc::now())
            .await;
        Ok(())
    }

    async fn disconnect(&mut self, conn_id: ConnectionId) {
        let Some(connection) = self.registry.unregister(&conn_id) else {
            debug!("Disconnect for unknown connection {}", conn_id);
            return;
        };

        let lifetime = Utc::now() - connection.connected_at;
        info!(
            "Connection {} gone after {}s ({} live)",
            conn_id,
            lifetime.num_seconds(),
            self.registry.len()
        );
        self.end_call(&conn_id).await;
    }

    /// Tear down any pairing holding `conn_id` and notify the other side once.
    async fn end_call(&mut self, conn_id: &ConnectionId) {
        let Some(pairing) = self.pairings.end(conn_id) else {
            return;
        };
        info!(
            "Call {:?} ended by {} (was {:?})",
            pairing.id, conn_id, pairing.state
        );

        let Some(peer) = pairing.peer_of(conn_id) else {
            return;
        };
        if self.registry.contains(&peer) {
            self.signaling.send_call_ended(peer).await;
        }
    }
}
