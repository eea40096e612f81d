use crate::error::{SwitchboardError, SwitchboardResult};
use callbridge_core::ConnectionId;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct PairingId(pub u64);

/// `Ended` is never stored: an ended pairing is removed from the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingState {
    Pending,
    Active,
}

#[derive(Debug, Clone)]
pub struct Pairing {
    pub id: PairingId,
    pub caller: ConnectionId,
    pub callee: ConnectionId,
    pub state: PairingState,
    pub since: DateTime<Utc>,
}

impl Pairing {
    pub fn peer_of(&self, id: &ConnectionId) -> Option<ConnectionId> {
        if *id == self.caller {
            Some(self.callee)
        } else if *id == self.callee {
            Some(self.caller)
        } else {
            None
        }
    }
}

/// Caller/callee associations, indexed from both sides.
///
/// A connection appears in at most one pairing at a time.
#[derive(Debug, Default)]
pub struct PairingTable {
    pairings: HashMap<PairingId, Pairing>,
    by_connection: HashMap<ConnectionId, PairingId>,
    next_id: u64,
}

impl PairingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pending call. Refused while either party is still paired.
    pub fn begin(
        &mut self,
        caller: ConnectionId,
        callee: ConnectionId,
    ) -> SwitchboardResult<PairingId> {
        if caller == callee {
            return Err(SwitchboardError::SelfCall(caller));
        }
        for party in [caller, callee] {
            if self.by_connection.contains_key(&party) {
                return Err(SwitchboardError::AlreadyPaired(party));
            }
        }

        self.next_id += 1;
        let id = PairingId(self.next_id);
        self.pairings.insert(
            id,
            Pairing {
                id,
                caller,
                callee,
                state: PairingState::Pending,
                since: Utc::now(),
            },
        );
        self.by_connection.insert(caller, id);
        self.by_connection.insert(callee, id);
        Ok(id)
    }

    /// Promote the pending pairing `caller -> callee` to active.
    ///
    /// Fails when no such pending pairing exists, including a duplicate accept
    /// of a pairing that is already active.
    pub fn accept(
        &mut self,
        callee: &ConnectionId,
        caller: &ConnectionId,
    ) -> SwitchboardResult<&Pairing> {
        let stale = || SwitchboardError::StaleAcceptance {
            caller: *caller,
            callee: *callee,
        };

        let pairing_id = self.by_connection.get(callee).ok_or_else(stale)?;
        let pairing = self.pairings.get_mut(pairing_id).ok_or_else(stale)?;
        if pairing.state != PairingState::Pending
            || pairing.callee != *callee
            || pairing.caller != *caller
        {
            return Err(stale());
        }

        pairing.state = PairingState::Active;
        pairing.since = Utc::now();
        Ok(&*pairing)
    }

    pub fn get(&self, id: &ConnectionId) -> Option<&Pairing> {
        let pairing_id = self.by_connection.get(id)?;
        self.pairings.get(pairing_id)
    }

    /// The other party of whatever pairing, pending or active, holds `id`.
    pub fn lookup_peer(&self, id: &ConnectionId) -> Option<ConnectionId> {
        self.get(id)?.peer_of(id)
    }

    /// Drop the pairing holding `id` and hand back the removed pairing.
    pub fn end(&mut self, id: &ConnectionId) -> Option<Pairing> {
        let pairing_id = self.by_connection.remove(id)?;
        let pairing = self.pairings.remove(&pairing_id)?;
        if let Some(peer) = pairing.peer_of(id) {
            self.by_connection.remove(&peer);
        }
        Some(pairing)
    }

    pub fn len(&self) -> usize {
        self.pairings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairings.is_empty()
    }
}
