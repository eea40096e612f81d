use callbridge_core::ConnectionId;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::warn;

/// Book-keeping for one live connection.
#[derive(Debug, Clone)]
pub struct Connection {
    pub id: ConnectionId,
    pub connected_at: DateTime<Utc>,
    pub display_name: Option<String>,
}

/// Every connection the switchboard currently knows about.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, Connection>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly opened connection.
    ///
    /// Ids are random so a collision should never happen; if one does, the
    /// newer registration wins and the evicted entry is returned.
    pub fn register(&mut self, id: ConnectionId) -> Option<Connection> {
        let connection = Connection {
            id,
            connected_at: Utc::now(),
            display_name: None,
        };

        let evicted = self.connections.insert(id, connection);
        if evicted.is_some() {
            warn!("Connection id {} registered twice, evicting the old entry", id);
        }
        evicted
    }

    /// Remove a connection. Unknown ids are a no-op.
    pub fn unregister(&mut self, id: &ConnectionId) -> Option<Connection> {
        self.connections.remove(id)
    }

    pub fn get(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.get(id)
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.connections.contains_key(id)
    }

    pub fn display_name(&self, id: &ConnectionId) -> Option<&str> {
        self.connections.get(id)?.display_name.as_deref()
    }

    /// Remember the name a client announced. Blank names are ignored.
    pub fn set_display_name(&mut self, id: &ConnectionId, name: Option<&str>) {
        let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
            return;
        };
        if let Some(connection) = self.connections.get_mut(id) {
            connection.display_name = Some(name.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
