use std::collections::HashMap;

use shared::{domain::ConnectionId, protocol::ServerEvent};
use tokio::sync::mpsc;
use tracing::debug;

pub type EventSender = mpsc::UnboundedSender<ServerEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<ServerEvent>;

/// Open connections and their outbound queues.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, EventSender>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: ConnectionId, sender: EventSender) {
        self.connections.insert(id, sender);
    }

    pub fn unregister(&mut self, id: ConnectionId) -> bool {
        self.connections.remove(&id).is_some()
    }

    #[cfg(test)]
    pub fn contains(&self, id: ConnectionId) -> bool {
        self.connections.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Queues `event` for one connection. Returns whether it was accepted.
    pub fn send_to(&self, id: ConnectionId, event: ServerEvent) -> bool {
        match self.connections.get(&id) {
            Some(sender) => sender.send(event).is_ok(),
            None => false,
        }
    }

    /// Queues `event` for every connection and returns how many accepted it.
    ///
    /// A closed queue does not stop delivery to the rest; its connection is
    /// dropped from the registry.
    pub fn broadcast(&mut self, event: &ServerEvent) -> usize {
        let mut delivered = 0;
        self.connections.retain(|id, sender| {
            if sender.send(event.clone()).is_ok() {
                delivered += 1;
                true
            } else {
                debug!(connection = %id, event = event.name(), "pruning closed connection");
                false
            }
        });
        delivered
    }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
