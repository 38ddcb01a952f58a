use shared::{
    domain::{CompetitionState, ConnectionId},
    protocol::{ClientCommand, ServerEvent},
};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info};

use crate::{
    catalog::Catalog,
    registry::{ConnectionRegistry, EventReceiver},
    snapshot::Snapshot,
    store::CompetitionStore,
};

struct Inner {
    store: CompetitionStore,
    registry: ConnectionRegistry,
}

/// The running competition: catalog, state and connections.
///
/// State and registry share one lock, so commands apply one at a time and a
/// joining connection is registered in the same critical section that reads
/// its snapshot. Every connection therefore observes one global event order.
pub struct Competition {
    catalog: Catalog,
    inner: Mutex<Inner>,
}

impl Competition {
    pub fn new(catalog: Catalog) -> Self {
        let store = CompetitionStore::new(catalog.len());
        Self {
            catalog,
            inner: Mutex::new(Inner {
                store,
                registry: ConnectionRegistry::new(),
            }),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub async fn state(&self) -> CompetitionState {
        self.inner.lock().await.store.get()
    }

    pub async fn snapshot(&self) -> Snapshot {
        let state = self.inner.lock().await.store.get();
        self.snapshot_of(state)
    }

    fn snapshot_of(&self, state: CompetitionState) -> Snapshot {
        Snapshot {
            started: state.started,
            questions: self.catalog.questions().to_vec(),
            current_question: state
                .started
                .then(|| self.catalog.get(state.current_index).cloned())
                .flatten(),
        }
    }

    /// Registers a new connection and queues its snapshot before any later
    /// broadcast can reach it.
    pub async fn connect(&self) -> (ConnectionId, EventReceiver) {
        let id = ConnectionId::new();
        let (sender, receiver) = mpsc::unbounded_channel();

        let mut inner = self.inner.lock().await;
        let snapshot = self.snapshot_of(inner.store.get());
        inner.registry.register(id, sender);
        for event in snapshot.into_events() {
            inner.registry.send_to(id, event);
        }
        info!(connection = %id, clients = inner.registry.len(), "client connected");
        (id, receiver)
    }

    pub async fn disconnect(&self, id: ConnectionId) -> bool {
        let mut inner = self.inner.lock().await;
        let removed = inner.registry.unregister(id);
        if removed {
            info!(connection = %id, clients = inner.registry.len(), "client disconnected");
        }
        removed
    }

    pub async fn connection_count(&self) -> usize {
        self.inner.lock().await.registry.len()
    }

    /// Applies a controller command and broadcasts the resulting events.
    ///
    /// Returns the events that were broadcast; empty when navigation hit an
    /// edge of the catalog.
    pub async fn apply(&self, command: ClientCommand) -> Vec<ServerEvent> {
        let mut inner = self.inner.lock().await;
        let Inner { store, registry } = &mut *inner;

        let events = match command {
            ClientCommand::StartCompetition => {
                store.start();
                let mut events = vec![ServerEvent::CompetitionStatus(true)];
                events.extend(self.catalog.get(0).cloned().map(ServerEvent::QuestionUpdate));
                events
            }
            ClientCommand::EndCompetition => {
                store.end();
                vec![ServerEvent::CompetitionStatus(false)]
            }
            ClientCommand::NextQuestion | ClientCommand::PreviousQuestion => {
                let Some(direction) = command.direction() else {
                    return Vec::new();
                };
                if !store.advance(direction) {
                    debug!(command = command.name(), "already at catalog edge");
                    return Vec::new();
                }
                let index = store.get().current_index;
                self.catalog
                    .get(index)
                    .cloned()
                    .map(ServerEvent::QuestionUpdate)
                    .into_iter()
                    .collect()
            }
            ClientCommand::ShowAnswer => {
                store.reveal_answer();
                vec![ServerEvent::ShowAnswer]
            }
        };

        let state = store.get();
        for event in &events {
            registry.broadcast(event);
        }
        info!(
            command = command.name(),
            started = state.started,
            index = state.current_index,
            clients = registry.len(),
            "command applied"
        );
        events
    }
}

#[cfg(test)]
#[path = "tests/processor_tests.rs"]
mod tests;
