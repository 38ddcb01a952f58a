//! Live quiz synchronization: one controller drives a fixed question catalog
//! and every connected client is kept on the same state.

mod catalog;
mod processor;
mod registry;
mod snapshot;
mod store;

pub use catalog::{Catalog, CatalogError};
pub use processor::Competition;
pub use registry::{ConnectionRegistry, EventReceiver, EventSender};
pub use snapshot::Snapshot;
pub use store::CompetitionStore;
