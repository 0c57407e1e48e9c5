//! Reactive state layer for the civic-data dashboard.
//!
//! Three independently undoable domain stores (view/filter, module catalog,
//! privacy) built from the same primitives: an immutable snapshot per domain,
//! a linear [`History`], and a [`PersistenceAdapter`] that writes a declared
//! subset of each snapshot to durable key/value storage.

pub mod config;
pub mod coordinator;
pub mod dashboard;
pub mod error;
pub mod history;
pub mod module;
pub mod persistence;
pub mod privacy;
pub mod remote;
pub mod selectors;
pub mod store;
pub mod view;

pub use config::DashboardConfig;
pub use coordinator::Undoable;
pub use dashboard::Dashboard;
pub use error::{CivicError, Result};
pub use history::{History, HistoryState};
pub use persistence::{Envelope, KeyValueStore, MemoryStore, PersistenceAdapter};
pub use store::DomainStore;
