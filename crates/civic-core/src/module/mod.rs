//! Module catalog domain: toggleable feature panels.

mod envelope;
mod model;
mod reconcile;
mod store;

pub use envelope::{ModuleEnvelope, ModuleOverride};
pub use model::{ModuleCatalogSnapshot, ModuleId, ModuleRecord, module_id};
pub use reconcile::{build_catalog, reconcile, validate_catalog};
pub use store::{ModuleStore, catalog_snapshot};
