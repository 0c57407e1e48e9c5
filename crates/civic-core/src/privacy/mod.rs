//! Privacy domain: privacy mode and the local-only vote ledger.

mod envelope;
mod model;
mod store;

pub use envelope::PrivacyEnvelope;
pub use model::{PrivacySnapshot, VoteDirection};
pub use store::PrivacyStore;
