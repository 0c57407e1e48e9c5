//! View/filter domain: search text, category, favorites and display options.

mod envelope;
mod model;
mod store;

pub use envelope::ViewEnvelope;
pub use model::{
    Density, MAX_SEARCH_QUERY_LEN, SavedQuery, VelocityWindow, ViewMode, ViewSnapshot,
};
pub use store::ViewStore;
