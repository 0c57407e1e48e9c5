//! Durable subset of the module catalog snapshot.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::model::{ModuleCatalogSnapshot, ModuleId, ModuleRecord};
use crate::persistence::{Envelope, lenient};

/// The user's override for one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleOverride {
    pub enabled: bool,
}

/// Persisted module state: only the per-id `enabled` flag.
///
/// Names, priorities and weights always come from the freshly supplied
/// catalog, and ids missing from that catalog are ignored on merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleEnvelope {
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub modules: Option<BTreeMap<ModuleId, ModuleOverride>>,
}

impl Envelope for ModuleEnvelope {
    type Snapshot = ModuleCatalogSnapshot;
    const KEY: &'static str = "civic.modules";

    fn project(snapshot: &ModuleCatalogSnapshot) -> Self {
        Self {
            modules: Some(
                snapshot
                    .modules
                    .iter()
                    .map(|(id, m)| (id.clone(), ModuleOverride { enabled: m.enabled }))
                    .collect(),
            ),
        }
    }

    fn merge_into(self, fresh: ModuleCatalogSnapshot) -> ModuleCatalogSnapshot {
        let Some(overrides) = self.modules else {
            return fresh;
        };
        let modules = fresh
            .modules
            .into_iter()
            .map(|(id, record)| {
                let entry = match overrides.get(&id) {
                    Some(o) if o.enabled != record.enabled => Arc::new(ModuleRecord {
                        enabled: o.enabled,
                        ..ModuleRecord::clone(&record)
                    }),
                    _ => record,
                };
                (id, entry)
            })
            .collect();
        ModuleCatalogSnapshot { modules }
    }
}
