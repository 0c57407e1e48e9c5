//! Durable form of the privacy snapshot: every field is persisted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::model::PrivacySnapshot;
use crate::persistence::{Envelope, lenient};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyEnvelope {
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub privacy_mode: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub local_upvotes: Option<BTreeMap<String, u64>>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub local_downvotes: Option<BTreeMap<String, u64>>,
}

impl Envelope for PrivacyEnvelope {
    type Snapshot = PrivacySnapshot;
    const KEY: &'static str = "civic.privacy";

    fn project(snapshot: &PrivacySnapshot) -> Self {
        Self {
            privacy_mode: Some(snapshot.privacy_mode),
            local_upvotes: Some(snapshot.local_upvotes.clone()),
            local_downvotes: Some(snapshot.local_downvotes.clone()),
        }
    }

    fn merge_into(self, fresh: PrivacySnapshot) -> PrivacySnapshot {
        PrivacySnapshot {
            privacy_mode: self.privacy_mode.unwrap_or(fresh.privacy_mode),
            local_upvotes: self.local_upvotes.unwrap_or(fresh.local_upvotes),
            local_downvotes: self.local_downvotes.unwrap_or(fresh.local_downvotes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_counts_are_rejected_per_field() {
        let envelope: PrivacyEnvelope = serde_json::from_str(
            r#"{"privacyMode": true, "localUpvotes": {"s1": -3}, "localDownvotes": {"s1": 2}}"#,
        )
        .unwrap();
        let restored = envelope.merge_into(PrivacySnapshot::default());

        assert!(restored.privacy_mode);
        assert!(restored.local_upvotes.is_empty());
        assert_eq!(restored.local_votes("s1"), (0, 2));
    }
}
