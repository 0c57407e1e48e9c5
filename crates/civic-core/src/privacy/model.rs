//! Privacy snapshot and local-only vote ledger.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Direction of a local vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

/// Privacy state at one instant.
///
/// Vote counts are unsigned, so the ledger can never hold a negative count.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacySnapshot {
    pub privacy_mode: bool,
    pub local_upvotes: BTreeMap<String, u64>,
    pub local_downvotes: BTreeMap<String, u64>,
}

impl PrivacySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(up, down)` local vote counts for a source.
    pub fn local_votes(&self, id: &str) -> (u64, u64) {
        (
            self.local_upvotes.get(id).copied().unwrap_or(0),
            self.local_downvotes.get(id).copied().unwrap_or(0),
        )
    }

    pub fn with_privacy_mode_toggled(&self) -> Self {
        Self {
            privacy_mode: !self.privacy_mode,
            ..self.clone()
        }
    }

    /// Returns a copy with one vote added.
    ///
    /// Counters saturate at `u64::MAX` instead of wrapping.
    pub fn with_vote(&self, id: &str, direction: VoteDirection) -> Self {
        let mut next = self.clone();
        let ledger = match direction {
            VoteDirection::Up => &mut next.local_upvotes,
            VoteDirection::Down => &mut next.local_downvotes,
        };
        let count = ledger.entry(id.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_vote_counts_per_direction() {
        let snapshot = PrivacySnapshot::new()
            .with_vote("s1", VoteDirection::Up)
            .with_vote("s1", VoteDirection::Up)
            .with_vote("s1", VoteDirection::Down);

        assert_eq!(snapshot.local_votes("s1"), (2, 1));
        assert_eq!(snapshot.local_votes("s2"), (0, 0));
    }

    #[test]
    fn test_vote_saturates() {
        let mut snapshot = PrivacySnapshot::new();
        snapshot.local_downvotes.insert("s1".into(), u64::MAX);
        let next = snapshot.with_vote("s1", VoteDirection::Down);
        assert_eq!(next.local_votes("s1"), (0, u64::MAX));
    }

    #[test]
    fn test_toggle_leaves_original() {
        let original = PrivacySnapshot::new();
        let toggled = original.with_privacy_mode_toggled();
        assert!(!original.privacy_mode);
        assert!(toggled.privacy_mode);
    }
}
