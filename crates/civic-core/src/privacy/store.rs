//! Privacy store actions.

use super::envelope::PrivacyEnvelope;
use super::model::VoteDirection;
use crate::error::{CivicError, Result};
use crate::store::DomainStore;

pub type PrivacyStore = DomainStore<PrivacyEnvelope>;

impl DomainStore<PrivacyEnvelope> {
    pub fn toggle_privacy_mode(&mut self) -> Result<()> {
        self.commit(|s| s.with_privacy_mode_toggled())
    }

    /// Records one local-only vote for a source.
    pub fn increment_local_vote(&mut self, id: &str, direction: VoteDirection) -> Result<()> {
        if id.is_empty() {
            return Err(CivicError::validation("vote", "source id is empty"));
        }
        self.commit(|s| s.with_vote(id, direction))
    }

    pub fn local_votes(&self, id: &str) -> (u64, u64) {
        self.present().local_votes(id)
    }

    pub fn privacy_mode(&self) -> bool {
        self.present().privacy_mode
    }
}
