//! Records supplied by the dashboard's REST collaborators.
//!
//! The state layer never computes these; it only displays them and replaces a
//! cached record with the updated one a vote or tagging request returns.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

/// Records addressable by source id.
pub trait Keyed {
    fn key(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SourceStatus {
    Active,
    Inactive,
}

/// Server-side vote totals for a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStats {
    pub id: String,
    pub upvotes: u64,
    pub downvotes: u64,
    pub status: SourceStatus,
}

impl SourceStats {
    /// Share of upvotes as a rounded percentage, `None` before any vote.
    pub fn health_score(&self) -> Option<u8> {
        let total = self.upvotes.checked_add(self.downvotes)?;
        if total == 0 {
            return None;
        }
        let percent = (self.upvotes as f64 / total as f64 * 100.0).round();
        Some(percent as u8)
    }
}

/// Location guess for a source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoTag {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    pub confidence: f64,
    #[serde(default)]
    pub source: String,
}

impl GeoTag {
    /// Both coordinates are known.
    pub fn is_placed(&self) -> bool {
        self.lat.is_some() && self.lon.is_some()
    }
}

/// Cached AI narrative for a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSummary {
    pub id: String,
    pub narrative: String,
    /// Epoch milliseconds.
    pub cached_at: i64,
    /// Time to live, in milliseconds.
    pub ttl: i64,
}

impl AiSummary {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.cached_at)?
            .checked_add_signed(Duration::milliseconds(self.ttl))
    }

    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|expiry| now < expiry)
    }
}

impl Keyed for SourceStats {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for GeoTag {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for AiSummary {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Replaces the record with the same id, or appends it.
pub fn upsert_by_id<T: Keyed + Clone>(records: &[T], updated: T) -> Vec<T> {
    let mut next: Vec<T> = records.to_vec();
    match next.iter_mut().find(|r| r.key() == updated.key()) {
        Some(slot) => *slot = updated,
        None => next.push(updated),
    }
    next
}
