use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cached status histogram for one countable kind. A single snapshot exists
/// per kind and is always rebuilt from the record set, never incremented, so
/// it can be dropped and recomputed at any time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSnapshot {
    #[serde(flatten)]
    pub counts: BTreeMap<String, u64>,
    pub total: u64,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl CounterSnapshot {
    /// Builds a snapshot from a grouped count, zero-filling every status of
    /// the kind's enum so that absent buckets still appear with count 0.
    pub fn from_grouped(
        statuses: &[&'static str],
        grouped: &HashMap<String, u64>,
        now: DateTime<Utc>,
    ) -> Self {
        let counts: BTreeMap<String, u64> = statuses
            .iter()
            .map(|status| {
                (
                    (*status).to_string(),
                    grouped.get(*status).copied().unwrap_or(0),
                )
            })
            .collect();
        let total = counts.values().sum();

        Self {
            counts,
            total,
            updated_at: now,
        }
    }

    pub fn count(&self, status: &str) -> u64 {
        self.counts.get(status).copied().unwrap_or(0)
    }
}
