//! Once-per-day resource tracking.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Uses spent per feat since the last daily preparations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyUses {
    #[serde(default)]
    used: BTreeMap<String, u32>,
    #[serde(default)]
    last_preparations: Option<DateTime<Utc>>,
}

impl DailyUses {
    pub fn used(&self, feat_id: &str) -> u32 {
        self.used.get(feat_id).copied().unwrap_or(0)
    }

    pub fn remaining(&self, feat_id: &str, max: u32) -> u32 {
        max.saturating_sub(self.used(feat_id))
    }

    /// Spend one use, returning how many remain.
    ///
    /// # Errors
    ///
    /// `DomainError::Exhausted` when every use has been spent.
    pub fn use_once(&mut self, feat_id: &str, max: u32) -> Result<u32, DomainError> {
        let used = self.used(feat_id);
        if used >= max {
            return Err(DomainError::exhausted(feat_id, used, max));
        }
        self.used.insert(feat_id.to_string(), used + 1);
        Ok(max - used - 1)
    }

    /// Daily preparations: every use comes back.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.used.clear();
        self.last_preparations = Some(now);
    }

    pub fn last_preparations(&self) -> Option<DateTime<Utc>> {
        self.last_preparations
    }
}
