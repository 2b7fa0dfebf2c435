//! Reward catalog entries and per-reward progress records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the catalog a reward belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardCategory {
    Rank,
    Crate,
}

impl RewardCategory {
    /// Label used in the claim protocol's `reward_type` field
    pub fn wire_label(&self) -> &'static str {
        match self {
            RewardCategory::Rank => "Rank",
            RewardCategory::Crate => "Crate",
        }
    }
}

impl fmt::Display for RewardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewardCategory::Rank => write!(f, "rank"),
            RewardCategory::Crate => write!(f, "crate"),
        }
    }
}

/// One catalog entry; immutable after construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardDefinition {
    pub category: RewardCategory,
    pub id: String,
    pub label: String,
    pub emoji: String,
    /// Credited ad watches required before the reward can be claimed
    pub required_watches: u32,
    /// Cooldown applied when the reward is claimed
    pub lock_secs: i64,
}

/// Durable per-reward progress record.
///
/// Serialized field names match the persisted ledger format
/// (`adsWatched` / `code` / `lockUntil`, absent when unset).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardProgress {
    #[serde(default, rename = "adsWatched")]
    pub ads_watched: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, rename = "lockUntil", skip_serializing_if = "Option::is_none")]
    pub lock_until: Option<i64>,
}

impl RewardProgress {
    /// Whether a cooldown lock is currently in force
    pub fn is_locked(&self, now: i64) -> bool {
        self.lock_until.map(|t| t > now).unwrap_or(false)
    }

    /// Whether a cooldown lock exists but its window has passed
    pub fn lock_expired(&self, now: i64) -> bool {
        self.lock_until.map(|t| now >= t).unwrap_or(false)
    }

    /// Seconds of cooldown remaining (0 when unlocked or expired)
    pub fn remaining_lock(&self, now: i64) -> i64 {
        self.lock_until.map(|t| (t - now).max(0)).unwrap_or(0)
    }
}
