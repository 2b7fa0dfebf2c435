//! Durable per-reward progress ledger and the historical claims log.
//!
//! Both live in the client's key/value store under disjoint namespaces:
//! the full ledger mapping under one key, one key per historical claim
//! record, and the current-user record under its own key. Every mutation
//! is persisted before it becomes visible in memory, so a failed write
//! leaves no observable change.

use adcrate_core::{
    unix_now, ClaimRecord, CurrentUser, Error, Result, RewardCategory, RewardProgress,
};
use adcrate_persistence::sqlite::store;
use adcrate_persistence::Database;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

const REWARDS_KEY: &str = "adcrate_rewards_v2";
const USER_KEY: &str = "adcrate_current_user";

/// Key prefix for historical claim records
pub const CLAIM_KEY_PREFIX: &str = "adcrate_claim_";

/// The persisted ledger mapping: `{ranks: {id → progress}, crates: {...}}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerState {
    #[serde(default)]
    pub ranks: HashMap<String, RewardProgress>,
    #[serde(default)]
    pub crates: HashMap<String, RewardProgress>,
}

impl LedgerState {
    fn bucket(&self, category: RewardCategory) -> &HashMap<String, RewardProgress> {
        match category {
            RewardCategory::Rank => &self.ranks,
            RewardCategory::Crate => &self.crates,
        }
    }

    fn bucket_mut(&mut self, category: RewardCategory) -> &mut HashMap<String, RewardProgress> {
        match category {
            RewardCategory::Rank => &mut self.ranks,
            RewardCategory::Crate => &mut self.crates,
        }
    }
}

/// Owns the in-memory ledger mapping and its durable copy
pub struct RewardLedger {
    db: Database,
    state: LedgerState,
}

impl RewardLedger {
    /// Load the ledger from the durable store. A corrupt payload degrades
    /// to an empty mapping rather than refusing to start.
    pub async fn open(db: Database) -> Result<Self> {
        let state = match store::get_value(db.pool(), REWARDS_KEY).await? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(state) => state,
                Err(e) => {
                    warn!("Stored reward ledger is corrupt, starting fresh: {}", e);
                    LedgerState::default()
                }
            },
            None => LedgerState::default(),
        };

        Ok(Self { db, state })
    }

    /// The underlying database handle
    pub fn db(&self) -> &Database {
        &self.db
    }

    async fn persist(&self, candidate: &LedgerState) -> Result<()> {
        let raw = serde_json::to_string(candidate).map_err(|e| Error::Storage(e.to_string()))?;
        store::put_value(self.db.pool(), REWARDS_KEY, &raw).await
    }

    /// Read one reward's progress, creating a zero-value record on first
    /// access and applying the lazy cooldown-expiry reset.
    pub async fn get(&mut self, category: RewardCategory, id: &str) -> Result<RewardProgress> {
        let now = unix_now();
        match self.state.bucket(category).get(id) {
            Some(progress) if progress.lock_expired(now) => {
                let mut candidate = self.state.clone();
                candidate
                    .bucket_mut(category)
                    .insert(id.to_string(), RewardProgress::default());
                self.persist(&candidate).await?;
                self.state = candidate;
                debug!("Cooldown expired for {}/{} — progress reset", category, id);
                Ok(RewardProgress::default())
            }
            Some(progress) => Ok(progress.clone()),
            None => Ok(RewardProgress::default()),
        }
    }

    /// Write one reward's progress. The durable write happens before the
    /// in-memory commit.
    pub async fn put(
        &mut self,
        category: RewardCategory,
        id: &str,
        progress: RewardProgress,
    ) -> Result<()> {
        let mut candidate = self.state.clone();
        candidate
            .bucket_mut(category)
            .insert(id.to_string(), progress);
        self.persist(&candidate).await?;
        self.state = candidate;
        Ok(())
    }

    /// The signed-in user, if any
    pub async fn current_user(&self) -> Result<Option<CurrentUser>> {
        match store::get_value(self.db.pool(), USER_KEY).await? {
            Some(raw) => {
                let user = serde_json::from_str(&raw)
                    .map_err(|e| Error::InvalidData(format!("current user record: {}", e)))?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    /// Store the current-user record. The session collaborator owns this
    /// record; the engines only read it.
    pub async fn set_current_user(&self, user: &CurrentUser) -> Result<()> {
        let raw = serde_json::to_string(user).map_err(|e| Error::Storage(e.to_string()))?;
        store::put_value(self.db.pool(), USER_KEY, &raw).await
    }

    /// Append one claim record to the historical log (key = record id)
    pub async fn append_claim(&self, record: &ClaimRecord) -> Result<()> {
        let raw = serde_json::to_string(record).map_err(|e| Error::Storage(e.to_string()))?;
        store::put_value(self.db.pool(), &record.id, &raw).await
    }

    /// Remove one claim record (rollback path only)
    pub async fn remove_claim(&self, id: &str) -> Result<()> {
        store::delete_value(self.db.pool(), id).await
    }

    /// All locally recorded claims, oldest first. Corrupt entries are
    /// skipped, not fatal.
    pub async fn claim_history(&self) -> Result<Vec<ClaimRecord>> {
        let rows = store::list_prefix(self.db.pool(), CLAIM_KEY_PREFIX).await?;
        let mut records = Vec::with_capacity(rows.len());
        for (key, raw) in rows {
            match serde_json::from_str(&raw) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping corrupt claim record {}: {}", key, e),
            }
        }
        Ok(records)
    }
}
