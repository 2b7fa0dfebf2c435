//! Claim engine: converts sufficient watch credits into a redemption code
//! plus a cooldown lock.
//!
//! Ordering is deliberate: the lock and code are persisted locally before
//! the remote recorder is contacted, and the remote outcome is absorbed.
//! The local historical record is authoritative for whether the user
//! received a claim.

use crate::ledger::{RewardLedger, CLAIM_KEY_PREFIX};
use adcrate_core::{
    iso_now, unix_now, Catalog, ClaimRecord, Error, Result, RewardCategory, RewardDefinition,
    RewardProgress,
};
use adcrate_networking::ClaimRecorder;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, error, info, warn};

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of every issued redemption code
pub const CODE_LEN: usize = 8;

/// Lifecycle of one reward between cooldown resets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimState {
    Ineligible,
    Eligible,
    Claiming,
    Claimed,
}

/// Classify a reward's current state
pub fn claim_state(def: &RewardDefinition, progress: &RewardProgress, now: i64) -> ClaimState {
    if progress.code.is_some() {
        ClaimState::Claimed
    } else if progress.is_locked(now) {
        ClaimState::Ineligible
    } else if progress.ads_watched >= def.required_watches {
        ClaimState::Eligible
    } else {
        ClaimState::Ineligible
    }
}

/// Draw an 8-character redemption code from `[A-Z0-9]`.
///
/// No uniqueness check against previously issued codes; collisions are
/// ~1/36^8 per pair at this scale.
pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// What a successful claim hands back to the caller
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimOutcome {
    pub code: String,
    pub reward_label: String,
    pub lock_until: i64,
}

/// Claim one eligible reward for the signed-in user.
///
/// Storage failures while writing the lock or the historical record roll
/// back the lock/code fields only and are reported to the caller; watch
/// progress is never rolled back. The remote submission is a single
/// best-effort attempt whose outcome never fails the claim.
pub async fn claim(
    ledger: &mut RewardLedger,
    catalog: &Catalog,
    recorder: &impl ClaimRecorder,
    category: RewardCategory,
    id: &str,
) -> Result<ClaimOutcome> {
    let user = ledger
        .current_user()
        .await?
        .filter(|u| u.has_email())
        .ok_or_else(|| {
            Error::Validation("a signed-in user with an email is required to claim".to_string())
        })?;

    let def = catalog
        .find(category, id)
        .ok_or_else(|| Error::UnknownReward {
            category: category.to_string(),
            id: id.to_string(),
        })?;

    let now = unix_now();
    let before = ledger.get(category, id).await?;
    match claim_state(def, &before, now) {
        ClaimState::Eligible => {}
        state => {
            return Err(Error::State(format!(
                "{} is not claimable ({:?}, {}/{} watches)",
                def.label, state, before.ads_watched, def.required_watches
            )));
        }
    }

    let code = generate_code();
    let lock_until = now + def.lock_secs;
    debug!(
        "{}/{}: {:?} — issuing code, locking for {}s",
        category,
        id,
        ClaimState::Claiming,
        def.lock_secs
    );

    let mut locked = before.clone();
    locked.code = Some(code.clone());
    locked.lock_until = Some(lock_until);
    ledger.put(category, id, locked).await?;

    let record = ClaimRecord {
        id: format!("{}{}", CLAIM_KEY_PREFIX, chrono::Utc::now().timestamp_millis()),
        email: user.email.clone(),
        mcname: user.mcname.clone(),
        code: code.clone(),
        reward_type: category.wire_label().to_string(),
        reward_name: def.label.clone(),
        timestamp: iso_now(),
        status: "claimed".to_string(),
    };

    if let Err(e) = ledger.append_claim(&record).await {
        error!(
            "Failed to store claim record for {}/{}, rolling back lock: {}",
            category, id, e
        );
        if let Err(rollback) = ledger.put(category, id, before).await {
            error!("Rollback for {}/{} also failed: {}", category, id, rollback);
        }
        return Err(e);
    }

    // Best-effort remote mirror; the local record is authoritative.
    match recorder.record(&record.to_submission()).await {
        Ok(response) if response.success => {
            debug!("Claim {} recorded remotely", record.id);
        }
        Ok(response) => {
            warn!(
                "Remote recorder rejected claim {} (kept locally): {}",
                record.id, response.message
            );
        }
        Err(e) => {
            warn!(
                "Remote sync failed for claim {} (kept locally): {}",
                record.id, e
            );
        }
    }

    info!(
        "{} claimed by {}: code issued, locked until {}",
        def.label, user.email, lock_until
    );
    Ok(ClaimOutcome {
        code,
        reward_label: def.label.clone(),
        lock_until,
    })
}
