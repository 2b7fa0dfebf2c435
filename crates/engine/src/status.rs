//! Per-reward display state, rebuilt on every one-second sweep

use crate::claim::{claim_state, ClaimState};
use crate::ledger::RewardLedger;
use adcrate_core::{format_duration, unix_now, Catalog, Result, RewardCategory};
use serde::Serialize;

/// Everything a UI needs to render one reward card
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardView {
    pub category: RewardCategory,
    pub id: String,
    pub label: String,
    pub emoji: String,
    pub required_watches: u32,
    pub ads_watched: u32,
    pub locked: bool,
    pub remaining_lock_secs: i64,
    pub remaining_lock_label: String,
    pub claimable: bool,
    pub claimed: bool,
    pub code: Option<String>,
}

/// Build the current view of every catalog reward.
///
/// Reading through the ledger applies the lazy cooldown-expiry resets, so
/// calling this once per second keeps the stored state current.
pub async fn reward_views(ledger: &mut RewardLedger, catalog: &Catalog) -> Result<Vec<RewardView>> {
    let now = unix_now();
    let mut views = Vec::new();

    for def in catalog.iter() {
        let progress = ledger.get(def.category, &def.id).await?;
        let locked = progress.is_locked(now);
        let remaining = progress.remaining_lock(now);

        views.push(RewardView {
            category: def.category,
            id: def.id.clone(),
            label: def.label.clone(),
            emoji: def.emoji.clone(),
            required_watches: def.required_watches,
            ads_watched: progress.ads_watched,
            locked,
            remaining_lock_secs: remaining,
            remaining_lock_label: format_duration(remaining),
            claimable: claim_state(def, &progress, now) == ClaimState::Eligible,
            claimed: progress.code.is_some(),
            code: progress.code,
        });
    }

    Ok(views)
}
