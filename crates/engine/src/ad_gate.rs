//! Ad-gate engine: one engagement session at a time, one credited watch
//! per completed session.
//!
//! A watch runs a fixed 10-second engagement countdown at one-second
//! resolution. Closing the session is the only way to credit a watch, and
//! the close is rejected until the countdown reaches zero.

use crate::ledger::RewardLedger;
use adcrate_core::{Catalog, Error, Result, RewardCategory};
use tracing::{debug, info};

/// Fixed engagement period per watch attempt
pub const ENGAGEMENT_SECS: u32 = 10;

/// Parameters handed to the ad-network collaborator
#[derive(Debug, Clone)]
pub struct AdSlot {
    pub key: String,
    pub width: u32,
    pub height: u32,
}

impl Default for AdSlot {
    fn default() -> Self {
        Self {
            key: String::new(),
            width: 300,
            height: 250,
        }
    }
}

/// Ad-network boundary. Side-effecting and untyped from the core's point
/// of view; never a correctness dependency.
pub trait AdProvider {
    fn render(&self, slot: &AdSlot);
}

/// The single in-flight engagement session
#[derive(Debug, Clone, PartialEq)]
pub struct AdWatchSession {
    pub category: RewardCategory,
    pub id: String,
    pub seconds_remaining: u32,
}

impl AdWatchSession {
    /// Whether the engagement countdown has finished
    pub fn can_close(&self) -> bool {
        self.seconds_remaining == 0
    }
}

/// Gates watch credits behind the engagement countdown
#[derive(Default)]
pub struct AdGateEngine {
    slot: AdSlot,
    session: Option<AdWatchSession>,
}

impl AdGateEngine {
    pub fn new(slot: AdSlot) -> Self {
        Self {
            slot,
            session: None,
        }
    }

    /// The active session, if one exists
    pub fn session(&self) -> Option<&AdWatchSession> {
        self.session.as_ref()
    }

    /// Start a watch session for one reward.
    ///
    /// Rejected while another session is active, while the reward is
    /// locked, and once the reward already has all required watches.
    pub async fn begin_watch(
        &mut self,
        ledger: &mut RewardLedger,
        catalog: &Catalog,
        provider: &impl AdProvider,
        category: RewardCategory,
        id: &str,
    ) -> Result<AdWatchSession> {
        if let Some(active) = &self.session {
            return Err(Error::State(format!(
                "an ad session for {}/{} is already active",
                active.category, active.id
            )));
        }

        let def = catalog
            .find(category, id)
            .ok_or_else(|| Error::UnknownReward {
                category: category.to_string(),
                id: id.to_string(),
            })?;

        let progress = ledger.get(category, id).await?;
        if progress.lock_until.is_some() {
            return Err(Error::State(format!("{} is locked", def.label)));
        }
        if progress.ads_watched >= def.required_watches {
            return Err(Error::State(format!(
                "{} already has all {} required watches",
                def.label, def.required_watches
            )));
        }

        provider.render(&self.slot);

        let session = AdWatchSession {
            category,
            id: id.to_string(),
            seconds_remaining: ENGAGEMENT_SECS,
        };
        self.session = Some(session.clone());
        debug!(
            "Ad watch started for {}/{} ({}s engagement)",
            category, id, ENGAGEMENT_SECS
        );
        Ok(session)
    }

    /// Advance the countdown by one second; returns the updated session
    pub fn tick(&mut self) -> Option<AdWatchSession> {
        let session = self.session.as_mut()?;
        if session.seconds_remaining > 0 {
            session.seconds_remaining -= 1;
            if session.seconds_remaining == 0 {
                debug!(
                    "Engagement timer finished for {}/{}",
                    session.category, session.id
                );
            }
        }
        Some(session.clone())
    }

    /// Close the session and credit one watch.
    ///
    /// A no-op error while the countdown is still running. When the
    /// persist fails the session stays active so the close can be retried;
    /// no partial credit is ever recorded.
    pub async fn complete_watch(
        &mut self,
        ledger: &mut RewardLedger,
        category: RewardCategory,
        id: &str,
    ) -> Result<u32> {
        let Some(session) = &self.session else {
            return Err(Error::State("no ad session is active".to_string()));
        };
        if session.category != category || session.id != id {
            return Err(Error::State(format!(
                "active ad session belongs to {}/{}",
                session.category, session.id
            )));
        }
        if !session.can_close() {
            return Err(Error::State(format!(
                "engagement timer has {}s remaining",
                session.seconds_remaining
            )));
        }

        let mut progress = ledger.get(category, id).await?;
        progress.ads_watched += 1;
        let total = progress.ads_watched;
        ledger.put(category, id, progress).await?;
        self.session = None;

        info!("Watch credited for {}/{}: {} total", category, id, total);
        Ok(total)
    }
}
