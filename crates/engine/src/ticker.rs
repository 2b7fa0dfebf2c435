//! Background one-second sweep: advances the ad-gate countdown, applies
//! lazy cooldown-expiry resets, and publishes fresh reward views.

use crate::ad_gate::AdGateEngine;
use crate::ledger::RewardLedger;
use crate::status::{reward_views, RewardView};
use adcrate_core::Catalog;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Handle to control the reward ticker
#[derive(Clone)]
pub struct TickerHandle {
    cancel: CancellationToken,
    views_rx: watch::Receiver<Vec<RewardView>>,
}

impl TickerHandle {
    /// Subscribe to the published reward views
    pub fn subscribe(&self) -> watch::Receiver<Vec<RewardView>> {
        self.views_rx.clone()
    }

    /// Stop the ticker task
    pub fn stop(&self) {
        self.cancel.cancel();
        info!("Reward ticker stopped");
    }
}

/// Spawn the one-second refresh task.
/// Returns a handle for subscribing and stopping.
pub fn spawn_reward_ticker(
    ledger: Arc<Mutex<RewardLedger>>,
    gate: Arc<Mutex<AdGateEngine>>,
    catalog: Arc<Catalog>,
) -> TickerHandle {
    let cancel = CancellationToken::new();
    let (views_tx, views_rx) = watch::channel(Vec::new());

    tokio::spawn(ticker_loop(ledger, gate, catalog, cancel.clone(), views_tx));

    TickerHandle { cancel, views_rx }
}

async fn ticker_loop(
    ledger: Arc<Mutex<RewardLedger>>,
    gate: Arc<Mutex<AdGateEngine>>,
    catalog: Arc<Catalog>,
    cancel: CancellationToken,
    views_tx: watch::Sender<Vec<RewardView>>,
) {
    info!("Reward ticker started");
    let mut interval = tokio::time::interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                info!("Reward ticker cancelled, exiting");
                return;
            }
            _ = interval.tick() => {
                gate.lock().await.tick();

                let mut ledger = ledger.lock().await;
                match reward_views(&mut ledger, &catalog).await {
                    Ok(views) => {
                        let _ = views_tx.send(views);
                    }
                    Err(e) => warn!("Reward refresh failed: {}", e),
                }
            }
        }
    }
}
