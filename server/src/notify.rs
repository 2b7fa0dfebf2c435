//! Claim notification sink.
//!
//! Fire-and-forget: the submit handler reports whether a notification was
//! dispatched but never fails a claim over it.

use adcrate_core::StoredClaim;
use tracing::{debug, info};

/// Notification boundary for newly stored claims
pub trait NotificationSink: Send + Sync {
    /// Returns whether a notification actually left the process
    fn notify(&self, claim: &StoredClaim) -> bool;
}

/// Logs the would-be notification instead of delivering it.
/// Mail delivery belongs to an external collaborator.
pub struct LogNotifier {
    recipient: Option<String>,
}

impl LogNotifier {
    pub fn new(recipient: Option<String>) -> Self {
        Self { recipient }
    }
}

impl NotificationSink for LogNotifier {
    fn notify(&self, claim: &StoredClaim) -> bool {
        match &self.recipient {
            Some(to) => {
                info!(
                    "Claim notification for {}: {} \"{}\" claimed by {} <{}> (code {})",
                    to, claim.reward_type, claim.reward_name, claim.mcname, claim.email, claim.code
                );
            }
            None => {
                debug!("No notification recipient configured — skipping for {}", claim.id);
            }
        }
        false
    }
}
