//! AdCrate Engine - Reward ledger, ad gating, and claim logic

pub mod ad_gate;
pub mod claim;
pub mod ledger;
pub mod status;
pub mod ticker;

pub use ad_gate::{AdGateEngine, AdProvider, AdSlot, AdWatchSession, ENGAGEMENT_SECS};
pub use claim::{claim, claim_state, generate_code, ClaimOutcome, ClaimState};
pub use ledger::RewardLedger;
pub use status::{reward_views, RewardView};
pub use ticker::{spawn_reward_ticker, TickerHandle};
