//! Recorder configuration from environment variables

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::warn;

const DEFAULT_PORT: u16 = 8787;

/// Runtime configuration for the claim recorder
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Address the HTTP server binds to
    pub bind: SocketAddr,
    /// SQLite database file
    pub db_path: PathBuf,
    /// Shared secret for the admin listing/deletion surface
    pub admin_key: String,
    /// Recipient for claim notifications (none disables them)
    pub notify_email: Option<String>,
}

impl RecorderConfig {
    /// Read configuration from the environment, with development defaults
    pub fn from_env() -> Self {
        let bind = env::var("ADCRATE_RECORDER_BIND")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)));

        let db_path = env::var("ADCRATE_RECORDER_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("adcrate-recorder.db"));

        let admin_key = env::var("ADCRATE_ADMIN_KEY").unwrap_or_else(|_| {
            warn!("ADCRATE_ADMIN_KEY not set — using the development default");
            "dev_admin_key".to_string()
        });

        let notify_email = env::var("ADCRATE_NOTIFY_EMAIL").ok().filter(|v| !v.is_empty());

        Self {
            bind,
            db_path,
            admin_key,
            notify_email,
        }
    }
}
