//! AdCrate Recorder - reference claim recorder service

pub mod config;
pub mod notify;
pub mod server;

pub use config::RecorderConfig;
pub use notify::{LogNotifier, NotificationSink};
pub use server::{build_router, RecorderState};
