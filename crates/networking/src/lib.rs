//! AdCrate Networking - HTTP client and API wrappers for the remote
//! claim recorder

pub mod api;
pub mod http;

pub use http::{ClaimRecorder, RecorderClient};
