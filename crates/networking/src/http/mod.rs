pub mod client;

pub use client::{ClaimRecorder, RecorderClient};
