//! High-level API wrappers for the claim recorder
//!
//! Adds client-side validation on top of the raw HTTP client so obviously
//! incomplete submissions never leave the process.

mod claims;

pub use claims::*;
