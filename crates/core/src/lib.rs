//! AdCrate Core - Shared data models, catalog, types, and errors

pub mod catalog;
pub mod errors;
pub mod models;
pub mod types;

pub use catalog::Catalog;
pub use errors::{Error, Result};
pub use models::*;
pub use types::*;
