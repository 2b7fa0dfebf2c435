//! The signed-in user record

use serde::{Deserialize, Serialize};

/// Identity written by the external session/profile collaborator.
/// Read-only from the reward core's perspective.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub email: String,
    #[serde(default)]
    pub mcname: String,
}

impl CurrentUser {
    /// A claim requires a usable email address
    pub fn has_email(&self) -> bool {
        !self.email.trim().is_empty()
    }
}
