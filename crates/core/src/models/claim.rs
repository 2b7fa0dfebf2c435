//! Claim records and the remote recorder wire protocol

use serde::{Deserialize, Serialize};

fn default_status() -> String {
    "claimed".to_string()
}

/// A completed claim, mirrored locally and sent to the remote recorder.
/// Immutable once created; the local copy is authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub mcname: String,
    pub code: String,
    pub reward_type: String,
    pub reward_name: String,
    /// ISO-8601 claim time
    pub timestamp: String,
    #[serde(default = "default_status")]
    pub status: String,
}

impl ClaimRecord {
    /// Wire payload for the remote recorder submission
    pub fn to_submission(&self) -> ClaimSubmission {
        ClaimSubmission {
            email: self.email.clone(),
            mcname: self.mcname.clone(),
            code: self.code.clone(),
            reward_type: self.reward_type.clone(),
            reward_name: self.reward_name.clone(),
            timestamp: self.timestamp.clone(),
        }
    }
}

/// Body of `POST /` on the claim recorder.
///
/// All fields default to empty so the server can report which required
/// field is missing instead of failing JSON extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClaimSubmission {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mcname: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub reward_type: String,
    #[serde(default)]
    pub reward_name: String,
    #[serde(default)]
    pub timestamp: String,
}

/// Response to a claim submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub claim: Option<StoredClaim>,
    #[serde(default)]
    pub email_sent: Option<bool>,
}

/// A claim row as stored by the recorder, including server-side metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredClaim {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub mcname: String,
    pub code: String,
    pub reward_type: String,
    pub reward_name: String,
    pub timestamp: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Response to `GET /?admin_key=...` on the claim recorder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminListResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Vec<StoredClaim>,
}

/// Body of `DELETE /` on the claim recorder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminDeleteRequest {
    #[serde(default)]
    pub admin_key: String,
    #[serde(default)]
    pub id: String,
}

/// Generic success/message response from the recorder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminActionResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_response_tolerates_minimal_body() {
        let parsed: ClaimResponse =
            serde_json::from_str(r#"{"success":false,"message":"nope"}"#).unwrap();
        assert!(!parsed.success);
        assert!(parsed.claim.is_none());
        assert!(parsed.email_sent.is_none());
    }

    #[test]
    fn test_stored_claim_defaults() {
        let parsed: StoredClaim = serde_json::from_str(
            r#"{"id":"claim_1","email":"a@b.c","code":"AAAA0000",
                "reward_type":"Crate","reward_name":"Stone Crate",
                "timestamp":"2026-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(parsed.status, "claimed");
        assert_eq!(parsed.mcname, "");
        assert!(parsed.ip_address.is_none());
    }
}
