//! HTTP client for the remote claim recorder

use adcrate_core::{
    AdminActionResponse, AdminDeleteRequest, AdminListResponse, ClaimResponse, ClaimSubmission,
    Error, Result, StoredClaim,
};
use reqwest::Client;
use std::future::Future;
use tracing::{debug, error, instrument};

const USER_AGENT_VALUE: &str = concat!("adcrate-manager/", env!("CARGO_PKG_VERSION"));

/// Boundary the claim engine submits through.
///
/// One best-effort attempt per claim: implementations must not retry or
/// queue, and callers treat any failure as non-fatal.
pub trait ClaimRecorder {
    fn record(
        &self,
        submission: &ClaimSubmission,
    ) -> impl Future<Output = Result<ClaimResponse>> + Send;
}

/// HTTP client for a single-endpoint claim recorder service.
///
/// The recorder multiplexes POST (submit), GET (admin listing), and
/// DELETE (admin removal) on one URL.
pub struct RecorderClient {
    http: Client,
    endpoint: String,
}

impl RecorderClient {
    /// Create a new client for the given recorder endpoint URL
    pub fn new(endpoint: &str) -> Self {
        let http = Client::builder()
            .user_agent(USER_AGENT_VALUE)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            endpoint: endpoint.to_string(),
        }
    }

    /// The configured endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit one claim record
    #[instrument(skip(self, submission))]
    pub async fn submit_claim(&self, submission: &ClaimSubmission) -> Result<ClaimResponse> {
        debug!("Submitting claim to {}", self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            error!("Claim submission failed: HTTP {} — {}", status, body);
            return Err(Error::Transport(format!("HTTP {}: {}", status, body)));
        }

        let parsed: ClaimResponse = response.json().await.map_err(|e| {
            error!("Failed to parse claim response: {}", e);
            Error::InvalidData(e.to_string())
        })?;

        debug!(
            "Claim submission acknowledged: success={}, email_sent={:?}",
            parsed.success, parsed.email_sent
        );
        Ok(parsed)
    }

    /// List all stored claims (admin only), newest first
    #[instrument(skip(self, admin_key))]
    pub async fn admin_list(&self, admin_key: &str) -> Result<Vec<StoredClaim>> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("admin_key", admin_key)])
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            error!("Admin listing failed: HTTP {} — {}", status, body);
            return Err(Error::Transport(format!("HTTP {}: {}", status, body)));
        }

        let parsed: AdminListResponse = response.json().await.map_err(|e| {
            error!("Failed to parse admin listing: {}", e);
            Error::InvalidData(e.to_string())
        })?;

        if !parsed.success {
            return Err(Error::Transport(parsed.message));
        }

        debug!("Fetched {} stored claims", parsed.data.len());
        Ok(parsed.data)
    }

    /// Delete one stored claim by id (admin only)
    #[instrument(skip(self, admin_key))]
    pub async fn admin_delete(&self, admin_key: &str, id: &str) -> Result<AdminActionResponse> {
        let body = AdminDeleteRequest {
            admin_key: admin_key.to_string(),
            id: id.to_string(),
        };

        let response = self
            .http
            .delete(&self.endpoint)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let text = response.text().await.unwrap_or_default();
            error!("Admin deletion failed: HTTP {} — {}", status, text);
            return Err(Error::Transport(format!("HTTP {}: {}", status, text)));
        }

        let parsed: AdminActionResponse = response.json().await.map_err(|e| {
            error!("Failed to parse deletion response: {}", e);
            Error::InvalidData(e.to_string())
        })?;

        if !parsed.success {
            return Err(Error::Transport(parsed.message));
        }

        debug!("Deleted stored claim {}", id);
        Ok(parsed)
    }
}

impl ClaimRecorder for RecorderClient {
    async fn record(&self, submission: &ClaimSubmission) -> Result<ClaimResponse> {
        self.submit_claim(submission).await
    }
}
