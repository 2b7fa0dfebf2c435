//! Claim submission with client-side validation

use crate::RecorderClient;
use adcrate_core::{ClaimResponse, ClaimSubmission, Error, Result};
use tracing::info;

/// Required, non-empty submission fields. The recorder rejects the
/// request with HTTP 400 when any of these is missing.
fn missing_required_field(submission: &ClaimSubmission) -> Option<&'static str> {
    [
        ("email", submission.email.as_str()),
        ("code", submission.code.as_str()),
        ("reward_type", submission.reward_type.as_str()),
        ("reward_name", submission.reward_name.as_str()),
    ]
    .into_iter()
    .find(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
}

/// Submit a claim, rejecting incomplete payloads before any network I/O
pub async fn submit_claim_checked(
    client: &RecorderClient,
    submission: &ClaimSubmission,
) -> Result<ClaimResponse> {
    if let Some(field) = missing_required_field(submission) {
        return Err(Error::Validation(format!(
            "Missing required field: {}",
            field
        )));
    }

    info!(
        "Submitting {} claim for {}",
        submission.reward_type, submission.reward_name
    );
    client.submit_claim(submission).await
}
