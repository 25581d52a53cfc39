//! Driving port for redeeming an access code.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{AccessCode, Error, Partner, ProfileId, Registration, RegistrationDraft};

/// Request to claim a code for a new profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimCodeRequest {
    pub code: String,
    #[serde(flatten)]
    pub registration: RegistrationDraft,
}

/// Response after a successful claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimCodeResponse {
    pub profile_id: ProfileId,
    pub partner: Partner,
}

/// Driving port for code redemption.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CodeClaim: Send + Sync {
    /// Register a profile against `request.code`.
    ///
    /// Fails with `invalid_request` for malformed input, `not_found` for codes
    /// that were never issued, and `conflict` when the code is already
    /// claimed. Store failures surface as `internal_error` with no partial
    /// effects.
    async fn claim_code(&self, request: ClaimCodeRequest) -> Result<ClaimCodeResponse, Error>;
}

/// Fixture claim that validates input and knows no codes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCodeClaim;

#[async_trait]
impl CodeClaim for FixtureCodeClaim {
    async fn claim_code(&self, request: ClaimCodeRequest) -> Result<ClaimCodeResponse, Error> {
        AccessCode::new(&request.code)?;
        Registration::new(request.registration)?;
        Err(Error::not_found("Code not found"))
    }
}
