//! Access code lookup and claim service.
//!
//! Implements the `CodeLookup` and `CodeClaim` driving ports over any
//! `AccessCodeRepository`. Input is validated before the repository is
//! touched; atomicity of the claim itself is the repository's contract.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::ports::{
    AccessCodeRepository, AccessCodeRepositoryError, ClaimAttempt, ClaimCodeRequest,
    ClaimCodeResponse, CodeClaim, CodeLookup, CodeLookupOutcome,
};
use crate::domain::{AccessCode, ClaimStatus, Error, Registration};

fn map_repository_error(error: AccessCodeRepositoryError) -> Error {
    error!(%error, "access code repository failed");
    match error {
        AccessCodeRepositoryError::Connection { message } => {
            Error::internal(format!("access code repository unavailable: {message}"))
        }
        AccessCodeRepositoryError::Query { message } => {
            Error::internal(format!("access code repository error: {message}"))
        }
    }
}

/// Service implementing the code lookup and claim driving ports.
#[derive(Clone)]
pub struct CodeClaimService<R> {
    access_code_repo: Arc<R>,
}

impl<R> CodeClaimService<R> {
    /// Create a new service backed by the access code repository.
    pub fn new(access_code_repo: Arc<R>) -> Self {
        Self { access_code_repo }
    }
}

#[async_trait]
impl<R> CodeLookup for CodeClaimService<R>
where
    R: AccessCodeRepository,
{
    async fn lookup_code(&self, code: &str) -> Result<CodeLookupOutcome, Error> {
        let code = AccessCode::new(code)?;

        let Some(record) = self
            .access_code_repo
            .find_code(&code)
            .await
            .map_err(map_repository_error)?
        else {
            return Ok(CodeLookupOutcome::Invalid);
        };

        match record.status {
            ClaimStatus::Unclaimed => Ok(CodeLookupOutcome::NeedsRegistration {
                partner: record.partner,
            }),
            ClaimStatus::Claimed(profile_id) => {
                let profile = self
                    .access_code_repo
                    .find_profile(profile_id)
                    .await
                    .map_err(map_repository_error)?;
                if profile.is_none() {
                    warn!(
                        code = %code,
                        profile_id = %profile_id,
                        "claimed access code references a missing profile"
                    );
                }
                Ok(CodeLookupOutcome::AlreadyClaimed {
                    partner: record.partner,
                    profile,
                })
            }
        }
    }
}

#[async_trait]
impl<R> CodeClaim for CodeClaimService<R>
where
    R: AccessCodeRepository,
{
    async fn claim_code(&self, request: ClaimCodeRequest) -> Result<ClaimCodeResponse, Error> {
        let code = AccessCode::new(&request.code)?;
        let registration = Registration::new(request.registration)?;

        let attempt = self
            .access_code_repo
            .claim(&code, &registration)
            .await
            .map_err(map_repository_error)?;

        match attempt {
            ClaimAttempt::Claimed {
                profile_id,
                partner,
            } => {
                info!(code = %code, profile_id = %profile_id, "access code claimed");
                Ok(ClaimCodeResponse {
                    profile_id,
                    partner,
                })
            }
            ClaimAttempt::NotFound => Err(Error::not_found("Code not found")),
            ClaimAttempt::AlreadyClaimed => {
                info!(code = %code, "access code already claimed");
                Err(Error::conflict("Code already used"))
            }
        }
    }
}

#[cfg(test)]
#[path = "code_claim_service_tests.rs"]
mod tests;
