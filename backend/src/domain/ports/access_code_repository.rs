//! Port for reading access codes and claiming them atomically.

use async_trait::async_trait;

use crate::domain::{AccessCode, AccessCodeRecord, Partner, Profile, ProfileId, Registration};

use super::define_port_error;

define_port_error! {
    /// Errors raised by access code repository adapters.
    pub enum AccessCodeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "access code repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "access code repository query failed: {message}",
    }
}

/// Result of an atomic claim attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimAttempt {
    /// The profile was created and the code now references it.
    Claimed {
        profile_id: ProfileId,
        partner: Partner,
    },
    /// No code with that value was ever issued.
    NotFound,
    /// Another profile already holds the code.
    AlreadyClaimed,
}

/// Port for access code storage.
///
/// `claim` must behave as a single atomic check-and-set per code: of any
/// number of concurrent attempts on one unclaimed code exactly one returns
/// [`ClaimAttempt::Claimed`], and a failed attempt leaves no profile behind.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessCodeRepository: Send + Sync {
    /// Read a code without locking it.
    async fn find_code(
        &self,
        code: &AccessCode,
    ) -> Result<Option<AccessCodeRecord>, AccessCodeRepositoryError>;

    /// Read a profile by id.
    async fn find_profile(
        &self,
        id: ProfileId,
    ) -> Result<Option<Profile>, AccessCodeRepositoryError>;

    /// Create a profile for `code` and mark the code as claimed by it.
    async fn claim(
        &self,
        code: &AccessCode,
        registration: &Registration,
    ) -> Result<ClaimAttempt, AccessCodeRepositoryError>;
}

/// Fixture implementation for tests that never reach storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccessCodeRepository;

#[async_trait]
impl AccessCodeRepository for FixtureAccessCodeRepository {
    async fn find_code(
        &self,
        _code: &AccessCode,
    ) -> Result<Option<AccessCodeRecord>, AccessCodeRepositoryError> {
        Ok(None)
    }

    async fn find_profile(
        &self,
        _id: ProfileId,
    ) -> Result<Option<Profile>, AccessCodeRepositoryError> {
        Ok(None)
    }

    async fn claim(
        &self,
        _code: &AccessCode,
        _registration: &Registration,
    ) -> Result<ClaimAttempt, AccessCodeRepositoryError> {
        Ok(ClaimAttempt::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::RegistrationDraft;

    #[rstest]
    #[tokio::test]
    async fn fixture_knows_no_codes() {
        let repo = FixtureAccessCodeRepository;
        let code = AccessCode::new("482913").expect("valid code");
        let registration = Registration::new(RegistrationDraft {
            first_name: "Ana".into(),
            surname: "Lee".into(),
            gender: "F".into(),
            age: 29,
        })
        .expect("valid registration");

        assert!(repo.find_code(&code).await.expect("lookup").is_none());
        assert!(
            repo.find_profile(ProfileId::new(1))
                .await
                .expect("profile lookup")
                .is_none()
        );
        assert_eq!(
            repo.claim(&code, &registration).await.expect("claim"),
            ClaimAttempt::NotFound
        );
    }

    #[rstest]
    fn connection_error_formats_message() {
        let err = AccessCodeRepositoryError::connection("pool exhausted");
        assert_eq!(
            err.to_string(),
            "access code repository connection failed: pool exhausted"
        );
    }
}
