//! In-process access code store.
//!
//! Used when no database is configured and by tests. A single mutex guards
//! codes and profiles together and is held for the whole check-insert-update
//! sequence of a claim, which gives the same one-winner guarantee as the
//! PostgreSQL row lock. No `.await` happens while the lock is held.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{AccessCodeRepository, AccessCodeRepositoryError, ClaimAttempt};
use crate::domain::{
    AccessCode, AccessCodeRecord, ClaimStatus, Partner, Profile, ProfileId, Registration,
};

/// Codes seeded when the service runs without a database.
pub fn demo_codes() -> Vec<(AccessCode, Partner)> {
    [
        ("482913", Partner::new("Terveystalo", "Health first", "#005b8e")),
        ("731540", Partner::new("Mehiläinen", "Care that carries", "#e8890c")),
        ("100200", Partner::new("Lovnity Partner", "Better together", "#8b5cf6")),
    ]
    .into_iter()
    .filter_map(|(raw, partner)| AccessCode::new(raw).ok().map(|code| (code, partner)))
    .collect()
}

#[derive(Debug, Default)]
struct MemoryState {
    codes: HashMap<AccessCode, AccessCodeRecord>,
    profiles: HashMap<ProfileId, Profile>,
    last_profile_id: i64,
}

/// Mutex-guarded implementation of the access code repository port.
#[derive(Debug, Default)]
pub struct InMemoryAccessCodeRepository {
    state: Mutex<MemoryState>,
}

impl InMemoryAccessCodeRepository {
    /// Create a store holding the given unclaimed codes.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{AccessCode, Partner};
    /// use backend::outbound::memory::InMemoryAccessCodeRepository;
    ///
    /// let code = AccessCode::new("482913").expect("valid code");
    /// let repo = InMemoryAccessCodeRepository::with_codes([(
    ///     code,
    ///     Partner::new("Terveystalo", "Health first", "#005b8e"),
    /// )]);
    /// # let _ = repo;
    /// ```
    pub fn with_codes(codes: impl IntoIterator<Item = (AccessCode, Partner)>) -> Self {
        let codes = codes
            .into_iter()
            .map(|(code, partner)| {
                let record = AccessCodeRecord {
                    code: code.clone(),
                    partner,
                    status: ClaimStatus::Unclaimed,
                };
                (code, record)
            })
            .collect();
        Self {
            state: Mutex::new(MemoryState {
                codes,
                ..MemoryState::default()
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, AccessCodeRepositoryError> {
        self.state
            .lock()
            .map_err(|_| AccessCodeRepositoryError::query("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl AccessCodeRepository for InMemoryAccessCodeRepository {
    async fn find_code(
        &self,
        code: &AccessCode,
    ) -> Result<Option<AccessCodeRecord>, AccessCodeRepositoryError> {
        Ok(self.lock()?.codes.get(code).cloned())
    }

    async fn find_profile(
        &self,
        id: ProfileId,
    ) -> Result<Option<Profile>, AccessCodeRepositoryError> {
        Ok(self.lock()?.profiles.get(&id).cloned())
    }

    async fn claim(
        &self,
        code: &AccessCode,
        registration: &Registration,
    ) -> Result<ClaimAttempt, AccessCodeRepositoryError> {
        let mut guard = self.lock()?;
        let state = &mut *guard;

        let Some(record) = state.codes.get_mut(code) else {
            return Ok(ClaimAttempt::NotFound);
        };
        if matches!(record.status, ClaimStatus::Claimed(_)) {
            return Ok(ClaimAttempt::AlreadyClaimed);
        }

        state.last_profile_id += 1;
        let profile_id = ProfileId::new(state.last_profile_id);
        state
            .profiles
            .insert(profile_id, registration.clone().into_profile(profile_id));
        record.status = ClaimStatus::Claimed(profile_id);

        Ok(ClaimAttempt::Claimed {
            profile_id,
            partner: record.partner.clone(),
        })
    }
}
