//! PostgreSQL-backed `AccessCodeRepository`.
//!
//! Lookups are plain reads. Claims run in one transaction that locks the code
//! row with `SELECT ... FOR UPDATE`, so concurrent claims on the same code
//! serialise on the row lock and only the first one sees it unclaimed.
//! Claims on different codes never contend.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::error;

use crate::domain::ports::{AccessCodeRepository, AccessCodeRepositoryError, ClaimAttempt};
use crate::domain::{AccessCode, AccessCodeRecord, Profile, ProfileId, Registration};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{
    AccessCodeRow, AccessCodeRowError, ClaimAccessCodeUpdate, NewProfileRow, ProfileRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{access_codes, profiles};

/// Diesel-backed implementation of the access code repository port.
#[derive(Clone)]
pub struct DieselAccessCodeRepository {
    pool: DbPool,
}

impl DieselAccessCodeRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use backend::outbound::persistence::{DbPool, DieselAccessCodeRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/lovnity")).await?;
    /// let repository = DieselAccessCodeRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AccessCodeRepositoryError {
    map_basic_pool_error(error, |message| {
        AccessCodeRepositoryError::connection(message)
    })
}

fn map_diesel_error(error: diesel::result::Error) -> AccessCodeRepositoryError {
    map_basic_diesel_error(
        error,
        AccessCodeRepositoryError::query,
        AccessCodeRepositoryError::connection,
    )
}

fn map_row_error(code: &str, error: AccessCodeRowError) -> AccessCodeRepositoryError {
    error!(code, %error, "access code row violates domain invariants");
    AccessCodeRepositoryError::query("stored access code is inconsistent")
}

/// Transaction outcome. `Rejected` aborts the transaction so the row lock
/// is released by a rollback rather than a commit.
#[derive(Debug)]
enum ClaimTxError {
    Diesel(diesel::result::Error),
    Rejected(ClaimAttempt),
}

impl From<diesel::result::Error> for ClaimTxError {
    fn from(value: diesel::result::Error) -> Self {
        Self::Diesel(value)
    }
}

/// Rejections rolled the transaction back but are ordinary outcomes.
fn settle_claim(
    result: Result<ClaimAttempt, ClaimTxError>,
) -> Result<ClaimAttempt, AccessCodeRepositoryError> {
    match result {
        Ok(attempt) | Err(ClaimTxError::Rejected(attempt)) => Ok(attempt),
        Err(ClaimTxError::Diesel(error)) => Err(map_diesel_error(error)),
    }
}

#[async_trait]
impl AccessCodeRepository for DieselAccessCodeRepository {
    async fn find_code(
        &self,
        code: &AccessCode,
    ) -> Result<Option<AccessCodeRecord>, AccessCodeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = access_codes::table
            .find(code.as_ref())
            .select(AccessCodeRow::as_select())
            .first::<AccessCodeRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(|row| {
            let raw = row.code.clone();
            row.into_record().map_err(|err| map_row_error(&raw, err))
        })
        .transpose()
    }

    async fn find_profile(
        &self,
        id: ProfileId,
    ) -> Result<Option<Profile>, AccessCodeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = profiles::table
            .find(id.get())
            .select(ProfileRow::as_select())
            .first::<ProfileRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Profile::from))
    }

    async fn claim(
        &self,
        code: &AccessCode,
        registration: &Registration,
    ) -> Result<ClaimAttempt, AccessCodeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_profile = NewProfileRow::new(code, registration);

        let result: Result<ClaimAttempt, ClaimTxError> = conn
            .transaction(|conn| {
                async move {
                    let locked = access_codes::table
                        .find(new_profile.code)
                        .select(AccessCodeRow::as_select())
                        .for_update()
                        .first::<AccessCodeRow>(conn)
                        .await
                        .optional()?;

                    let Some(row) = locked else {
                        return Err(ClaimTxError::Rejected(ClaimAttempt::NotFound));
                    };
                    if row.is_claimed {
                        return Err(ClaimTxError::Rejected(ClaimAttempt::AlreadyClaimed));
                    }

                    let profile_id = diesel::insert_into(profiles::table)
                        .values(&new_profile)
                        .returning(profiles::id)
                        .get_result::<i64>(conn)
                        .await?;

                    diesel::update(access_codes::table.find(new_profile.code))
                        .set(&ClaimAccessCodeUpdate {
                            is_claimed: true,
                            claimed_profile_id: Some(profile_id),
                            claimed_at: Some(Utc::now()),
                        })
                        .execute(conn)
                        .await?;

                    Ok(ClaimAttempt::Claimed {
                        profile_id: ProfileId::new(profile_id),
                        partner: row.partner(),
                    })
                }
                .scope_boxed()
            })
            .await;

        settle_claim(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let mapped = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(mapped, AccessCodeRepositoryError::Connection { .. }));
        assert!(mapped.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let mapped = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(mapped, AccessCodeRepositoryError::Query { .. }));
        assert!(mapped.to_string().contains("record not found"));
    }

    #[rstest]
    fn inconsistent_rows_map_to_query_error() {
        let mapped = map_row_error("482913", AccessCodeRowError::ClaimedWithoutProfile);
        assert_eq!(
            mapped,
            AccessCodeRepositoryError::query("stored access code is inconsistent")
        );
    }

    #[rstest]
    fn diesel_errors_convert_into_tx_errors() {
        let error = ClaimTxError::from(diesel::result::Error::RollbackTransaction);
        assert!(matches!(error, ClaimTxError::Diesel(_)));
    }

    #[rstest]
    #[case(ClaimAttempt::NotFound)]
    #[case(ClaimAttempt::AlreadyClaimed)]
    fn rejected_claims_settle_as_outcomes(#[case] attempt: ClaimAttempt) {
        let settled = settle_claim(Err(ClaimTxError::Rejected(attempt.clone())));
        assert_eq!(settled, Ok(attempt));
    }

    #[rstest]
    fn failed_transactions_settle_as_query_errors() {
        let settled = settle_claim(Err(ClaimTxError::Diesel(
            diesel::result::Error::RollbackTransaction,
        )));
        assert!(matches!(
            settled,
            Err(AccessCodeRepositoryError::Query { .. })
        ));
    }
}
