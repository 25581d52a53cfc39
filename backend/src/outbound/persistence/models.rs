//! Internal Diesel row structs.
//!
//! Never exposed to the domain; repositories convert them into domain types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    AccessCode, AccessCodeRecord, AccessCodeValidationError, ClaimStatus, Partner, Profile,
    ProfileId, Registration,
};

use super::schema::{access_codes, profiles};

/// Row read from `access_codes`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = access_codes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccessCodeRow {
    pub code: String,
    pub partner_name: String,
    pub partner_tagline: String,
    pub partner_accent: String,
    pub is_claimed: bool,
    pub claimed_profile_id: Option<i64>,
}

impl AccessCodeRow {
    pub(crate) fn partner(&self) -> Partner {
        Partner::new(
            self.partner_name.as_str(),
            self.partner_tagline.as_str(),
            self.partner_accent.as_str(),
        )
    }

    /// Convert into the domain record.
    ///
    /// A claimed row without a profile id violates the table constraint; it
    /// is reported rather than silently treated as unclaimed.
    pub(crate) fn into_record(self) -> Result<AccessCodeRecord, AccessCodeRowError> {
        let partner = self.partner();
        let status = match (self.is_claimed, self.claimed_profile_id) {
            (false, _) => ClaimStatus::Unclaimed,
            (true, Some(id)) => ClaimStatus::Claimed(ProfileId::new(id)),
            (true, None) => return Err(AccessCodeRowError::ClaimedWithoutProfile),
        };
        let code = AccessCode::new(&self.code).map_err(AccessCodeRowError::Code)?;
        Ok(AccessCodeRecord {
            code,
            partner,
            status,
        })
    }
}

/// Rows that cannot be represented in the domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum AccessCodeRowError {
    #[error("stored access code is malformed: {0}")]
    Code(AccessCodeValidationError),
    #[error("access code is claimed without a profile reference")]
    ClaimedWithoutProfile,
}

/// Row read from `profiles`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProfileRow {
    pub id: i64,
    pub first_name: String,
    pub surname: String,
    pub gender: String,
    pub age: i32,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: ProfileId::new(row.id),
            first_name: row.first_name,
            surname: row.surname,
            gender: row.gender,
            age: row.age,
        }
    }
}

/// Insertable profile.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = profiles)]
pub(crate) struct NewProfileRow<'a> {
    pub code: &'a str,
    pub first_name: &'a str,
    pub surname: &'a str,
    pub gender: &'a str,
    pub age: i32,
}

impl<'a> NewProfileRow<'a> {
    pub(crate) fn new(code: &'a AccessCode, registration: &'a Registration) -> Self {
        Self {
            code: code.as_ref(),
            first_name: registration.first_name(),
            surname: registration.surname(),
            gender: registration.gender(),
            age: registration.age(),
        }
    }
}

/// Changeset marking a code as claimed.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = access_codes)]
pub(crate) struct ClaimAccessCodeUpdate {
    pub is_claimed: bool,
    pub claimed_profile_id: Option<i64>,
    pub claimed_at: Option<DateTime<Utc>>,
}
