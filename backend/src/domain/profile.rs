//! Profiles created by redeeming an access code.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::Error;

/// Youngest accepted registration age.
pub const MIN_AGE: i64 = 18;
/// Oldest accepted registration age.
pub const MAX_AGE: i64 = 99;

/// Store-generated profile identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(i64);

impl ProfileId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Field-level validation errors returned by [`Registration::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationValidationError {
    EmptyFirstName,
    EmptySurname,
    EmptyGender,
    AgeOutOfRange { min: i64, max: i64 },
}

impl RegistrationValidationError {
    /// Name of the offending request field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyFirstName => "firstName",
            Self::EmptySurname => "surname",
            Self::EmptyGender => "gender",
            Self::AgeOutOfRange { .. } => "age",
        }
    }

    /// Stable identifier reported in error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyFirstName | Self::EmptySurname | Self::EmptyGender => "empty",
            Self::AgeOutOfRange { .. } => "out_of_range",
        }
    }
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFirstName => write!(f, "first name must not be empty"),
            Self::EmptySurname => write!(f, "surname must not be empty"),
            Self::EmptyGender => write!(f, "gender must not be empty"),
            Self::AgeOutOfRange { min, max } => {
                write!(f, "age must be between {min} and {max}")
            }
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

impl From<RegistrationValidationError> for Error {
    fn from(value: RegistrationValidationError) -> Self {
        Error::invalid_request(value.to_string())
            .with_details(json!({ "field": value.field(), "code": value.code() }))
    }
}

/// Unvalidated registration input as received from a driving adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDraft {
    pub first_name: String,
    pub surname: String,
    pub gender: String,
    pub age: i64,
}

/// Validated registration details.
///
/// ## Invariants
/// - `first_name`, `surname` and `gender` are trimmed and non-empty.
/// - `age` lies within [`MIN_AGE`]..=[`MAX_AGE`].
///
/// # Examples
/// ```
/// use backend::domain::{Registration, RegistrationDraft};
///
/// let registration = Registration::new(RegistrationDraft {
///     first_name: " Ana ".into(),
///     surname: "Lee".into(),
///     gender: "F".into(),
///     age: 29,
/// })
/// .expect("valid registration");
/// assert_eq!(registration.first_name(), "Ana");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    first_name: String,
    surname: String,
    gender: String,
    age: i32,
}

fn required(
    value: &str,
    error: RegistrationValidationError,
) -> Result<String, RegistrationValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error);
    }
    Ok(trimmed.to_owned())
}

impl Registration {
    /// Validate a draft, trimming the text fields.
    pub fn new(draft: RegistrationDraft) -> Result<Self, RegistrationValidationError> {
        let first_name = required(&draft.first_name, RegistrationValidationError::EmptyFirstName)?;
        let surname = required(&draft.surname, RegistrationValidationError::EmptySurname)?;
        let gender = required(&draft.gender, RegistrationValidationError::EmptyGender)?;

        let out_of_range = RegistrationValidationError::AgeOutOfRange {
            min: MIN_AGE,
            max: MAX_AGE,
        };
        if !(MIN_AGE..=MAX_AGE).contains(&draft.age) {
            return Err(out_of_range);
        }
        let age = i32::try_from(draft.age).map_err(|_| out_of_range)?;

        Ok(Self {
            first_name,
            surname,
            gender,
            age,
        })
    }

    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    pub fn surname(&self) -> &str {
        self.surname.as_str()
    }

    pub fn gender(&self) -> &str {
        self.gender.as_str()
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    /// Materialise the stored profile once the store has assigned an id.
    pub fn into_profile(self, id: ProfileId) -> Profile {
        Profile {
            id,
            first_name: self.first_name,
            surname: self.surname,
            gender: self.gender,
            age: self.age,
        }
    }
}

/// Person who redeemed an access code. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    pub first_name: String,
    pub surname: String,
    pub gender: String,
    pub age: i32,
}
