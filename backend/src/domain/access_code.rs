//! Access codes issued by partner organisations.
//!
//! An access code is a six digit string that identifies exactly one partner
//! and, once redeemed, exactly one profile. Codes are issued externally and
//! only ever move from unclaimed to claimed.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, ProfileId};

/// Number of digits in every access code.
pub const ACCESS_CODE_LEN: usize = 6;

/// Validation errors returned by [`AccessCode::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessCodeValidationError {
    Empty,
    InvalidLength { expected: usize },
    NonDigit,
}

impl AccessCodeValidationError {
    /// Stable identifier reported in error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty => "missing",
            Self::InvalidLength { .. } => "invalid_length",
            Self::NonDigit => "non_digit",
        }
    }
}

impl fmt::Display for AccessCodeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "access code must not be empty"),
            Self::InvalidLength { expected } => {
                write!(f, "access code must be exactly {expected} digits")
            }
            Self::NonDigit => write!(f, "access code may only contain digits"),
        }
    }
}

impl std::error::Error for AccessCodeValidationError {}

impl From<AccessCodeValidationError> for Error {
    fn from(value: AccessCodeValidationError) -> Self {
        Error::invalid_request("Invalid code")
            .with_details(json!({ "field": "code", "code": value.code() }))
    }
}

/// Six digit access code.
///
/// Surrounding whitespace is trimmed before validation.
///
/// # Examples
/// ```
/// use backend::domain::AccessCode;
///
/// let code = AccessCode::new(" 482913 ").expect("valid code");
/// assert_eq!(code.as_ref(), "482913");
/// assert!(AccessCode::new("48291").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccessCode(String);

impl AccessCode {
    /// Validate and construct an [`AccessCode`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AccessCodeValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AccessCodeValidationError::Empty);
        }
        if trimmed.chars().count() != ACCESS_CODE_LEN {
            return Err(AccessCodeValidationError::InvalidLength {
                expected: ACCESS_CODE_LEN,
            });
        }
        if !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(AccessCodeValidationError::NonDigit);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for AccessCode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AccessCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<AccessCode> for String {
    fn from(value: AccessCode) -> Self {
        value.0
    }
}

impl TryFrom<String> for AccessCode {
    type Error = AccessCodeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Partner organisation that issued a code. Immutable once issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    pub name: String,
    pub tagline: String,
    pub accent: String,
}

impl Partner {
    /// Construct a partner description.
    pub fn new(
        name: impl Into<String>,
        tagline: impl Into<String>,
        accent: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            tagline: tagline.into(),
            accent: accent.into(),
        }
    }
}

/// Redemption state of an access code.
///
/// The claimed variant carries the profile id, so a claimed code without a
/// profile reference cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimStatus {
    Unclaimed,
    Claimed(ProfileId),
}

/// Stored view of an access code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessCodeRecord {
    pub code: AccessCode,
    pub partner: Partner,
    pub status: ClaimStatus,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("482913", "482913")]
    #[case("  000000\n", "000000")]
    #[case("\t123456 ", "123456")]
    fn accepts_six_digits_after_trimming(#[case] raw: &str, #[case] expected: &str) {
        let code = AccessCode::new(raw).expect("valid code");
        assert_eq!(code.as_ref(), expected);
    }

    #[rstest]
    #[case("", AccessCodeValidationError::Empty)]
    #[case("   ", AccessCodeValidationError::Empty)]
    #[case("12345", AccessCodeValidationError::InvalidLength { expected: 6 })]
    #[case("1234567", AccessCodeValidationError::InvalidLength { expected: 6 })]
    #[case("12 456", AccessCodeValidationError::NonDigit)]
    #[case("12a456", AccessCodeValidationError::NonDigit)]
    #[case("١٢٣٤٥٦", AccessCodeValidationError::NonDigit)]
    fn rejects_malformed_codes(#[case] raw: &str, #[case] expected: AccessCodeValidationError) {
        assert_eq!(AccessCode::new(raw), Err(expected));
    }

    #[rstest]
    fn deserialises_through_validation() {
        let parsed: Result<AccessCode, _> = serde_json::from_str("\"48291x\"");
        assert!(parsed.is_err());

        let parsed: AccessCode = serde_json::from_str("\"482913\"").expect("valid code");
        assert_eq!(parsed.to_string(), "482913");
    }
}
