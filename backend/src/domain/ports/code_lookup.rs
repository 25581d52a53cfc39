//! Driving port for read-only access code lookups.

use async_trait::async_trait;

use crate::domain::{AccessCode, Error, Partner, Profile};

/// Outcome of looking up a code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeLookupOutcome {
    /// No such code was ever issued.
    Invalid,
    /// The code exists and has not been redeemed.
    NeedsRegistration { partner: Partner },
    /// The code has been redeemed. `profile` is `None` only when the
    /// referenced profile cannot be read back.
    AlreadyClaimed {
        partner: Partner,
        profile: Option<Profile>,
    },
}

/// Driving port for code lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CodeLookup: Send + Sync {
    /// Look up `code` without side effects.
    ///
    /// Malformed codes fail with an `invalid_request` error before any store
    /// access; unknown codes are a successful [`CodeLookupOutcome::Invalid`].
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use backend::domain::ports::{CodeLookup, CodeLookupOutcome, FixtureCodeLookup};
    /// # async fn example() -> Result<(), backend::domain::Error> {
    /// let outcome = FixtureCodeLookup.lookup_code("482913").await?;
    /// assert_eq!(outcome, CodeLookupOutcome::Invalid);
    /// # Ok(())
    /// # }
    /// ```
    async fn lookup_code(&self, code: &str) -> Result<CodeLookupOutcome, Error>;
}

/// Fixture lookup that validates input and knows no codes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCodeLookup;

#[async_trait]
impl CodeLookup for FixtureCodeLookup {
    async fn lookup_code(&self, code: &str) -> Result<CodeLookupOutcome, Error> {
        AccessCode::new(code)?;
        Ok(CodeLookupOutcome::Invalid)
    }
}
