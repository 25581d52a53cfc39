//! Client-side redemption progress.
//!
//! A browser that has entered a valid code is either waiting to register
//! against it or has already redeemed it. The value is owned by the caller
//! (the HTTP adapter keeps it in the signed session cookie); the domain
//! services never store it.

use serde::{Deserialize, Serialize};

use crate::domain::ports::{ClaimCodeResponse, CodeLookupOutcome};
use crate::domain::{AccessCode, Partner, ProfileId};

/// Where a client is in the redeem-then-register flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RedemptionContext {
    /// The code exists and is waiting for registration details.
    Pending { code: AccessCode, partner: Partner },
    /// The code has been redeemed by the given profile.
    #[serde(rename_all = "camelCase")]
    Redeemed {
        code: AccessCode,
        profile_id: ProfileId,
    },
}

impl RedemptionContext {
    /// Code the context refers to.
    pub fn code(&self) -> &AccessCode {
        match self {
            Self::Pending { code, .. } | Self::Redeemed { code, .. } => code,
        }
    }

    /// Derive the context implied by a lookup outcome.
    ///
    /// Unknown codes and claimed codes without a readable profile yield
    /// `None`; callers keep whatever context they already hold.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{AccessCode, Partner, RedemptionContext};
    /// use backend::domain::ports::CodeLookupOutcome;
    ///
    /// let code = AccessCode::new("482913").expect("valid code");
    /// let outcome = CodeLookupOutcome::NeedsRegistration {
    ///     partner: Partner::new("Terveystalo", "Health first", "#005b8e"),
    /// };
    /// let context = RedemptionContext::from_lookup(code, &outcome);
    /// assert!(matches!(context, Some(RedemptionContext::Pending { .. })));
    /// ```
    pub fn from_lookup(code: AccessCode, outcome: &CodeLookupOutcome) -> Option<Self> {
        match outcome {
            CodeLookupOutcome::Invalid => None,
            CodeLookupOutcome::NeedsRegistration { partner } => Some(Self::Pending {
                code,
                partner: partner.clone(),
            }),
            CodeLookupOutcome::AlreadyClaimed { profile, .. } => {
                profile.as_ref().map(|profile| Self::Redeemed {
                    code,
                    profile_id: profile.id,
                })
            }
        }
    }

    /// Context recorded after a successful claim.
    pub fn from_claim(code: AccessCode, response: &ClaimCodeResponse) -> Self {
        Self::Redeemed {
            code,
            profile_id: response.profile_id,
        }
    }
}
