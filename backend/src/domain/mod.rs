//! Domain primitives, ports and services.
//!
//! Purpose: model the access code lifecycle independently of transport and
//! storage. Types here are immutable once constructed and validate their
//! invariants at construction time.
//!
//! Public surface:
//! - `AccessCode`, `Partner`, `AccessCodeRecord`, `ClaimStatus`: issued codes.
//! - `Registration`, `Profile`, `ProfileId`: redeemed profiles.
//! - `RedemptionContext`: client progress through the redeem flow.
//! - `CodeClaimService`: implementation of the `CodeLookup` and `CodeClaim`
//!   driving ports over an `AccessCodeRepository`.
//! - `Error`, `ErrorCode`: transport agnostic failures.

pub mod access_code;
mod code_claim_service;
pub mod error;
pub mod ports;
pub mod profile;
pub mod redemption;
pub mod trace_id;

pub use self::access_code::{
    ACCESS_CODE_LEN, AccessCode, AccessCodeRecord, AccessCodeValidationError, ClaimStatus, Partner,
};
pub use self::code_claim_service::CodeClaimService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::profile::{
    MAX_AGE, MIN_AGE, Profile, ProfileId, Registration, RegistrationDraft,
    RegistrationValidationError,
};
pub use self::redemption::RedemptionContext;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
