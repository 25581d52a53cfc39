//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`CodeLookup`, `CodeClaim`) are what inbound adapters call;
//! the driven port (`AccessCodeRepository`) is what storage adapters
//! implement.

mod macros;
pub(crate) use macros::define_port_error;

mod access_code_repository;
mod code_claim;
mod code_lookup;

#[cfg(test)]
pub use access_code_repository::MockAccessCodeRepository;
pub use access_code_repository::{
    AccessCodeRepository, AccessCodeRepositoryError, ClaimAttempt, FixtureAccessCodeRepository,
};
#[cfg(test)]
pub use code_claim::MockCodeClaim;
pub use code_claim::{ClaimCodeRequest, ClaimCodeResponse, CodeClaim, FixtureCodeClaim};
#[cfg(test)]
pub use code_lookup::MockCodeLookup;
pub use code_lookup::{CodeLookup, CodeLookupOutcome, FixtureCodeLookup};
