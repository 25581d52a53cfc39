//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CodeClaim, CodeLookup};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Read-only code lookups.
    pub lookup: Arc<dyn CodeLookup>,
    /// Code redemption.
    pub claim: Arc<dyn CodeClaim>,
}

impl HttpState {
    /// Construct state from the driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::{FixtureCodeClaim, FixtureCodeLookup};
    /// use backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureCodeLookup), Arc::new(FixtureCodeClaim));
    /// let _lookup = state.lookup.clone();
    /// ```
    pub fn new(lookup: Arc<dyn CodeLookup>, claim: Arc<dyn CodeClaim>) -> Self {
        Self { lookup, claim }
    }

    /// Build state where one service implements both ports.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: CodeLookup + CodeClaim + 'static,
    {
        Self {
            lookup: service.clone(),
            claim: service,
        }
    }
}
