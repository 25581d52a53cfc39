//! Builders for the HTTP state from the configured store.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use backend::domain::CodeClaimService;
use backend::domain::ports::AccessCodeRepository;
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::{InMemoryAccessCodeRepository, demo_codes};
use backend::outbound::persistence::DieselAccessCodeRepository;

use super::ServerConfig;

fn state_over<R>(repo: R) -> HttpState
where
    R: AccessCodeRepository + 'static,
{
    HttpState::from_service(Arc::new(CodeClaimService::new(Arc::new(repo))))
}

/// Build HTTP state over PostgreSQL when a pool is configured, otherwise
/// over an in-memory store seeded with the demo codes.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => state_over(DieselAccessCodeRepository::new(pool.clone())),
        None => {
            warn!("no database configured; serving demo codes from memory");
            state_over(InMemoryAccessCodeRepository::with_codes(demo_codes()))
        }
    };
    web::Data::new(state)
}
