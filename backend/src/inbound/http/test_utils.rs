//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use super::session_config::{SessionSettings, session_middleware};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Disables the `Secure` flag for local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    session_middleware(&SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
    })
}

/// HTTP state backed by the in-memory store seeded with the demo codes.
pub fn demo_state() -> super::state::HttpState {
    use std::sync::Arc;

    use crate::domain::CodeClaimService;
    use crate::outbound::memory::{InMemoryAccessCodeRepository, demo_codes};

    let repo = Arc::new(InMemoryAccessCodeRepository::with_codes(demo_codes()));
    super::state::HttpState::from_service(Arc::new(CodeClaimService::new(repo)))
}

/// Extract the session cookie set on a response.
pub fn session_cookie(
    response: &actix_web::dev::ServiceResponse,
) -> Option<actix_web::cookie::Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == super::session_config::SESSION_COOKIE_NAME)
        .map(actix_web::cookie::Cookie::into_owned)
}
