//! HTTP inbound adapter exposing REST endpoints.

pub mod codes;
pub mod error;
pub mod health;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;
pub mod welcome;

use actix_web::web;

pub use error::ApiResult;

/// JSON extractor configuration shared by all handlers.
///
/// Malformed bodies are answered with the standard error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(error::json_error_handler)
}

/// Register every API route on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(codes::check_code)
        .service(codes::register_with_code)
        .service(welcome::current_session)
        .service(welcome::clear_session)
        .service(health::ready)
        .service(health::live);
}
