//! Lovnity code claim backend.
//!
//! Partners issue six-digit access codes; a visitor checks a code, registers
//! a profile against it exactly once, and is greeted on later visits. The
//! crate follows a hexagonal layout:
//!
//! - [`domain`]: value types, errors, ports and the claim service.
//! - [`outbound`]: PostgreSQL (Diesel) and in-memory store adapters.
//! - [`inbound`]: Actix Web handlers.
//! - [`presentation`]: partner branding and greeting text.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod presentation;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
