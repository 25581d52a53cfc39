//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: process-local repositories for database-less runs and tests.
//!
//! Adapters translate between domain and infrastructure types. They contain
//! no business rules.

pub mod memory;
pub mod persistence;
