//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between Diesel rows and domain types and map every
//! driver failure onto the port's error type. Row structs (`models`) and
//! table definitions (`schema`) stay private to this module.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselAccessCodeRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/lovnity")).await?;
//! let repo = DieselAccessCodeRepository::new(pool);
//! ```

mod diesel_access_code_repository;
mod diesel_basic_error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_access_code_repository::DieselAccessCodeRepository;
pub use migrations::{MIGRATIONS, MigrationError, apply_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
