//! Database module
//!
//! PostgreSQL-backed implementation of the ledger store.

pub mod connection;
pub mod repositories;
pub mod service;

// Re-export commonly used database components
pub use connection::{create_pool, run_migrations, DatabasePool};
pub use repositories::{AdminRepository, ParticipantRepository, VisitRequestRepository};
pub use service::DatabaseService;
