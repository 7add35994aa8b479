//! SQLite storage implementation for Pure Hearts.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `pure-hearts-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for donations and projects
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! ```text
//!     core (domain, traits)
//!             │
//!             ▼
//!   storage-sqlite (this crate)
//!             │
//!             ▼
//!         SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod donations;
pub mod projects;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from pure-hearts-core for convenience
pub use pure_hearts_core::errors::{DatabaseError, Error, Result};
