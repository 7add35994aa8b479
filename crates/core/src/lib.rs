//! Pure Hearts Core - donation aggregation, project status and image budgets.
//!
//! This crate contains the business logic of the donation platform. It is
//! database-agnostic and defines the repository traits that the
//! `storage-sqlite` crate implements.

pub mod constants;
pub mod donations;
pub mod errors;
pub mod images;
pub mod projects;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
