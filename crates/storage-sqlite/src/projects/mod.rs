//! SQLite storage implementation for projects.

mod model;
mod repository;

pub use model::ProjectDB;
pub use repository::ProjectRepository;
