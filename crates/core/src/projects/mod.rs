//! Projects module - campaigns, completion status and funding views.

mod project_status;
mod projects_model;
mod projects_service;
mod projects_traits;

pub use project_status::is_project_completed;
pub use projects_model::{
    FeaturedProject, NewProject, NewProjectRecord, Project, ProjectCompletionInput,
};
pub use projects_service::ProjectService;
pub use projects_traits::{ProjectRepositoryTrait, ProjectServiceTrait};
