use crate::errors::Result;
use crate::projects::projects_model::{FeaturedProject, NewProject, NewProjectRecord, Project};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Trait for project repository operations
#[async_trait]
pub trait ProjectRepositoryTrait: Send + Sync {
    /// Fails with `NotFound` when no project has this id.
    fn get_project(&self, project_id: &str) -> Result<Project>;
    /// Newest projects first.
    fn list_recent_projects(&self, limit: i64) -> Result<Vec<Project>>;
    fn list_projects_for_organization(&self, organization_user_id: &str) -> Result<Vec<Project>>;
    async fn insert_project(&self, new_project: NewProjectRecord) -> Result<Project>;
}

/// Trait for project service operations
#[async_trait]
pub trait ProjectServiceTrait: Send + Sync {
    fn get_featured_projects_with_totals(
        &self,
        limit: usize,
        today: NaiveDate,
    ) -> Result<Vec<FeaturedProject>>;
    fn get_project_details(&self, project_id: &str, today: NaiveDate) -> Result<FeaturedProject>;
    fn get_organization_projects(
        &self,
        organization_user_id: &str,
        today: NaiveDate,
    ) -> Result<Vec<FeaturedProject>>;
    async fn create_project(
        &self,
        organization_user_id: &str,
        new_project: NewProject,
    ) -> Result<Project>;
}
