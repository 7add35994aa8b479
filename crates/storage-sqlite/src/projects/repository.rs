use pure_hearts_core::projects::{NewProjectRecord, Project, ProjectRepositoryTrait};
use pure_hearts_core::{Error, Result};

use super::model::ProjectDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::projects;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct ProjectRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ProjectRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ProjectRepository { pool, writer }
    }
}

#[async_trait]
impl ProjectRepositoryTrait for ProjectRepository {
    fn get_project(&self, project_id: &str) -> Result<Project> {
        let mut conn = get_connection(&self.pool)?;
        projects::table
            .find(project_id)
            .select(ProjectDB::as_select())
            .first::<ProjectDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Project::from)
            .ok_or_else(|| Error::NotFound(format!("Project {project_id}")))
    }

    fn list_recent_projects(&self, limit: i64) -> Result<Vec<Project>> {
        let mut conn = get_connection(&self.pool)?;
        let projects_db = projects::table
            .select(ProjectDB::as_select())
            .order(projects::created_at.desc())
            .limit(limit)
            .load::<ProjectDB>(&mut conn)
            .into_core()?;
        Ok(projects_db.into_iter().map(Project::from).collect())
    }

    fn list_projects_for_organization(&self, organization_user_id: &str) -> Result<Vec<Project>> {
        let mut conn = get_connection(&self.pool)?;
        let projects_db = projects::table
            .filter(projects::organization_user_id.eq(organization_user_id))
            .select(ProjectDB::as_select())
            .order(projects::created_at.desc())
            .load::<ProjectDB>(&mut conn)
            .into_core()?;
        Ok(projects_db.into_iter().map(Project::from).collect())
    }

    async fn insert_project(&self, new_project: NewProjectRecord) -> Result<Project> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Project> {
                let project_db = ProjectDB::from_new(
                    Uuid::new_v4().to_string(),
                    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                    new_project,
                );
                let result_db = diesel::insert_into(projects::table)
                    .values(&project_db)
                    .returning(ProjectDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Project::from(result_db))
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    async fn create_test_repository() -> (ProjectRepository, Arc<DbPool>, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        (
            ProjectRepository::new(Arc::clone(&pool), writer),
            pool,
            temp_dir,
        )
    }

    fn new_record(org: &str, title: &str) -> NewProjectRecord {
        NewProjectRecord {
            organization_user_id: org.to_string(),
            title: title.to_string(),
            description: Some("Clean water for the valley".to_string()),
            goal_amount: dec!(2500.50),
            end_date: chrono::NaiveDate::from_ymd_opt(2030, 1, 31),
            project_background_image: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_project() {
        let (repo, _pool, _temp_dir) = create_test_repository().await;

        let created = repo
            .insert_project(new_record("org-1", "Wells"))
            .await
            .expect("insert project");
        assert_eq!(created.goal_amount, dec!(2500.50));
        assert_eq!(created.end_date.as_deref(), Some("2030-01-31"));
        assert!(created.status.is_none());

        let loaded = repo.get_project(&created.id).expect("get project");
        assert_eq!(loaded, created);
    }

    #[tokio::test]
    async fn test_get_missing_project_is_not_found() {
        let (repo, _pool, _temp_dir) = create_test_repository().await;
        let err = repo.get_project("nope").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_projects_filters_by_organization_and_limits() {
        let (repo, _pool, _temp_dir) = create_test_repository().await;
        for title in ["A", "B", "C"] {
            repo.insert_project(new_record("org-1", title))
                .await
                .expect("insert project");
        }
        repo.insert_project(new_record("org-2", "Other"))
            .await
            .expect("insert project");

        let org_projects = repo
            .list_projects_for_organization("org-1")
            .expect("list for org");
        assert_eq!(org_projects.len(), 3);
        assert!(org_projects
            .iter()
            .all(|p| p.organization_user_id == "org-1"));

        let recent = repo.list_recent_projects(2).expect("list recent");
        assert_eq!(recent.len(), 2);
        assert!(recent[0].created_at >= recent[1].created_at);
    }
}
