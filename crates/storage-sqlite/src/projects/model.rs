//! Database models for projects.

use diesel::prelude::*;
use pure_hearts_core::projects::{NewProjectRecord, Project};
use pure_hearts_core::utils::decimal_utils::parse_amount;

/// Database model for projects
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::projects)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProjectDB {
    pub id: String,
    pub organization_user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub goal_amount: String,
    pub status: Option<String>,
    pub is_completed: Option<bool>,
    pub end_date: Option<String>,
    pub project_background_image: Option<String>,
    pub created_at: String,
}

impl ProjectDB {
    pub fn from_new(id: String, created_at: String, record: NewProjectRecord) -> Self {
        ProjectDB {
            id,
            organization_user_id: record.organization_user_id,
            title: record.title,
            description: record.description,
            goal_amount: record.goal_amount.to_string(),
            status: None,
            is_completed: None,
            end_date: record.end_date.map(|d| d.format("%Y-%m-%d").to_string()),
            project_background_image: record.project_background_image,
            created_at,
        }
    }
}

// Conversion to domain models
impl From<ProjectDB> for Project {
    fn from(db: ProjectDB) -> Self {
        Self {
            goal_amount: parse_amount(Some(&db.goal_amount)),
            id: db.id,
            organization_user_id: db.organization_user_id,
            title: db.title,
            description: db.description,
            status: db.status,
            is_completed: db.is_completed,
            end_date: db.end_date,
            project_background_image: db.project_background_image,
            created_at: db.created_at,
        }
    }
}
