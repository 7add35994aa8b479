//! Project domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::donations::{ProjectGoal, ProjectTotals};

/// Domain model representing a fundable campaign
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub organization_user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub goal_amount: Decimal,
    pub status: Option<String>,
    pub is_completed: Option<bool>,
    pub end_date: Option<String>,
    pub project_background_image: Option<String>,
    pub created_at: String,
}

impl Project {
    pub fn completion_input(&self) -> ProjectCompletionInput<'_> {
        ProjectCompletionInput {
            status: self.status.as_deref(),
            is_completed_flag: self.is_completed,
            end_date: self.end_date.as_deref(),
        }
    }

    pub fn goal(&self) -> ProjectGoal {
        ProjectGoal {
            project_id: self.id.clone(),
            goal_amount: self.goal_amount,
        }
    }
}

/// Input model for creating a new project
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub title: String,
    pub description: Option<String>,
    pub goal_amount: String,
    pub end_date: Option<String>,
    pub project_background_image: Option<String>,
}

/// Validated project handed to the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProjectRecord {
    pub organization_user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub goal_amount: Decimal,
    pub end_date: Option<NaiveDate>,
    pub project_background_image: Option<String>,
}

/// The three project fields that decide whether a campaign is over.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProjectCompletionInput<'a> {
    pub status: Option<&'a str>,
    pub is_completed_flag: Option<bool>,
    pub end_date: Option<&'a str>,
}

/// A project together with its funding figures and completion verdict.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedProject {
    pub project: Project,
    pub totals: ProjectTotals,
    pub is_completed: bool,
}
