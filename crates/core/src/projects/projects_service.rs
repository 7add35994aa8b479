use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;

use super::project_status::is_project_completed;
use super::projects_model::{FeaturedProject, NewProject, NewProjectRecord, Project};
use super::projects_traits::{ProjectRepositoryTrait, ProjectServiceTrait};
use crate::constants::FEATURED_CANDIDATE_POOL;
use crate::donations::{build_project_totals, DonationRepositoryTrait, ProjectGoal};
use crate::errors::{Error, Result, ValidationError};

pub struct ProjectService {
    project_repository: Arc<dyn ProjectRepositoryTrait>,
    donation_repository: Arc<dyn DonationRepositoryTrait>,
}

impl ProjectService {
    pub fn new(
        project_repository: Arc<dyn ProjectRepositoryTrait>,
        donation_repository: Arc<dyn DonationRepositoryTrait>,
    ) -> Self {
        ProjectService {
            project_repository,
            donation_repository,
        }
    }

    /// Attaches funding totals and the completion verdict, keeping input order.
    fn with_totals(&self, projects: Vec<Project>, today: NaiveDate) -> Result<Vec<FeaturedProject>> {
        if projects.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = projects.iter().map(|p| p.id.clone()).collect();
        let totals_by_project_id = self.donation_repository.get_totals_by_project(&ids)?;
        let goals: Vec<ProjectGoal> = projects.iter().map(Project::goal).collect();
        let totals = build_project_totals(&goals, &totals_by_project_id);

        Ok(projects
            .into_iter()
            .zip(totals)
            .map(|(project, totals)| {
                let is_completed = is_project_completed(&project.completion_input(), today);
                FeaturedProject {
                    project,
                    totals,
                    is_completed,
                }
            })
            .collect())
    }

    fn rank_featured(a: &FeaturedProject, b: &FeaturedProject) -> Ordering {
        b.totals
            .percent
            .cmp(&a.totals.percent)
            .then_with(|| b.totals.collected_amount.cmp(&a.totals.collected_amount))
    }

    fn validate_new_project(
        organization_user_id: &str,
        new_project: NewProject,
    ) -> Result<NewProjectRecord> {
        let title = new_project.title.trim();
        if title.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "title".to_string(),
            )));
        }

        let goal_amount = Decimal::from_str(new_project.goal_amount.trim())?;
        if goal_amount < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Goal amount cannot be negative".to_string(),
            )));
        }

        let end_date = match new_project.end_date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d")?),
            _ => None,
        };

        Ok(NewProjectRecord {
            organization_user_id: organization_user_id.to_string(),
            title: title.to_string(),
            description: new_project.description,
            goal_amount,
            end_date,
            project_background_image: new_project.project_background_image,
        })
    }
}

#[async_trait]
impl ProjectServiceTrait for ProjectService {
    fn get_featured_projects_with_totals(
        &self,
        limit: usize,
        today: NaiveDate,
    ) -> Result<Vec<FeaturedProject>> {
        debug!("Loading featured projects (limit {})", limit);
        if limit == 0 {
            return Ok(Vec::new());
        }

        let candidates = self
            .project_repository
            .list_recent_projects(FEATURED_CANDIDATE_POOL)?;
        let open: Vec<Project> = candidates
            .into_iter()
            .filter(|p| !is_project_completed(&p.completion_input(), today))
            .collect();

        let mut featured = self.with_totals(open, today)?;
        // Stable sort: ties keep the repository's newest-first order.
        featured.sort_by(Self::rank_featured);
        featured.truncate(limit);
        Ok(featured)
    }

    fn get_project_details(&self, project_id: &str, today: NaiveDate) -> Result<FeaturedProject> {
        let project = self.project_repository.get_project(project_id)?;
        self.with_totals(vec![project], today)?
            .pop()
            .ok_or_else(|| Error::NotFound(format!("Project {project_id}")))
    }

    fn get_organization_projects(
        &self,
        organization_user_id: &str,
        today: NaiveDate,
    ) -> Result<Vec<FeaturedProject>> {
        let projects = self
            .project_repository
            .list_projects_for_organization(organization_user_id)?;
        self.with_totals(projects, today)
    }

    async fn create_project(
        &self,
        organization_user_id: &str,
        new_project: NewProject,
    ) -> Result<Project> {
        let record = Self::validate_new_project(organization_user_id, new_project).map_err(|e| {
            warn!("Rejected project from {}: {}", organization_user_id, e);
            e
        })?;
        self.project_repository.insert_project(record).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::donations::{Donation, DonationRecord, NewDonationRecord};
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::RwLock;

    // ============== Mock Repositories ==============

    struct MockProjectRepository {
        projects: RwLock<Vec<Project>>,
    }

    #[async_trait]
    impl ProjectRepositoryTrait for MockProjectRepository {
        fn get_project(&self, project_id: &str) -> Result<Project> {
            self.projects
                .read()
                .unwrap()
                .iter()
                .find(|p| p.id == project_id)
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("Project {project_id}")))
        }

        fn list_recent_projects(&self, limit: i64) -> Result<Vec<Project>> {
            Ok(self
                .projects
                .read()
                .unwrap()
                .iter()
                .take(limit as usize)
                .cloned()
                .collect())
        }

        fn list_projects_for_organization(&self, organization_user_id: &str) -> Result<Vec<Project>> {
            Ok(self
                .projects
                .read()
                .unwrap()
                .iter()
                .filter(|p| p.organization_user_id == organization_user_id)
                .cloned()
                .collect())
        }

        async fn insert_project(&self, new_project: NewProjectRecord) -> Result<Project> {
            let mut projects = self.projects.write().unwrap();
            let project = Project {
                id: format!("p{}", projects.len() + 1),
                organization_user_id: new_project.organization_user_id,
                title: new_project.title,
                description: new_project.description,
                goal_amount: new_project.goal_amount,
                status: None,
                is_completed: None,
                end_date: new_project.end_date.map(|d| d.to_string()),
                project_background_image: new_project.project_background_image,
                created_at: "2024-06-30T00:00:00Z".to_string(),
            };
            projects.insert(0, project.clone());
            Ok(project)
        }
    }

    struct MockDonationRepository {
        totals: HashMap<String, Decimal>,
    }

    #[async_trait]
    impl DonationRepositoryTrait for MockDonationRepository {
        fn get_donation_records_for_donor(&self, _: &str) -> Result<Vec<DonationRecord>> {
            unimplemented!()
        }
        fn get_donations_for_donor(&self, _: &str) -> Result<Vec<Donation>> {
            unimplemented!()
        }
        fn get_totals_by_project(&self, project_ids: &[String]) -> Result<HashMap<String, Decimal>> {
            Ok(self
                .totals
                .iter()
                .filter(|(id, _)| project_ids.contains(id))
                .map(|(id, total)| (id.clone(), *total))
                .collect())
        }
        async fn insert_donation(&self, _: NewDonationRecord) -> Result<Donation> {
            unimplemented!()
        }
    }

    fn project(id: &str, org: &str, goal: Decimal) -> Project {
        Project {
            id: id.to_string(),
            organization_user_id: org.to_string(),
            title: format!("Project {id}"),
            description: None,
            goal_amount: goal,
            status: None,
            is_completed: None,
            end_date: None,
            project_background_image: None,
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    fn service(projects: Vec<Project>, totals: &[(&str, Decimal)]) -> ProjectService {
        let totals = totals
            .iter()
            .map(|(id, total)| (id.to_string(), *total))
            .collect();
        ProjectService::new(
            Arc::new(MockProjectRepository {
                projects: RwLock::new(projects),
            }),
            Arc::new(MockDonationRepository { totals }),
        )
    }

    #[test]
    fn featured_projects_are_ranked_and_exclude_completed() {
        let mut finished = project("finished", "org-a", dec!(100));
        finished.status = Some("completed".to_string());
        let mut expired = project("expired", "org-a", dec!(100));
        expired.end_date = Some("2024-01-01".to_string());

        let svc = service(
            vec![
                project("newest", "org-a", dec!(1000)),
                finished,
                project("half", "org-b", dec!(200)),
                expired,
                project("tie-older", "org-b", dec!(1000)),
                project("quarter", "org-b", dec!(400)),
            ],
            &[
                ("finished", dec!(100)),
                ("half", dec!(100)),
                ("quarter", dec!(100)),
                ("newest", dec!(0)),
            ],
        );

        let featured = svc.get_featured_projects_with_totals(3, today()).unwrap();
        let ids: Vec<&str> = featured.iter().map(|f| f.project.id.as_str()).collect();
        assert_eq!(ids, vec!["half", "quarter", "newest"]);
        assert!(featured.iter().all(|f| !f.is_completed));
        assert_eq!(featured[0].totals.percent, 50);
        assert_eq!(featured[1].totals.remaining_amount, dec!(300));
    }

    #[test]
    fn zero_limit_returns_nothing() {
        let svc = service(vec![project("p1", "org-a", dec!(10))], &[]);
        assert!(svc
            .get_featured_projects_with_totals(0, today())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn project_details_include_completion_verdict() {
        let mut flagged = project("flagged", "org-a", dec!(500));
        flagged.is_completed = Some(true);
        let svc = service(vec![flagged], &[("flagged", dec!(600))]);

        let details = svc.get_project_details("flagged", today()).unwrap();
        assert!(details.is_completed);
        assert_eq!(details.totals.percent, 100);
        assert_eq!(details.totals.remaining_amount, Decimal::ZERO);

        assert!(matches!(
            svc.get_project_details("missing", today()),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn organization_projects_keep_completed_entries() {
        let mut finished = project("finished", "org-a", dec!(100));
        finished.status = Some("Completed".to_string());
        let svc = service(
            vec![
                finished,
                project("other-org", "org-b", dec!(100)),
                project("open", "org-a", dec!(100)),
            ],
            &[],
        );
        let projects = svc.get_organization_projects("org-a", today()).unwrap();
        assert_eq!(projects.len(), 2);
        assert!(projects[0].is_completed);
        assert!(!projects[1].is_completed);
    }

    #[tokio::test]
    async fn create_project_validates_input() {
        let svc = service(Vec::new(), &[]);
        let valid = NewProject {
            title: "  Clean water  ".to_string(),
            description: Some("Wells for villages".to_string()),
            goal_amount: "2500.50".to_string(),
            end_date: Some("2025-01-31".to_string()),
            project_background_image: None,
        };
        let created = svc.create_project("org-a", valid.clone()).await.unwrap();
        assert_eq!(created.title, "Clean water");
        assert_eq!(created.goal_amount, dec!(2500.50));
        assert_eq!(created.end_date.as_deref(), Some("2025-01-31"));

        let blank_title = NewProject {
            title: "   ".to_string(),
            ..valid.clone()
        };
        assert!(svc.create_project("org-a", blank_title).await.is_err());

        let negative_goal = NewProject {
            goal_amount: "-1".to_string(),
            ..valid.clone()
        };
        assert!(svc.create_project("org-a", negative_goal).await.is_err());

        let bad_date = NewProject {
            end_date: Some("31/01/2025".to_string()),
            ..valid
        };
        assert!(matches!(
            svc.create_project("org-a", bad_date).await,
            Err(Error::Validation(ValidationError::DateTimeParse(_)))
        ));
    }
}
