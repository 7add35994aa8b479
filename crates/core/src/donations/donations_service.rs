use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, error};

use super::donation_aggregator::build_daily_series;
use super::donations_model::{
    Donation, DonationPoint, DonorSummary, NewDonation, NewDonationRecord,
};
use super::donations_traits::{DonationRepositoryTrait, DonationServiceTrait};
use crate::constants::{DISPLAY_DECIMAL_PRECISION, MAX_DONATION_AMOUNT};
use crate::errors::{Error, Result, ValidationError};
use crate::projects::{is_project_completed, ProjectRepositoryTrait};
use crate::utils::decimal_utils::{parse_positive_amount, saturating_sum};

pub struct DonationService {
    donation_repository: Arc<dyn DonationRepositoryTrait>,
    project_repository: Arc<dyn ProjectRepositoryTrait>,
}

impl DonationService {
    pub fn new(
        donation_repository: Arc<dyn DonationRepositoryTrait>,
        project_repository: Arc<dyn ProjectRepositoryTrait>,
    ) -> Self {
        DonationService {
            donation_repository,
            project_repository,
        }
    }
}

#[async_trait]
impl DonationServiceTrait for DonationService {
    fn get_donation_series(
        &self,
        donor_id: &str,
        as_of: DateTime<Utc>,
    ) -> Result<Vec<DonationPoint>> {
        debug!("Building donation series for donor {}", donor_id);
        let records = self
            .donation_repository
            .get_donation_records_for_donor(donor_id)
            .map_err(|e| {
                error!("Error loading donation records for {}: {:?}", donor_id, e);
                e
            })?;
        Ok(build_daily_series(&records, as_of))
    }

    fn get_donations(&self, donor_id: &str) -> Result<Vec<Donation>> {
        self.donation_repository.get_donations_for_donor(donor_id)
    }

    fn get_donor_summary(&self, donor_id: &str) -> Result<DonorSummary> {
        let donations = self.donation_repository.get_donations_for_donor(donor_id)?;

        let total_donated = saturating_sum(donations.iter().map(|donation| donation.amount));
        let projects_supported = donations
            .iter()
            .map(|donation| donation.project_id.as_str())
            .collect::<HashSet<_>>()
            .len();

        Ok(DonorSummary {
            total_donated: total_donated.round_dp(DISPLAY_DECIMAL_PRECISION),
            donation_count: donations.len(),
            projects_supported,
        })
    }

    async fn record_donation(
        &self,
        donor_id: &str,
        new_donation: NewDonation,
        today: NaiveDate,
    ) -> Result<Donation> {
        if new_donation.project_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "projectId".to_string(),
            )));
        }
        let amount = parse_positive_amount(&new_donation.amount).ok_or_else(|| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "Donation amount '{}' must be a positive number",
                new_donation.amount
            )))
        })?;
        if amount > MAX_DONATION_AMOUNT {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Donation amount {} exceeds the maximum of {}",
                amount, MAX_DONATION_AMOUNT
            ))));
        }

        let project = self.project_repository.get_project(&new_donation.project_id)?;
        if is_project_completed(&project.completion_input(), today) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Project {} is completed and no longer accepts donations",
                project.id
            ))));
        }

        debug!(
            "Recording donation of {} from {} to project {}",
            amount, donor_id, project.id
        );
        self.donation_repository
            .insert_donation(NewDonationRecord {
                donor_id: donor_id.to_string(),
                project_id: project.id,
                amount,
            })
            .await
    }
}
