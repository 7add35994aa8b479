use std::collections::HashMap;

use crate::donations::donations_model::{
    Donation, DonationPoint, DonationRecord, DonorSummary, NewDonation, NewDonationRecord,
};
use crate::errors::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// Trait for donation repository operations
#[async_trait]
pub trait DonationRepositoryTrait: Send + Sync {
    /// Raw amount/timestamp rows of a donor, newest first.
    fn get_donation_records_for_donor(&self, donor_id: &str) -> Result<Vec<DonationRecord>>;
    fn get_donations_for_donor(&self, donor_id: &str) -> Result<Vec<Donation>>;
    /// Sum of donations per project. Projects without donations are absent from the map.
    fn get_totals_by_project(&self, project_ids: &[String]) -> Result<HashMap<String, Decimal>>;
    async fn insert_donation(&self, new_donation: NewDonationRecord) -> Result<Donation>;
}

/// Trait for donation service operations
#[async_trait]
pub trait DonationServiceTrait: Send + Sync {
    fn get_donation_series(
        &self,
        donor_id: &str,
        as_of: DateTime<Utc>,
    ) -> Result<Vec<DonationPoint>>;
    fn get_donations(&self, donor_id: &str) -> Result<Vec<Donation>>;
    fn get_donor_summary(&self, donor_id: &str) -> Result<DonorSummary>;
    async fn record_donation(
        &self,
        donor_id: &str,
        new_donation: NewDonation,
        today: NaiveDate,
    ) -> Result<Donation>;
}
