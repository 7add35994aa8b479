//! Donation domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw donation row as handed over by storage.
///
/// Both fields are kept as stored text so that malformed rows reach the
/// aggregator and are degraded there instead of failing the whole query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DonationRecord {
    pub amount: Option<String>,
    pub created_at: String,
}

impl DonationRecord {
    pub fn new(amount: impl Into<String>, created_at: impl Into<String>) -> Self {
        DonationRecord {
            amount: Some(amount.into()),
            created_at: created_at.into(),
        }
    }
}

/// Total donated on one UTC calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DonationPoint {
    pub date: NaiveDate,
    pub amount: Decimal,
}

/// Domain model representing a completed donation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: String,
    pub donor_id: String,
    pub project_id: String,
    pub amount: Decimal,
    pub created_at: String,
}

/// Input model for recording a donation after checkout
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewDonation {
    pub project_id: String,
    pub amount: String,
}

/// Validated donation handed to the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDonationRecord {
    pub donor_id: String,
    pub project_id: String,
    pub amount: Decimal,
}

/// Headline figures for the donor dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DonorSummary {
    pub total_donated: Decimal,
    pub donation_count: usize,
    pub projects_supported: usize,
}

/// Goal of a single project, the input side of the totals computation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectGoal {
    pub project_id: String,
    pub goal_amount: Decimal,
}

/// Funding figures of a project.
///
/// `remaining_amount` is `max(goal - collected, 0)` and `percent` stays in
/// `0..=100`, with `0` whenever the goal is not positive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTotals {
    pub project_id: String,
    pub goal_amount: Decimal,
    pub collected_amount: Decimal,
    pub remaining_amount: Decimal,
    pub percent: u8,
}
