//! Donations module - donor history, daily series and per-project funding totals.

mod donation_aggregator;
mod donations_model;
mod donations_service;
mod donations_traits;

pub use donation_aggregator::{build_daily_series, build_project_totals};
pub use donations_model::{
    Donation, DonationPoint, DonationRecord, DonorSummary, NewDonation, NewDonationRecord,
    ProjectGoal, ProjectTotals,
};
pub use donations_service::DonationService;
pub use donations_traits::{DonationRepositoryTrait, DonationServiceTrait};
