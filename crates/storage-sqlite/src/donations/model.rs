//! Database models for donations.

use diesel::prelude::*;
use pure_hearts_core::donations::{Donation, DonationRecord};
use pure_hearts_core::utils::decimal_utils::parse_amount;

use crate::projects::ProjectDB;

/// Database model for donations
#[derive(
    Queryable, Identifiable, Insertable, Selectable, Associations, PartialEq, Debug, Clone,
)]
#[diesel(belongs_to(ProjectDB, foreign_key = project_id))]
#[diesel(table_name = crate::schema::donations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DonationDB {
    pub id: String,
    pub donor_id: String,
    pub project_id: String,
    pub amount: Option<String>,
    pub created_at: String,
}

// Conversion to domain models
impl From<DonationDB> for Donation {
    fn from(db: DonationDB) -> Self {
        Self {
            amount: parse_amount(db.amount.as_deref()),
            id: db.id,
            donor_id: db.donor_id,
            project_id: db.project_id,
            created_at: db.created_at,
        }
    }
}

impl From<DonationDB> for DonationRecord {
    fn from(db: DonationDB) -> Self {
        Self {
            amount: db.amount,
            created_at: db.created_at,
        }
    }
}
