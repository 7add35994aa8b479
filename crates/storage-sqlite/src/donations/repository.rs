use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use pure_hearts_core::donations::{
    Donation, DonationRecord, DonationRepositoryTrait, NewDonationRecord,
};
use pure_hearts_core::utils::decimal_utils::parse_amount;
use pure_hearts_core::Result;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::model::DonationDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::donations;
use crate::utils::chunk_for_sqlite;

pub struct DonationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl DonationRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        DonationRepository { pool, writer }
    }

    fn load_for_donor(&self, donor_id: &str) -> Result<Vec<DonationDB>> {
        let mut conn = get_connection(&self.pool)?;
        donations::table
            .filter(donations::donor_id.eq(donor_id))
            .select(DonationDB::as_select())
            .order(donations::created_at.desc())
            .load::<DonationDB>(&mut conn)
            .into_core()
    }
}

#[async_trait]
impl DonationRepositoryTrait for DonationRepository {
    fn get_donation_records_for_donor(&self, donor_id: &str) -> Result<Vec<DonationRecord>> {
        Ok(self
            .load_for_donor(donor_id)?
            .into_iter()
            .map(DonationRecord::from)
            .collect())
    }

    fn get_donations_for_donor(&self, donor_id: &str) -> Result<Vec<Donation>> {
        Ok(self
            .load_for_donor(donor_id)?
            .into_iter()
            .map(Donation::from)
            .collect())
    }

    fn get_totals_by_project(&self, project_ids: &[String]) -> Result<HashMap<String, Decimal>> {
        let mut totals: HashMap<String, Decimal> = HashMap::new();
        if project_ids.is_empty() {
            return Ok(totals);
        }

        let mut conn = get_connection(&self.pool)?;
        for chunk in chunk_for_sqlite(project_ids) {
            let rows = donations::table
                .filter(donations::project_id.eq_any(chunk))
                .select((donations::project_id, donations::amount))
                .load::<(String, Option<String>)>(&mut conn)
                .into_core()?;
            for (project_id, amount) in rows {
                let total = totals.entry(project_id).or_insert(Decimal::ZERO);
                *total = total.saturating_add(parse_amount(amount.as_deref()));
            }
        }

        debug!(
            "Loaded donation totals for {} of {} projects",
            totals.len(),
            project_ids.len()
        );
        Ok(totals)
    }

    async fn insert_donation(&self, new_donation: NewDonationRecord) -> Result<Donation> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Donation> {
                let donation_db = DonationDB {
                    id: Uuid::new_v4().to_string(),
                    donor_id: new_donation.donor_id,
                    project_id: new_donation.project_id,
                    amount: Some(new_donation.amount.to_string()),
                    created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                };
                let result_db = diesel::insert_into(donations::table)
                    .values(&donation_db)
                    .returning(DonationDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Donation::from(result_db))
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

    async fn create_test_repository() -> (DonationRepository, Arc<DbPool>, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        (
            DonationRepository::new(Arc::clone(&pool), writer),
            pool,
            temp_dir,
        )
    }

    /// Inserts a project row directly to satisfy the foreign key.
    fn create_test_project(pool: &Arc<DbPool>, project_id: &str) {
        let mut conn = get_connection(pool).expect("Failed to get connection");
        diesel::sql_query(format!(
            "INSERT INTO projects (id, organization_user_id, title, goal_amount, created_at) \
             VALUES ('{}', 'org-1', 'Test Project', '1000', '2024-01-01T00:00:00Z')",
            project_id
        ))
        .execute(&mut conn)
        .expect("Failed to create test project");
    }

    fn insert_raw_donation(pool: &Arc<DbPool>, id: &str, project_id: &str, amount: Option<&str>) {
        let mut conn = get_connection(pool).expect("Failed to get connection");
        diesel::insert_into(donations::table)
            .values(&DonationDB {
                id: id.to_string(),
                donor_id: "donor-1".to_string(),
                project_id: project_id.to_string(),
                amount: amount.map(str::to_string),
                created_at: "2024-03-05T10:00:00Z".to_string(),
            })
            .execute(&mut conn)
            .expect("Failed to insert donation");
    }

    #[tokio::test]
    async fn test_insert_donation_round_trips_amount() {
        let (repo, pool, _temp_dir) = create_test_repository().await;
        create_test_project(&pool, "p1");

        let donation = repo
            .insert_donation(NewDonationRecord {
                donor_id: "donor-1".to_string(),
                project_id: "p1".to_string(),
                amount: dec!(12.34),
            })
            .await
            .expect("insert donation");
        assert_eq!(donation.amount, dec!(12.34));

        let records = repo
            .get_donation_records_for_donor("donor-1")
            .expect("load records");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount.as_deref(), Some("12.34"));
        assert!(repo
            .get_donations_for_donor("someone-else")
            .expect("load donations")
            .is_empty());
    }

    #[tokio::test]
    async fn test_insert_donation_for_unknown_project_fails() {
        let (repo, _pool, _temp_dir) = create_test_repository().await;
        let result = repo
            .insert_donation(NewDonationRecord {
                donor_id: "donor-1".to_string(),
                project_id: "missing".to_string(),
                amount: dec!(5),
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_totals_treat_malformed_amounts_as_zero() {
        let (repo, pool, _temp_dir) = create_test_repository().await;
        create_test_project(&pool, "p1");
        create_test_project(&pool, "p2");
        insert_raw_donation(&pool, "d1", "p1", Some("100.50"));
        insert_raw_donation(&pool, "d2", "p1", Some("abc"));
        insert_raw_donation(&pool, "d3", "p1", None);
        insert_raw_donation(&pool, "d4", "p2", Some("20"));

        let totals = repo
            .get_totals_by_project(&["p1".to_string(), "p2".to_string(), "p3".to_string()])
            .expect("totals");

        assert_eq!(totals.get("p1"), Some(&dec!(100.50)));
        assert_eq!(totals.get("p2"), Some(&dec!(20)));
        assert!(!totals.contains_key("p3"));
    }

    #[tokio::test]
    async fn test_totals_saturate_on_huge_amounts() {
        let (repo, pool, _temp_dir) = create_test_repository().await;
        create_test_project(&pool, "p1");
        insert_raw_donation(&pool, "d1", "p1", Some("50000000000000000000000000000"));
        insert_raw_donation(&pool, "d2", "p1", Some("50000000000000000000000000000"));

        let totals = repo.get_totals_by_project(&["p1".to_string()]).expect("totals");
        assert_eq!(totals.get("p1"), Some(&Decimal::MAX));
    }

    #[tokio::test]
    async fn test_totals_for_no_projects_is_empty() {
        let (repo, _pool, _temp_dir) = create_test_repository().await;
        assert!(repo.get_totals_by_project(&[]).expect("totals").is_empty());
    }
}
