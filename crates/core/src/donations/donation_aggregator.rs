//! Pure aggregation of donation rows into dashboard figures.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::donations_model::{DonationPoint, DonationRecord, ProjectGoal, ProjectTotals};
use crate::constants::{DONATION_SERIES_DAYS, PERCENT_FUNDED_MAX};
use crate::utils::decimal_utils::parse_amount;
use crate::utils::time_utils::{utc_day_of, window_ending_at};

/// Builds the daily donation series shown on the donor dashboard.
///
/// The result always holds exactly [`DONATION_SERIES_DAYS`] points, one per
/// consecutive UTC day ending at the UTC day of `as_of`, oldest first. Days
/// without donations carry a zero amount.
///
/// Records whose `created_at` does not parse are skipped. Records with a
/// missing or non-numeric amount still land on their day, contributing zero.
/// Day totals saturate at `Decimal::MAX`.
pub fn build_daily_series(records: &[DonationRecord], as_of: DateTime<Utc>) -> Vec<DonationPoint> {
    let mut by_day: HashMap<NaiveDate, Decimal> = HashMap::new();
    let mut skipped = 0usize;

    for record in records {
        let Some(day) = utc_day_of(&record.created_at) else {
            skipped += 1;
            continue;
        };
        let day_total = by_day.entry(day).or_insert(Decimal::ZERO);
        *day_total = day_total.saturating_add(parse_amount(record.amount.as_deref()));
    }

    if skipped > 0 {
        debug!(
            "Skipped {} of {} donation records with unparsable timestamps",
            skipped,
            records.len()
        );
    }

    window_ending_at(as_of.date_naive(), DONATION_SERIES_DAYS)
        .into_iter()
        .map(|date| DonationPoint {
            date,
            amount: by_day.get(&date).copied().unwrap_or(Decimal::ZERO),
        })
        .collect()
}

/// Computes funding totals for every project in `projects`, in input order.
///
/// Projects absent from `totals_by_project_id` have collected nothing.
/// Negative goals count as zero.
pub fn build_project_totals(
    projects: &[ProjectGoal],
    totals_by_project_id: &HashMap<String, Decimal>,
) -> Vec<ProjectTotals> {
    projects
        .iter()
        .map(|project| {
            let collected = totals_by_project_id
                .get(&project.project_id)
                .copied()
                .unwrap_or(Decimal::ZERO);
            let goal = project.goal_amount.max(Decimal::ZERO);

            ProjectTotals {
                project_id: project.project_id.clone(),
                goal_amount: goal,
                collected_amount: collected,
                remaining_amount: goal.saturating_sub(collected).max(Decimal::ZERO),
                percent: percent_funded(collected, goal),
            }
        })
        .collect()
}

/// Clamp-then-round: the ratio is bounded to `0..=100` before rounding half up.
fn percent_funded(collected: Decimal, goal: Decimal) -> u8 {
    if goal <= Decimal::ZERO || collected <= Decimal::ZERO {
        return 0;
    }
    let max = Decimal::from(PERCENT_FUNDED_MAX);
    let ratio = collected
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(goal))
        .unwrap_or(max)
        .clamp(Decimal::ZERO, max);

    ratio
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u8()
        .unwrap_or(PERCENT_FUNDED_MAX)
}
