use chrono::NaiveDate;

use super::projects_model::ProjectCompletionInput;
use crate::constants::PROJECT_STATUS_COMPLETED;
use crate::utils::time_utils::local_day_of;

/// Decides whether a project is completed.
///
/// A project is completed when any of these holds:
/// - its status, trimmed and case-folded, is `completed`;
/// - its completion flag is explicitly `true`;
/// - its end date parses and falls strictly before `today`.
///
/// `today` is the caller's local calendar day. Missing or unparsable fields
/// never complete a project on their own.
pub fn is_project_completed(input: &ProjectCompletionInput<'_>, today: NaiveDate) -> bool {
    let by_status = input
        .status
        .is_some_and(|status| status.trim().eq_ignore_ascii_case(PROJECT_STATUS_COMPLETED));
    let by_flag = input.is_completed_flag == Some(true);
    let by_end_date = input
        .end_date
        .and_then(local_day_of)
        .is_some_and(|end| end < today);

    by_status || by_flag || by_end_date
}
