use std::sync::Arc;

use crate::{
    auth::{Requester, UserRole},
    error::ApiResult,
    main_lib::AppState,
};
use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use pure_hearts_core::{
    donations::{Donation, DonationPoint, DonorSummary, NewDonation},
    utils::time_utils::local_today,
};

async fn get_donations(
    State(state): State<Arc<AppState>>,
    requester: Requester,
) -> ApiResult<Json<Vec<Donation>>> {
    let donor_id = requester.require(UserRole::Donor)?;
    let donations = state.donation_service.get_donations(donor_id)?;
    Ok(Json(donations))
}

async fn record_donation(
    State(state): State<Arc<AppState>>,
    requester: Requester,
    Json(payload): Json<NewDonation>,
) -> ApiResult<Json<Donation>> {
    let donor_id = requester.require(UserRole::Donor)?;
    let donation = state
        .donation_service
        .record_donation(donor_id, payload, local_today())
        .await?;
    Ok(Json(donation))
}

async fn get_donation_series(
    State(state): State<Arc<AppState>>,
    requester: Requester,
) -> ApiResult<Json<Vec<DonationPoint>>> {
    let donor_id = requester.require(UserRole::Donor)?;
    let series = state
        .donation_service
        .get_donation_series(donor_id, Utc::now())?;
    Ok(Json(series))
}

async fn get_donor_summary(
    State(state): State<Arc<AppState>>,
    requester: Requester,
) -> ApiResult<Json<DonorSummary>> {
    let donor_id = requester.require(UserRole::Donor)?;
    let summary = state.donation_service.get_donor_summary(donor_id)?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/donations", get(get_donations).post(record_donation))
        .route("/donations/series", get(get_donation_series))
        .route("/donations/summary", get(get_donor_summary))
}
