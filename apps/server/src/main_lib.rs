use std::sync::Arc;

use crate::{
    auth::AuthManager,
    config::{Config, LogFormat},
};
use pure_hearts_core::{
    donations::{DonationService, DonationServiceTrait},
    projects::{ProjectService, ProjectServiceTrait},
};
use pure_hearts_storage_sqlite::{
    db::{self, write_actor},
    donations::DonationRepository,
    projects::ProjectRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub donation_service: Arc<dyn DonationServiceTrait + Send + Sync>,
    pub project_service: Arc<dyn ProjectServiceTrait + Send + Sync>,
    pub auth: Option<Arc<AuthManager>>,
    pub featured_limit: usize,
    pub image_max_bytes: usize,
}

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (json_layer, text_layer) = match format {
        LogFormat::Json => (Some(fmt::layer().json().with_current_span(false)), None),
        LogFormat::Text => (None, Some(fmt::layer())),
    };
    // `init` also routes `log` records from the library crates into tracing.
    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let project_repository = Arc::new(ProjectRepository::new(pool.clone(), writer.clone()));
    let donation_repository = Arc::new(DonationRepository::new(pool.clone(), writer.clone()));

    let donation_service = Arc::new(DonationService::new(
        donation_repository.clone(),
        project_repository.clone(),
    ));
    let project_service = Arc::new(ProjectService::new(
        project_repository,
        donation_repository,
    ));

    let auth = match config.jwt_secret.as_deref() {
        Some(secret) => Some(Arc::new(AuthManager::new(secret.as_bytes()))),
        None => {
            tracing::warn!("PH_JWT_SECRET is not set; authenticated routes will reject all requests");
            None
        }
    };

    Ok(Arc::new(AppState {
        donation_service,
        project_service,
        auth,
        featured_limit: config.featured_limit,
        image_max_bytes: config.image_max_bytes,
    }))
}
