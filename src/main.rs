use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use course_staffing_api::auth::{SystemClock, TokenService};
use course_staffing_api::config;
use course_staffing_api::remote::{HttpContractDirectory, HttpCourseDirectory, RemoteCallClient};
use course_staffing_api::repository::{
    PgApplicationRepository, PgContractRepository, PgHourDeclarationRepository,
};
use course_staffing_api::routes;
use course_staffing_api::services::{ApplicationService, ContractService};
use course_staffing_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = config::config();
    tracing::info!(
        "starting course staffing API in {:?} mode",
        config.environment
    );

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.connection_timeout))
        .connect(&database_url)
        .await?;

    sqlx::migrate!().run(&pool).await?;

    let timeout = Duration::from_secs(config.collaborators.request_timeout_secs);
    let course_directory = Arc::new(HttpCourseDirectory::new(RemoteCallClient::new(
        &config.collaborators.course_directory_url,
        timeout,
    )?));
    let contract_directory = Arc::new(HttpContractDirectory::new(RemoteCallClient::new(
        &config.collaborators.contract_directory_url,
        timeout,
    )?));

    let application_repo = Arc::new(PgApplicationRepository::new(pool.clone()));
    let contract_repo = Arc::new(PgContractRepository::new(pool.clone()));
    let hour_repo = Arc::new(PgHourDeclarationRepository::new(pool.clone()));

    let token_service = Arc::new(TokenService::new(
        config.security.jwt_secret.clone(),
        Arc::new(SystemClock),
    ));

    let state = AppState {
        token_service,
        applications: Arc::new(ApplicationService::new(
            application_repo,
            course_directory.clone(),
            contract_directory,
        )),
        contracts: Arc::new(ContractService::new(
            contract_repo,
            hour_repo,
            course_directory,
        )),
    };

    let app = routes::app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("STAFFING_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(8081);

    let bind_addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("course staffing API listening on http://{bind_addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
