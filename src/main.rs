use anyhow::Result;

use movequote_backend::{app, config, logging, services};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let settings = config::Settings::from_env()?;

    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        "Starting movequote backend"
    );

    let rate_tables = services::RateTableStore::new();
    if let Some(company_id) = settings.seed_default_company_id {
        rate_tables.provision_defaults(company_id);
    }

    let state = app::AppState::new(settings.clone(), rate_tables, services::JobStore::new());
    let app = app::create_app(state);

    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
