use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing::info;

use trainplan::api::routes::create_routes;
use trainplan::config::AppConfig;
use trainplan::datastore::PostgresDatastore;
use trainplan::llm::AnthropicClient;
use trainplan::services::PlanGenerationService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;
    if config.trace_enabled {
        info!(
            endpoint = config.trace_endpoint.as_deref().unwrap_or("-"),
            project = config.trace_project.as_deref().unwrap_or("-"),
            "request tracing enabled"
        );
    }

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    let datastore = Arc::new(PostgresDatastore::new(pool));
    let llm = Arc::new(AnthropicClient::new(config.anthropic_api_key.clone()));
    let service =
        PlanGenerationService::new(datastore, llm).with_budget(config.generation_budget);

    let app = create_routes(service);
    let listener = TcpListener::bind(&config.server_address()).await?;
    info!("trainplan server listening on http://{}", config.server_address());

    axum::serve(listener, app).await?;

    Ok(())
}
