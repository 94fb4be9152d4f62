use std::env;
use std::time::Duration;

use anyhow::{anyhow, Result};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub anthropic_api_key: String,
    pub database_url: String,
    pub trace_endpoint: Option<String>,
    pub trace_project: Option<String>,
    pub trace_enabled: bool,
    pub generation_budget: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .unwrap_or(3000);
        let anthropic_api_key =
            env::var("ANTHROPIC_API_KEY").map_err(|_| anyhow!("ANTHROPIC_API_KEY is not set"))?;
        let database_url =
            env::var("DATABASE_URL").map_err(|_| anyhow!("DATABASE_URL is not set"))?;
        let trace_endpoint = env::var("TRACE_ENDPOINT").ok();
        let trace_project = env::var("TRACE_PROJECT").ok();
        let trace_enabled = env::var("TRACE_ENABLED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let generation_budget = env::var("GENERATION_BUDGET_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(60 * 60));

        Ok(AppConfig {
            host,
            port,
            anthropic_api_key,
            database_url,
            trace_endpoint,
            trace_project,
            trace_enabled,
            generation_budget,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
