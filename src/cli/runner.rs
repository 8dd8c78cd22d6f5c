//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::HarvestConfig;
use crate::endpoints;
use crate::error::Result;
use crate::fanout::FanOutAggregator;
use crate::http::HttpClient;
use crate::pagination::next_link;
use crate::types::StateFilter;
use serde_json::{json, Value};
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Projects => self.projects().await,
            Commands::MergeRequests { state } => self.merge_requests(*state).await,
            Commands::Check => self.check().await,
            Commands::NextLink { header } => {
                self.next_link(header);
                Ok(())
            }
        }
    }

    /// Load the config file (if any), apply CLI overrides and validate
    pub(crate) fn resolve_config(&self) -> Result<HarvestConfig> {
        let mut config = match &self.cli.config {
            Some(path) => HarvestConfig::load(path)?,
            None => HarvestConfig::default(),
        };

        if let Some(host) = &self.cli.host {
            config.host.clone_from(host);
        }
        if let Some(token) = &self.cli.token {
            config.private_token.clone_from(token);
        }
        if let Some(per_page) = self.cli.per_page {
            config.per_page = per_page;
        }

        config.validate()?;
        Ok(config)
    }

    fn build_aggregator(&self, config: &HarvestConfig) -> Result<FanOutAggregator<HttpClient>> {
        let client = HttpClient::with_config(config.http_client_config())?;
        Ok(FanOutAggregator::new(client, config.credentials())
            .with_per_page(config.per_page)
            .with_state(config.state))
    }

    /// Fetch and print every project
    async fn projects(&self) -> Result<()> {
        let config = self.resolve_config()?;
        let aggregator = self.build_aggregator(&config)?;

        let projects = aggregator.get_parents().await?;
        self.output_message(&Value::Array(projects));
        Ok(())
    }

    /// Fetch and print every merge request of every project
    async fn merge_requests(&self, state: Option<StateFilter>) -> Result<()> {
        let mut config = self.resolve_config()?;
        if let Some(state) = state {
            config.state = state;
        }
        let aggregator = self.build_aggregator(&config)?;
        let start = Instant::now();

        aggregator
            .run_all_with(|merge_requests| {
                info!(
                    count = merge_requests.len(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    "harvest complete"
                );
                self.output_message(&Value::Array(merge_requests));
            })
            .await
    }

    /// Check connection
    async fn check(&self) -> Result<()> {
        let config = self.resolve_config()?;
        let client = HttpClient::with_config(config.http_client_config())?;
        let credentials = config.credentials();

        let url = endpoints::project_url(&credentials.host);
        let params = endpoints::base_params(&credentials.private_token, 1, config.per_page);

        match client.get_page(&url, &params).await {
            Ok(page) => {
                self.output_message(&json!({
                    "status": "SUCCEEDED",
                    "host": credentials.host,
                    "projects_on_first_page": page.body.len(),
                    "next": page.next_link(),
                }));
            }
            Err(e) => {
                self.output_message(&json!({
                    "status": "FAILED",
                    "host": credentials.host,
                    "message": format!("Connection failed: {e}"),
                }));
            }
        }

        Ok(())
    }

    fn next_link(&self, header: &str) {
        self.output_message(&json!({ "next": next_link(header) }));
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}
