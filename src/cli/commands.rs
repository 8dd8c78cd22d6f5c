//! CLI commands and argument parsing

use crate::types::StateFilter;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Harvest projects and merge requests from a GitLab v3 API
#[derive(Parser, Debug)]
#[command(name = "gitlab-harvest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// GitLab server root, overrides the config file
    #[arg(long, global = true, env = "GITLAB_HOST")]
    pub host: Option<String>,

    /// Private API token, overrides the config file
    #[arg(long, global = true, env = "GITLAB_PRIVATE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Items per page (1-100)
    #[arg(long, global = true)]
    pub per_page: Option<u32>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every project
    Projects,

    /// Fetch the merge requests of every project
    MergeRequests {
        /// Merge request state filter, overrides the config file
        #[arg(long, value_enum)]
        state: Option<StateFilter>,
    },

    /// Validate the configuration and fetch one page of projects
    Check,

    /// Print the rel="next" URL of a Link header
    NextLink {
        /// Raw Link header value
        header: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON
    Json,
    /// Indented JSON
    Pretty,
}
