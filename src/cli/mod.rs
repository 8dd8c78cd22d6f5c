//! CLI module
//!
//! Command-line interface for harvesting a GitLab server.
//!
//! # Commands
//!
//! - `projects` - Fetch every project
//! - `merge-requests` - Fan out over projects and fetch every merge request
//! - `check` - Validate the config and test the connection
//! - `next-link` - Extract the next-page URL from a Link header

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
