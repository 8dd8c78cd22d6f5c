//! Harvest configuration
//!
//! Settings are read from a YAML file and then overridden by the CLI / the
//! environment. Example:
//!
//! ```yaml
//! host: https://gitlab.example.com
//! private_token: glpat-xxxx
//! per_page: 100
//! state: all
//! http:
//!   timeout_secs: 30
//! ```

use crate::endpoints::query_param;
use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use crate::pagination::MAX_PER_PAGE;
use crate::types::StateFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

// ============================================================================
// Credentials
// ============================================================================

/// GitLab server and API token
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Server root, e.g. `https://gitlab.example.com`
    pub host: String,
    /// Private API token
    pub private_token: String,
}

impl Credentials {
    /// Create credentials
    pub fn new(host: impl Into<String>, private_token: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            private_token: private_token.into(),
        }
    }

    /// Read `private_token` and `gitlab` from a query string
    pub fn from_query_string(qs: &str) -> Result<Self> {
        let token = query_param(qs, "private_token")
            .ok_or_else(|| Error::missing_field("private_token"))?;
        let host = query_param(qs, "gitlab").ok_or_else(|| Error::missing_field("gitlab"))?;
        Ok(Self::new(host, token))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("private_token", &"***")
            .finish()
    }
}

// ============================================================================
// Config File
// ============================================================================

/// Complete harvest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// GitLab server root
    #[serde(default)]
    pub host: String,

    /// Private API token
    #[serde(default)]
    pub private_token: String,

    /// Page size for every request
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Merge request state filter
    #[serde(default)]
    pub state: StateFilter,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpSettings,
}

fn default_per_page() -> u32 {
    MAX_PER_PAGE
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            private_token: String::new(),
            per_page: default_per_page(),
            state: StateFilter::default(),
            http: HttpSettings::default(),
        }
    }
}

/// HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Per-request timeout in seconds (0 = no timeout)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

impl HarvestConfig {
    /// Load and parse a YAML config file (not validated)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {e}",
                    path.display()
                ))
            }
        })?;
        Self::from_yaml(&content)
    }

    /// Parse a YAML string (not validated)
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Check the config can drive a harvest
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(Error::missing_field("host"));
        }
        let url = Url::parse(&self.host)
            .map_err(|e| Error::invalid_value("host", format!("{e}: {}", self.host)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "host",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.private_token.is_empty() {
            return Err(Error::missing_field("private_token"));
        }

        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(Error::invalid_value(
                "per_page",
                format!("must be between 1 and {MAX_PER_PAGE}, got {}", self.per_page),
            ));
        }

        Ok(())
    }

    /// Credentials for the aggregator
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.host.trim_end_matches('/'), &self.private_token)
    }

    /// HTTP client configuration
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder();
        builder = if self.http.timeout_secs == 0 {
            builder.no_timeout()
        } else {
            builder.timeout(Duration::from_secs(self.http.timeout_secs))
        };
        if let Some(agent) = &self.http.user_agent {
            builder = builder.user_agent(agent);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use test_case::test_case;

    fn valid() -> HarvestConfig {
        HarvestConfig {
            host: "https://gitlab.example.com".to_string(),
            private_token: "abc".to_string(),
            ..HarvestConfig::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = HarvestConfig::from_yaml("host: https://gitlab.example.com\n").unwrap();
        assert_eq!(config.per_page, 100);
        assert_eq!(config.state, StateFilter::All);
        assert_eq!(config.http.timeout_secs, 30);
        assert!(config.private_token.is_empty());
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r"
host: https://gitlab.example.com/
private_token: secret
per_page: 20
state: merged
http:
  timeout_secs: 0
  user_agent: harvest-test
";
        let config = HarvestConfig::from_yaml(yaml).unwrap();
        config.validate().unwrap();
        assert_eq!(config.per_page, 20);
        assert_eq!(config.state, StateFilter::Merged);

        let creds = config.credentials();
        assert_eq!(creds.host, "https://gitlab.example.com");
        assert_eq!(creds.private_token, "secret");

        let http = config.http_client_config();
        assert!(http.timeout.is_none());
        assert_eq!(http.user_agent, "harvest-test");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "host: https://gitlab.example.com").unwrap();
        writeln!(file, "private_token: from-file").unwrap();

        let config = HarvestConfig::load(file.path()).unwrap();
        assert_eq!(config.private_token, "from-file");
    }

    #[test]
    fn test_load_missing_file() {
        let err = HarvestConfig::load("/nonexistent/harvest.yaml").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            HarvestConfig::from_yaml("per_page: [1, 2]").unwrap_err(),
            Error::YamlParse(_)
        ));
    }

    #[test]
    fn test_validate_ok() {
        valid().validate().unwrap();
    }

    #[test_case(|c: &mut HarvestConfig| { c.host.clear(); }, "host" ; "missing host")]
    #[test_case(|c: &mut HarvestConfig| { c.host = "not a url".into(); }, "host" ; "bad host")]
    #[test_case(|c: &mut HarvestConfig| { c.host = "ftp://gitlab.example.com".into(); }, "host" ; "bad scheme")]
    #[test_case(|c: &mut HarvestConfig| { c.private_token.clear(); }, "private_token" ; "missing token")]
    #[test_case(|c: &mut HarvestConfig| { c.per_page = 0; }, "per_page" ; "zero page size")]
    #[test_case(|c: &mut HarvestConfig| { c.per_page = 101; }, "per_page" ; "page size above limit")]
    fn test_validate_rejects(mutate: fn(&mut HarvestConfig), field: &str) {
        let mut config = valid();
        mutate(&mut config);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains(field), "{err}");
    }

    #[test]
    fn test_credentials_from_query_string() {
        let creds = Credentials::from_query_string(
            "?private_token=abcdefghijklmn&gitlab=https://gitlab.example.com",
        )
        .unwrap();
        assert_eq!(creds.private_token, "abcdefghijklmn");
        assert_eq!(creds.host, "https://gitlab.example.com");

        assert!(Credentials::from_query_string("?private_token=abc").is_err());
    }

    #[test]
    fn test_credentials_debug_hides_token() {
        let creds = Credentials::new("https://gitlab.example.com", "secret");
        assert!(!format!("{creds:?}").contains("secret"));
    }
}
