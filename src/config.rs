use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub linode: LinodeConfig,
    #[serde(default)]
    pub collection: CollectionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path on which the exposition text is served.
    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            metrics_path: default_metrics_path(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    9388
}

fn default_metrics_path() -> String {
    "/metrics".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinodeConfig {
    /// API token; `LINODE_TOKEN` in the environment takes precedence.
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for LinodeConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            page_size: default_page_size(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.linode.com/v4".into()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> u32 {
    500
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionConfig {
    /// Enabled collector names; empty enables all. `COLLECTORS` (comma-separated) takes precedence.
    #[serde(default)]
    pub collectors: Vec<String>,
    /// Deadline for one whole scrape (enumeration and all fan-out).
    #[serde(default = "default_pass_timeout_secs")]
    pub pass_timeout_secs: u64,
    /// Admission gate size for collectors that bound their fan-out.
    #[serde(default = "default_concurrency_limit")]
    pub concurrency_limit: usize,
    #[serde(default = "default_endpoint_cache_ttl_secs")]
    pub endpoint_cache_ttl_secs: u64,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            collectors: Vec::new(),
            pass_timeout_secs: default_pass_timeout_secs(),
            concurrency_limit: default_concurrency_limit(),
            endpoint_cache_ttl_secs: default_endpoint_cache_ttl_secs(),
        }
    }
}

fn default_pass_timeout_secs() -> u64 {
    60
}

fn default_concurrency_limit() -> usize {
    50
}

fn default_endpoint_cache_ttl_secs() -> u64 {
    30
}

impl CollectionConfig {
    pub fn pass_timeout(&self) -> Duration {
        Duration::from_secs(self.pass_timeout_secs)
    }

    pub fn endpoint_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.endpoint_cache_ttl_secs)
    }
}

/// Paths already routed by the HTTP server, without trailing slashes.
const RESERVED_PATHS: [&str; 2] = ["", "/version"];

impl AppConfig {
    /// Loads `CONFIG_FILE` (default `config.toml`) and applies environment overrides.
    /// A missing default file is not an error: every key has a default except the token.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").ok();
        let s = match &path {
            Some(p) => std::fs::read_to_string(p)?,
            None => std::fs::read_to_string("config.toml").unwrap_or_default(),
        };
        let mut config: AppConfig = toml::from_str(&s)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate config from a string (e.g. for tests). No environment overrides.
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(token) = std::env::var("LINODE_TOKEN")
            && !token.is_empty()
        {
            self.linode.token = token;
        }
        if let Ok(list) = std::env::var("COLLECTORS")
            && !list.trim().is_empty()
        {
            self.collection.collectors = parse_collector_list(&list);
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            self.server.metrics_path.starts_with('/') && self.server.metrics_path.len() > 1,
            "server.metrics_path must start with '/' and name a path, got {:?}",
            self.server.metrics_path
        );
        anyhow::ensure!(
            !RESERVED_PATHS.contains(&self.server.metrics_path.trim_end_matches('/')),
            "server.metrics_path must not be \"/\" or \"/version\", got {:?}",
            self.server.metrics_path
        );
        anyhow::ensure!(
            !self.linode.token.is_empty(),
            "linode.token must be non-empty (or set LINODE_TOKEN)"
        );
        anyhow::ensure!(
            self.linode.api_url.starts_with("http://") || self.linode.api_url.starts_with("https://"),
            "linode.api_url must be an http(s) URL, got {:?}",
            self.linode.api_url
        );
        anyhow::ensure!(
            self.linode.request_timeout_secs > 0,
            "linode.request_timeout_secs must be > 0, got {}",
            self.linode.request_timeout_secs
        );
        anyhow::ensure!(
            (25..=500).contains(&self.linode.page_size),
            "linode.page_size must be between 25 and 500, got {}",
            self.linode.page_size
        );
        anyhow::ensure!(
            self.collection.pass_timeout_secs > 0,
            "collection.pass_timeout_secs must be > 0, got {}",
            self.collection.pass_timeout_secs
        );
        anyhow::ensure!(
            self.collection.concurrency_limit > 0,
            "collection.concurrency_limit must be > 0, got {}",
            self.collection.concurrency_limit
        );
        anyhow::ensure!(
            self.collection.endpoint_cache_ttl_secs > 0,
            "collection.endpoint_cache_ttl_secs must be > 0, got {}",
            self.collection.endpoint_cache_ttl_secs
        );
        Ok(())
    }
}

/// Splits a comma-separated collector list, trimming blanks.
pub fn parse_collector_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}
