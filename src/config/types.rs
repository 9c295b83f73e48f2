use serde::Deserialize;

/// Main configuration structure for Sumi-Linkrank
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// HTTP service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the HTTP server to (host:port)
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Page cap used when a request does not supply one
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Upper bound for any requested page cap
    #[serde(rename = "max-pages-limit", default = "default_max_pages_limit")]
    pub max_pages_limit: usize,

    /// Timeout for a single page fetch (milliseconds)
    #[serde(rename = "request-timeout-ms", default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Pause after every page fetch (milliseconds)
    #[serde(rename = "fetch-delay-ms", default = "default_fetch_delay_ms")]
    pub fetch_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            max_pages_limit: default_max_pages_limit(),
            request_timeout_ms: default_request_timeout_ms(),
            fetch_delay_ms: default_fetch_delay_ms(),
        }
    }
}

/// Scoring and reporting parameters
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Probability mass retained when propagating score across links
    #[serde(default = "default_damping")]
    pub damping: f64,

    /// Number of synchronous power-iteration rounds
    #[serde(default = "default_iterations")]
    pub iterations: u32,

    /// Number of pages reported in the top-pages ranking
    #[serde(rename = "top-pages", default = "default_top_pages")]
    pub top_pages: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            iterations: default_iterations(),
            top_pages: default_top_pages(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SumiLinkrank".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/linkrank".to_string(),
            contact_email: "linkrank@example.com".to_string(),
        }
    }
}

/// Persistence configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8787".to_string()
}

fn default_max_pages() -> usize {
    100
}

fn default_max_pages_limit() -> usize {
    1000
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_fetch_delay_ms() -> u64 {
    100
}

fn default_damping() -> f64 {
    0.85
}

fn default_iterations() -> u32 {
    10
}

fn default_top_pages() -> usize {
    10
}

fn default_database_path() -> String {
    "./linkrank.db".to_string()
}
