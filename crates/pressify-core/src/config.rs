//! Site and CMS configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{CoreError, Result};

/// Main configuration structure for Pressify.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Upstream CMS connection settings.
    pub cms: CmsConfig,

    /// Content listing settings.
    #[serde(default)]
    pub content: ContentConfig,

    /// Response memoization settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// JSON server settings.
    #[serde(default)]
    pub serve: ServeConfig,

    /// Sitemap settings.
    #[serde(default)]
    pub sitemap: SitemapConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Base URL for the site (e.g., "https://example.com").
    pub base_url: String,

    /// Site description for diagnostics and tooling output.
    #[serde(default)]
    pub description: Option<String>,
}

/// Upstream CMS connection configuration.
///
/// Credentials are usually left out of the file and supplied through the
/// environment (`PRESSIFY__CMS__BASIC_AUTH_USER`, ...) via
/// [`Config::load_with_env`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmsConfig {
    /// GraphQL endpoint URL (e.g., "https://wp.example.com/graphql").
    pub graphql_url: String,

    /// REST API root URL for write-side tooling (e.g.,
    /// "https://wp.example.com/wp-json"). Optional; only the seed command
    /// needs it.
    #[serde(default)]
    pub rest_url: Option<String>,

    /// HTTP Basic auth user for the CMS.
    #[serde(default)]
    pub basic_auth_user: Option<String>,

    /// HTTP Basic auth password for the CMS.
    #[serde(default)]
    pub basic_auth_password: Option<String>,

    /// Skip TLS certificate verification. Must stay off outside of
    /// non-production diagnostics.
    #[serde(default)]
    pub allow_insecure_tls: bool,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header attached to every CMS request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Content listing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Default number of posts per listing page.
    #[serde(default = "default_per_page")]
    pub per_page: usize,

    /// Number of posts returned by the recent-posts shortcut.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

/// Response memoization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether the short-lived memo cache is enabled.
    #[serde(default)]
    pub enabled: bool,

    /// Time-to-live for memoized responses, in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
}

/// JSON server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServeConfig {
    /// Bind address for the JSON server.
    #[serde(default = "default_bind")]
    pub bind: String,
}

/// Sitemap configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitemapConfig {
    /// Page size used while crawling the post listing exhaustively.
    #[serde(default = "default_sitemap_page_size")]
    pub page_size: usize,

    /// Site-local paths always included in the sitemap.
    #[serde(default = "default_static_paths")]
    pub static_paths: Vec<String>,
}

// Default value functions
fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("pressify/{}", env!("CARGO_PKG_VERSION"))
}

fn default_per_page() -> usize {
    10
}

fn default_recent_limit() -> usize {
    5
}

fn default_cache_ttl_secs() -> u64 {
    60
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_sitemap_page_size() -> usize {
    100
}

fn default_static_paths() -> Vec<String> {
    vec!["/".to_string()]
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            recent_limit: default_recent_limit(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl_secs: default_cache_ttl_secs(),
        }
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            page_size: default_sitemap_page_size(),
            static_paths: default_static_paths(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file with environment overrides.
    ///
    /// Environment variables use the `PRESSIFY` prefix with `__` as the
    /// section separator, e.g. `PRESSIFY__CMS__BASIC_AUTH_PASSWORD`.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("PRESSIFY").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.base_url.is_empty() {
            return Err(CoreError::config("site.base_url cannot be empty"));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        let endpoint = Url::parse(&self.cms.graphql_url).map_err(|e| {
            CoreError::config_with_source(
                format!("cms.graphql_url is not a valid URL: {}", self.cms.graphql_url),
                e,
            )
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(CoreError::config(
                "cms.graphql_url must use the http or https scheme",
            ));
        }

        if self.cms.timeout_secs == 0 {
            return Err(CoreError::config("cms.timeout_secs must be at least 1"));
        }

        if self.cms.allow_insecure_tls {
            tracing::warn!(
                "cms.allow_insecure_tls is enabled; TLS certificates will not be verified"
            );
        }

        if self.sitemap.page_size == 0 {
            return Err(CoreError::config("sitemap.page_size must be at least 1"));
        }

        Ok(())
    }

    /// Get the full site URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            format!("{base}/")
        } else {
            format!("{base}/{path}")
        }
    }
}
