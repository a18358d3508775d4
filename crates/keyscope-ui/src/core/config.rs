//! Runtime configuration for the dashboard client.
//!
//! # Design
//! - Every field has a default so a bare deployment works against a local API.
//! - Overrides arrive as partial JSON (persisted by operators in local storage)
//!   and are merged field-by-field over the defaults.
//! - Validation runs after merging so a bad override never reaches the router.

use serde::Deserialize;
use thiserror::Error;

/// Default API base path.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/v1";
/// Largest accepted CSV upload (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;
/// Delay between the upload success banner and the redirect to the list.
pub const DEFAULT_UPLOAD_REDIRECT_DELAY_MS: u32 = 2_000;
/// Redirects followed per navigation before the router gives up.
pub const DEFAULT_MAX_REDIRECT_HOPS: u8 = 4;
/// Keywords shown in the dashboard's recent list.
pub const DEFAULT_RECENT_KEYWORDS: usize = 5;

/// Configuration failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The override document is not valid JSON for [`UiConfig`].
    #[error("config override is not valid JSON: {0}")]
    Parse(String),
    /// A field failed validation.
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        /// Offending field name.
        field: &'static str,
        /// Human-readable reason.
        reason: &'static str,
    },
}

/// Dashboard client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiConfig {
    /// Base URL prefixed to every API endpoint.
    pub api_base_url: String,
    /// When set, fragments are fetched from this base instead of the embedded copies.
    pub fragment_base_url: Option<String>,
    /// Maximum upload size in bytes.
    pub max_upload_bytes: u64,
    /// Delay before redirecting after a successful upload.
    pub upload_redirect_delay_ms: u32,
    /// Redirect hops followed per navigation.
    pub max_redirect_hops: u8,
    /// Number of keywords in the dashboard's recent list.
    pub recent_keywords: usize,
    /// Log level passed to the console subscriber.
    pub log_level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            fragment_base_url: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            upload_redirect_delay_ms: DEFAULT_UPLOAD_REDIRECT_DELAY_MS,
            max_redirect_hops: DEFAULT_MAX_REDIRECT_HOPS,
            recent_keywords: DEFAULT_RECENT_KEYWORDS,
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigOverrides {
    api_base_url: Option<String>,
    fragment_base_url: Option<String>,
    max_upload_bytes: Option<u64>,
    upload_redirect_delay_ms: Option<u32>,
    max_redirect_hops: Option<u8>,
    recent_keywords: Option<usize>,
    log_level: Option<String>,
}

impl UiConfig {
    /// Merge a partial JSON override document over `self` and validate the result.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields and
    /// [`ConfigError::Invalid`] when the merged config fails [`UiConfig::validate`].
    pub fn with_overrides(mut self, raw: &str) -> Result<Self, ConfigError> {
        let overrides: ConfigOverrides =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        if let Some(value) = overrides.api_base_url {
            self.api_base_url = value;
        }
        if let Some(value) = overrides.fragment_base_url {
            self.fragment_base_url = Some(value).filter(|url| !url.trim().is_empty());
        }
        if let Some(value) = overrides.max_upload_bytes {
            self.max_upload_bytes = value;
        }
        if let Some(value) = overrides.upload_redirect_delay_ms {
            self.upload_redirect_delay_ms = value;
        }
        if let Some(value) = overrides.max_redirect_hops {
            self.max_redirect_hops = value;
        }
        if let Some(value) = overrides.recent_keywords {
            self.recent_keywords = value;
        }
        if let Some(value) = overrides.log_level {
            self.log_level = value;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check invariants the router and controllers rely on.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "api_base_url",
                reason: "must not be empty",
            });
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid {
                field: "max_upload_bytes",
                reason: "must be greater than zero",
            });
        }
        if self.max_redirect_hops == 0 {
            return Err(ConfigError::Invalid {
                field: "max_redirect_hops",
                reason: "must be greater than zero",
            });
        }
        if self.recent_keywords == 0 {
            return Err(ConfigError::Invalid {
                field: "recent_keywords",
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }

    /// API base URL without a trailing slash.
    #[must_use]
    pub fn api_base(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}
