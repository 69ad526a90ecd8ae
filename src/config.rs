//! Runtime configuration for the LinkedIn integration.
//!
//! Values come from environment variables. Call `dotenvy::dotenv().ok();` first if they
//! live in a `.env` file.

use std::env;

use crate::errors::{CarouselError, Result};

pub const DEFAULT_API_BASE: &str = "https://api.linkedin.com";
/// `LinkedIn-Version` header value (YYYYMM) sent to the versioned REST API.
pub const DEFAULT_API_VERSION: &str = "202401";

/// Where and how the client talks to LinkedIn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedInConfig {
    /// Scheme and host without a trailing slash. Overridden in tests with a local server.
    pub api_base: String,
    pub api_version: String,
}

impl Default for LinkedInConfig {
    fn default() -> Self {
        LinkedInConfig {
            api_base: DEFAULT_API_BASE.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl LinkedInConfig {
    /// Reads `LINKEDIN_API_BASE` and `LINKEDIN_API_VERSION`, falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = LinkedInConfig::default();
        LinkedInConfig {
            api_base: env::var("LINKEDIN_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            api_version: env::var("LINKEDIN_API_VERSION").unwrap_or(defaults.api_version),
        }
    }
}

/// The member or organization a post is published as.
#[derive(Clone, PartialEq, Eq)]
pub struct LinkedInCredentials {
    pub access_token: String,
    /// Person or organization URN, e.g. `urn:li:person:abc123`.
    pub author_urn: String,
}

// Keeps the token out of logs.
impl std::fmt::Debug for LinkedInCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkedInCredentials")
            .field("access_token", &"<redacted>")
            .field("author_urn", &self.author_urn)
            .finish()
    }
}

impl LinkedInCredentials {
    pub fn new(access_token: impl Into<String>, author_urn: impl Into<String>) -> Result<Self> {
        let credentials = LinkedInCredentials {
            access_token: access_token.into(),
            author_urn: author_urn.into(),
        };
        if credentials.access_token.trim().is_empty() {
            return Err(CarouselError::InvalidInput(
                "LinkedIn access token cannot be empty".to_string(),
            ));
        }
        if !credentials.author_urn.starts_with("urn:li:") {
            return Err(CarouselError::InvalidInput(format!(
                "'{}' is not a LinkedIn URN",
                credentials.author_urn
            )));
        }
        Ok(credentials)
    }

    /// Reads `LINKEDIN_ACCESS_TOKEN` and `LINKEDIN_AUTHOR_URN`.
    pub fn from_env() -> Result<Self> {
        let access_token = env::var("LINKEDIN_ACCESS_TOKEN")?;
        let author_urn = env::var("LINKEDIN_AUTHOR_URN")?;
        LinkedInCredentials::new(access_token, author_urn)
    }
}
