//! Common types shared across the PACM refresher crates.
//!
//! This crate defines the run configuration, the shared error taxonomy, and
//! the tracing initialisation helper. It is intentionally lightweight so that
//! every other crate in the workspace can depend on it without pulling in the
//! browser stack.
//!
//! # Overview
//!
//! - [`RefreshConfig`]: fully validated run configuration
//! - [`Credentials`]: the transient login credential pair
//! - [`observability`]: centralised tracing/logging initialisation
//! - [`RefreshError`] and [`Result`]: shared error handling
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub mod observability;

/// Username/password pair read from the environment, used for exactly one
/// login and never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    // Keep the password out of logs and error chains.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// WebDriver endpoint and session behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebDriverConfig {
    /// URL of a running WebDriver service (Chromedriver by default).
    #[serde(default = "default_webdriver_url")]
    pub url: String,
    /// Run the browser without a visible window.
    #[serde(default = "default_headless")]
    pub headless: bool,
    /// Interaction speed factor in (0, 1]; 1.0 is full speed.
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Upper bound in seconds for any single element to appear.
    #[serde(default = "default_wait_secs")]
    pub wait_secs: u64,
}

fn default_webdriver_url() -> String {
    "http://localhost:9515".to_string()
}

fn default_headless() -> bool {
    true
}

fn default_speed() -> f64 {
    // The portal misbehaves under full-speed automation; half speed has
    // proven reliable.
    0.5
}

fn default_wait_secs() -> u64 {
    30
}

impl Default for WebDriverConfig {
    fn default() -> Self {
        Self {
            url: default_webdriver_url(),
            headless: default_headless(),
            speed: default_speed(),
            wait_secs: default_wait_secs(),
        }
    }
}

/// The remote page contract. Selectors are compiled in; only the entry URL is
/// configurable since mirrors of the portal exist for testing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    #[serde(default = "default_login_url")]
    pub login_url: String,
}

fn default_login_url() -> String {
    "https://www.ncbi.nlm.nih.gov/pmc/utils/pacm/login".to_string()
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            login_url: default_login_url(),
        }
    }
}

/// Fully validated configuration for one refresh run.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    pub credentials: Credentials,
    /// Where the extracted token is written (create-or-overwrite).
    pub outfile: PathBuf,
    pub portal: PortalConfig,
    pub webdriver: WebDriverConfig,
}

/// Error types used across the refresher. Every variant is fatal to the run;
/// nothing is retried or recovered locally.
#[derive(thiserror::Error, Debug)]
pub enum RefreshError {
    /// Configuration was incomplete or invalid, detected before any network
    /// interaction begins.
    #[error("configuration error: {0}")]
    Config(String),

    /// A navigation or interaction step failed, attributed to its name in
    /// the fixed step sequence.
    #[error("step `{step}` failed: {source}")]
    Step {
        step: &'static str,
        source: anyhow::Error,
    },

    /// The token marker was absent from the section text. Carries the full
    /// unparsed content to aid debugging.
    #[error("unable to find api-token in: {content}")]
    TokenNotFound { content: String },

    /// The single output write failed.
    #[error("failed to write token to {}: {source}", .path.display())]
    Outfile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenient alias for results that use [`RefreshError`].
pub type Result<T> = std::result::Result<T, RefreshError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_debug_redacts_password() {
        let creds = Credentials {
            user: "alice".to_string(),
            password: "hunter2".to_string(),
        };
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("alice"));
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn webdriver_defaults() {
        let cfg = WebDriverConfig::default();
        assert_eq!(cfg.url, "http://localhost:9515");
        assert!(cfg.headless);
        assert_eq!(cfg.speed, 0.5);
        assert_eq!(cfg.wait_secs, 30);
    }

    #[test]
    fn token_not_found_reports_offending_content() {
        let err = RefreshError::TokenNotFound {
            content: "no token here".to_string(),
        };
        assert_eq!(err.to_string(), "unable to find api-token in: no token here");
    }

    #[test]
    fn step_error_names_the_step() {
        let err = RefreshError::Step {
            step: "open-login",
            source: anyhow::anyhow!("connection refused"),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("open-login"));
        assert!(rendered.contains("connection refused"));
    }
}
