use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use fantoccini::{Client, ClientBuilder};
use pacm_common::WebDriverConfig;
use serde_json::json;
use tracing::debug;
use webdriver::capabilities::Capabilities;

use crate::portal_browser::{pace::Pacing, page::PortalPage};

/// Thin wrapper around a `fantoccini` WebDriver client for one browser
/// session.
pub struct PortalDriver {
    client: Client,
    pacing: Pacing,
    wait: Duration,
}

/// Capabilities for a Chromium- or Gecko-backed WebDriver service. Both
/// vendor sections are populated so the same configuration works against
/// chromedriver and geckodriver alike.
fn session_capabilities(cfg: &WebDriverConfig) -> Capabilities {
    let mut caps = Capabilities::new();

    let mut chrome_args = vec![
        "--no-sandbox".to_string(),
        "--disable-dev-shm-usage".to_string(),
    ];
    let mut firefox_args: Vec<String> = Vec::new();
    if cfg.headless {
        chrome_args.push("--headless".to_string());
        chrome_args.push("--disable-gpu".to_string());
        firefox_args.push("-headless".to_string());
    }

    let mut chrome_opts = HashMap::new();
    chrome_opts.insert("args".to_string(), json!(chrome_args));
    caps.insert("goog:chromeOptions".to_string(), json!(chrome_opts));
    caps.insert(
        "moz:firefoxOptions".to_string(),
        json!({ "args": firefox_args }),
    );

    caps
}

impl PortalDriver {
    /// Connect a new session to the configured WebDriver service.
    pub async fn connect(cfg: &WebDriverConfig) -> Result<Self> {
        let caps = session_capabilities(cfg);

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(&cfg.url)
            .await
            .with_context(|| format!("failed to connect to WebDriver at {}", cfg.url))?;

        debug!(
            target: "portal.driver",
            url = %cfg.url,
            headless = cfg.headless,
            "browser session started"
        );

        Ok(Self {
            client,
            pacing: Pacing::new(cfg.speed),
            wait: Duration::from_secs(cfg.wait_secs),
        })
    }

    /// Hand out a page wrapper bound to this session.
    pub fn page(&self) -> PortalPage {
        PortalPage::new(self.client.clone(), self.pacing.clone(), self.wait)
    }

    /// Close the underlying browser session.
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}
