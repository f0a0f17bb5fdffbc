use std::time::Duration;

use anyhow::{Context, Result};
use fantoccini::{elements::Element, Client, Locator};
use tracing::debug;

use crate::portal_browser::pace::Pacing;

/// High-level page wrapper. Every lookup waits (bounded) for the element to
/// appear, and interactions run at the configured pace.
pub struct PortalPage {
    client: Client,
    pacing: Pacing,
    wait: Duration,
}

impl PortalPage {
    pub(crate) fn new(client: Client, pacing: Pacing, wait: Duration) -> Self {
        Self {
            client,
            pacing,
            wait,
        }
    }

    /// Navigate to `url`.
    pub async fn goto(&mut self, url: &str) -> Result<()> {
        self.pacing.action_delay().await;
        self.client
            .goto(url)
            .await
            .with_context(|| format!("navigation to {url} failed"))?;
        Ok(())
    }

    /// Switch the session context into the iframe matched by `selector`.
    pub async fn enter_frame(&mut self, selector: &str) -> Result<()> {
        let frame = self.find(Locator::Css(selector)).await?;
        frame
            .enter_frame()
            .await
            .with_context(|| format!("could not enter frame `{selector}`"))?;
        Ok(())
    }

    /// Return the session context to the parent browsing context.
    pub async fn leave_frame(&mut self) -> Result<()> {
        self.client
            .enter_parent_frame()
            .await
            .context("could not leave frame")?;
        Ok(())
    }

    /// Click the element matched by the CSS selector.
    pub async fn click(&mut self, selector: &str) -> Result<()> {
        let element = self.find(Locator::Css(selector)).await?;
        self.pacing.action_delay().await;
        element
            .click()
            .await
            .with_context(|| format!("click on `{selector}` failed"))?;
        debug!(target: "portal.page", selector, "clicked");
        Ok(())
    }

    /// Click the first link whose text equals `text`.
    pub async fn click_link(&mut self, text: &str) -> Result<()> {
        let element = self.find(Locator::LinkText(text)).await?;
        self.pacing.action_delay().await;
        element
            .click()
            .await
            .with_context(|| format!("click on link `{text}` failed"))?;
        debug!(target: "portal.page", link = text, "clicked");
        Ok(())
    }

    /// Clear the field matched by `selector`, then type `text` into it at
    /// the configured pace.
    pub async fn type_into(&mut self, selector: &str, text: &str) -> Result<()> {
        let element = self.find(Locator::Css(selector)).await?;
        element
            .clear()
            .await
            .with_context(|| format!("clear of `{selector}` failed"))?;
        self.pacing.type_text(&element, text).await?;
        Ok(())
    }

    /// Return the visible text of the element matched by `selector`.
    pub async fn text_of(&mut self, selector: &str) -> Result<String> {
        let element = self.find(Locator::Css(selector)).await?;
        let text = element.text().await?;
        debug!(target: "portal.page", selector, text_len = text.len(), "text read");
        Ok(text)
    }

    /// Return the current page URL.
    pub async fn current_url(&self) -> Result<String> {
        Ok(self.client.current_url().await?.to_string())
    }

    async fn find(&self, locator: Locator<'_>) -> Result<Element> {
        let element = self
            .client
            .wait()
            .at_most(self.wait)
            .for_element(locator)
            .await
            .with_context(|| format!("element {locator:?} did not appear"))?;
        Ok(element)
    }
}
