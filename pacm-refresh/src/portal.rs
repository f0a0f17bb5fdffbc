//! The seam between browser navigation and the fetch pipeline.

use std::future::Future;

use async_trait::async_trait;
use pacm_browser::portal_browser::{driver::PortalDriver, page::PortalPage};
use pacm_common::{Credentials, PortalConfig, RefreshError, Result, WebDriverConfig};
use tracing::{info, warn};

use crate::flow::{self, Step};

/// Source of the token section's rendered text.
///
/// The production implementation drives a browser; tests substitute a stub
/// so the fetch pipeline can run without one.
#[async_trait]
pub trait TokenPortal: Send + Sync {
    async fn section_text(&self, credentials: &Credentials) -> Result<String>;
}

/// Drives one real browser session through the fixed step sequence.
pub struct FantocciniPortal {
    portal: PortalConfig,
    webdriver: WebDriverConfig,
}

impl FantocciniPortal {
    pub fn new(portal: PortalConfig, webdriver: WebDriverConfig) -> Self {
        Self { portal, webdriver }
    }

    async fn step<T>(
        &self,
        step: Step,
        action: impl Future<Output = anyhow::Result<T>>,
    ) -> Result<T> {
        info!(target: "portal.step", %step, "running");
        action.await.map_err(|source| RefreshError::Step {
            step: step.name(),
            source,
        })
    }

    async fn drive(&self, page: &mut PortalPage, credentials: &Credentials) -> Result<String> {
        self.step(Step::OpenLogin, page.goto(&self.portal.login_url))
            .await?;
        self.step(Step::EnterLoginFrame, page.enter_frame(flow::LOGIN_FRAME))
            .await?;
        self.step(Step::ChooseEraLogin, page.click(flow::ERA_LOGIN_OPTION))
            .await?;
        self.step(Step::LeaveLoginFrame, page.leave_frame()).await?;
        self.step(
            Step::FillUsername,
            page.type_into(flow::USERNAME_FIELD, &credentials.user),
        )
        .await?;
        self.step(
            Step::FillPassword,
            page.type_into(flow::PASSWORD_FIELD, &credentials.password),
        )
        .await?;
        self.step(Step::SubmitLogin, page.click(flow::LOGIN_SUBMIT))
            .await?;
        self.step(Step::OpenTokenPage, page.click_link(flow::TOKEN_LINK_TEXT))
            .await?;
        self.step(Step::ReadTokenSection, page.text_of(flow::TOKEN_SECTION))
            .await
    }
}

#[async_trait]
impl TokenPortal for FantocciniPortal {
    async fn section_text(&self, credentials: &Credentials) -> Result<String> {
        let driver = self
            .step(Step::Connect, PortalDriver::connect(&self.webdriver))
            .await?;
        let mut page = driver.page();

        let result = self.drive(&mut page, credentials).await;

        // One session, always torn down before the outcome surfaces.
        if let Err(e) = driver.close().await {
            warn!(target: "portal.driver", error = %e, "failed to close browser session");
        }

        result
    }
}
