use async_trait::async_trait;
use pacm_common::{Credentials, RefreshError, Result};
use pacm_refresh::{TokenFetcher, TokenPortal};
use tempfile::TempDir;

/// Portal double serving canned section text, or failing the way a broken
/// navigation step would.
struct StubPortal {
    outcome: std::result::Result<String, &'static str>,
}

impl StubPortal {
    fn with_text(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_string()),
        }
    }

    fn failing_at(step: &'static str) -> Self {
        Self { outcome: Err(step) }
    }
}

#[async_trait]
impl TokenPortal for StubPortal {
    async fn section_text(&self, _credentials: &Credentials) -> Result<String> {
        match &self.outcome {
            Ok(text) => Ok(text.clone()),
            Err(step) => Err(RefreshError::Step {
                step: *step,
                source: anyhow::anyhow!("element did not appear"),
            }),
        }
    }
}

fn credentials() -> Credentials {
    Credentials {
        user: "alice".to_string(),
        password: "s3cret".to_string(),
    }
}

#[tokio::test]
async fn writes_the_extracted_token_to_the_outfile() {
    let tmp = TempDir::new().unwrap();
    let outfile = tmp.path().join("token");

    let portal = StubPortal::with_text("session info&api-token=abc123");
    let fetcher = TokenFetcher::new(portal, &outfile);

    let token = fetcher.run(&credentials()).await.unwrap();
    assert_eq!(token, "abc123");
    assert_eq!(std::fs::read_to_string(&outfile).unwrap(), "abc123");
}

#[tokio::test]
async fn missing_marker_fails_without_creating_the_outfile() {
    let tmp = TempDir::new().unwrap();
    let outfile = tmp.path().join("token");

    let portal = StubPortal::with_text("no token here");
    let fetcher = TokenFetcher::new(portal, &outfile);

    let err = fetcher.run(&credentials()).await.unwrap_err();
    assert!(matches!(err, RefreshError::TokenNotFound { .. }));
    assert!(err.to_string().contains("no token here"));
    assert!(!outfile.exists());
}

#[tokio::test]
async fn successful_run_fully_overwrites_a_stale_token() {
    let tmp = TempDir::new().unwrap();
    let outfile = tmp.path().join("token");
    std::fs::write(&outfile, "oldtoken").unwrap();

    let portal = StubPortal::with_text("x&api-token=new");
    let fetcher = TokenFetcher::new(portal, &outfile);

    fetcher.run(&credentials()).await.unwrap();
    assert_eq!(std::fs::read_to_string(&outfile).unwrap(), "new");
}

#[tokio::test]
async fn step_failure_leaves_an_existing_outfile_untouched() {
    let tmp = TempDir::new().unwrap();
    let outfile = tmp.path().join("token");
    std::fs::write(&outfile, "oldtoken").unwrap();

    let portal = StubPortal::failing_at("open-login");
    let fetcher = TokenFetcher::new(portal, &outfile);

    let err = fetcher.run(&credentials()).await.unwrap_err();
    assert!(err.to_string().contains("open-login"));
    assert_eq!(std::fs::read_to_string(&outfile).unwrap(), "oldtoken");
}
