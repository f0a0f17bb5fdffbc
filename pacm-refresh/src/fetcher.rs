use std::path::PathBuf;

use pacm_common::{Credentials, RefreshError, Result};
use tracing::info;

use crate::extract::extract_token;
use crate::portal::TokenPortal;

/// Runs the single-attempt fetch: section text, extraction, then one
/// create-or-overwrite write of the token.
pub struct TokenFetcher<P> {
    portal: P,
    outfile: PathBuf,
}

impl<P: TokenPortal> TokenFetcher<P> {
    pub fn new(portal: P, outfile: impl Into<PathBuf>) -> Self {
        Self {
            portal,
            outfile: outfile.into(),
        }
    }

    /// Fetch, extract, and persist the token. Returns the token on success.
    ///
    /// Extraction runs before any write: on failure the output path is left
    /// exactly as it was.
    pub async fn run(&self, credentials: &Credentials) -> Result<String> {
        let content = self.portal.section_text(credentials).await?;
        let token = extract_token(&content)?;

        self.persist(&token).await?;
        info!(
            target: "refresh",
            outfile = %self.outfile.display(),
            token_len = token.len(),
            "token written"
        );
        Ok(token)
    }

    async fn persist(&self, token: &str) -> Result<()> {
        tokio::fs::write(&self.outfile, token)
            .await
            .map_err(|source| RefreshError::Outfile {
                path: self.outfile.clone(),
                source,
            })
    }
}
