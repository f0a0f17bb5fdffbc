//! Fetches a fresh PACM API token through the portal UI.
//!
//! The flow is a strictly sequential, single-attempt run: log in through the
//! eRA Commons provider, open the token display page, split the token out of
//! the section text, and write it to the configured file. Any step failure
//! aborts the whole run; nothing is retried.
//!
//! - [`flow`]: the named step sequence and the portal's page contract
//! - [`portal`]: the [`TokenPortal`] seam and its fantoccini implementation
//! - [`extract`]: marker-based token extraction
//! - [`fetcher`]: the fetch → extract → persist pipeline
pub mod extract;
pub mod fetcher;
pub mod flow;
pub mod portal;

pub use fetcher::TokenFetcher;
pub use portal::{FantocciniPortal, TokenPortal};
