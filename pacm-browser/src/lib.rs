//! Browser session layer for the PACM refresher.
//!
//! Thin wrappers over a `fantoccini` WebDriver client:
//!
//! - [`portal_browser::driver::PortalDriver`]: session setup and teardown
//! - [`portal_browser::page::PortalPage`]: navigation, frames, typed helpers
//! - [`portal_browser::pace::Pacing`]: human-speed interaction delays
pub mod portal_browser;
