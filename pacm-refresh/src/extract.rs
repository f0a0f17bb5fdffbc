//! Token extraction from the portal's rendered section text.

use pacm_common::{RefreshError, Result};

/// Literal delimiter that precedes the API token in the section text.
pub const TOKEN_MARKER: &str = "&api-token=";

/// Pull the token out of `content`.
///
/// The token is the segment immediately following the first occurrence of
/// [`TOKEN_MARKER`], returned unmodified. When the marker never occurs the
/// extraction fails and carries the full content for debugging.
///
/// ```
/// use pacm_refresh::extract::extract_token;
///
/// let token = extract_token("session info&api-token=abc123").unwrap();
/// assert_eq!(token, "abc123");
/// ```
pub fn extract_token(content: &str) -> Result<String> {
    let mut parts = content.split(TOKEN_MARKER);
    parts.next();
    match parts.next() {
        Some(token) => Ok(token.to_string()),
        None => Err(RefreshError::TokenNotFound {
            content: content.to_string(),
        }),
    }
}
