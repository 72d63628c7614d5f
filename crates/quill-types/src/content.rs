//! Post content rules shared by the client and its callers.

use thiserror::Error;

/// Maximum length of a post body in Unicode code points, after trimming.
pub const MAX_POST_CONTENT_CHARS: usize = 280;

/// Why a post body was rejected before reaching the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("post content is empty after trimming")]
    Empty,
    #[error("post content is {0} characters, maximum is 280")]
    TooLong(usize),
}

/// Trims `raw` and enforces the [1, `MAX_POST_CONTENT_CHARS`] length rule.
///
/// Length is measured in code points, not bytes, so multi-byte content is
/// not penalized. Returns the trimmed body that should go on the wire.
pub fn normalize_post_content(raw: &str) -> Result<String, ContentError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ContentError::Empty);
    }
    let chars = trimmed.chars().count();
    if chars > MAX_POST_CONTENT_CHARS {
        return Err(ContentError::TooLong(chars));
    }
    Ok(trimmed.to_string())
}
