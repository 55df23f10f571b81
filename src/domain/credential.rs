use std::fmt;

/// Value a fresh configuration carries until the user sets a real key.
pub const PLACEHOLDER_API_KEY: &str = "api_REPLACE_ME";

const PLACEHOLDER_PREFIX: &str = "api_REPLACE";

/// A validated API key. Debug output never shows the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for an empty key or one still carrying the placeholder prefix.
    pub fn validate(raw: &str) -> Option<Self> {
        if raw.is_empty() || raw.starts_with(PLACEHOLDER_PREFIX) {
            None
        } else {
            Some(Self(raw.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}
