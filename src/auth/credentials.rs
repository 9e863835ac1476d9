//! Basic-auth credentials
//!
//! These types hold the user identity and API token after configuration
//! has been resolved.

use reqwest::RequestBuilder;
use std::fmt;

/// A secret string that redacts itself in `Debug` and `Display`
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the clear-text value
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({})", mask_secret(&self.0))
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&mask_secret(&self.0))
    }
}

/// Mask a sensitive value for logging.
///
/// Short values are fully starred; longer ones keep two characters on each
/// end so operators can still tell tokens apart.
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..2].iter().collect();
        let tail: String = chars[chars.len() - 2..].iter().collect();
        format!("{head}...{tail}")
    }
}

/// HTTP Basic credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// User identity (usually an e-mail address)
    pub user: String,
    /// API token
    pub token: Secret,
}

impl Credentials {
    pub fn new(user: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            token: Secret::new(token),
        }
    }

    /// Apply basic authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        req.basic_auth(&self.user, Some(self.token.expose()))
    }
}
