use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("Invalid value for {key}: {value:?}")]
    InvalidVar { key: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum SearchError {
    /// The client was built without an API key or engine id.
    #[error("search credentials not configured: {0} is empty")]
    MissingCredentials(&'static str),

    /// Upstream answered 401/403.
    #[error("search API rejected the credentials ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("search API returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("search API did not answer within {0} seconds")]
    Timeout(u64),

    #[error("search API request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to parse search API response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl SearchError {
    /// Status code reported by the upstream API, when it got that far.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            SearchError::Unauthorized { status, .. } | SearchError::Upstream { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            SearchError::MissingCredentials(_) | SearchError::Unauthorized { .. }
        )
    }
}
