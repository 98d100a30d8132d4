use thiserror::Error;

/// Failure classes the tool distinguishes, one variant per way a user
/// action can go wrong.
#[derive(Error, Debug)]
pub enum DomainError {
    /// A question was asked before any processing run saved an index.
    #[error("no index found; please process URLs first")]
    IndexNotBuilt,

    /// One URL failed to fetch or parse. Processing skips it and
    /// continues with the remaining URLs.
    #[error("failed to load {url}: {reason}")]
    UrlLoad { url: String, reason: String },

    /// The embedding or generation model failed.
    #[error("model error: {0}")]
    Model(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn url_load(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UrlLoad {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn model(msg: impl Into<String>) -> Self {
        Self::Model(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
