/// Error types for Domain Bridge

use thiserror::Error;

/// Reasons a user-submitted mapping is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("source domain is required")]
    EmptySource,
    #[error("at least one target domain is required")]
    NoTargets,
    #[error("'{0}' is not a valid hostname")]
    InvalidHostname(String),
    #[error("target '{0}' is the same as the source domain")]
    TargetIsSource(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("storage failure: {0}")]
    Storage(String),
    #[error("failed to create menu entry {id}: {reason}")]
    MenuCreation { id: String, reason: String },
    #[error("malformed url '{url}': {reason}")]
    MalformedUrl { url: String, reason: String },
    #[error("invalid mapping: {0}")]
    Validation(#[from] ValidationError),
    #[error("serialization failed: {0}")]
    Serialization(String),
    #[error("unrecognized menu id '{0}'")]
    UnknownMenuId(String),
    #[error("failed to open tab: {0}")]
    OpenTab(String),
    #[error("clicked tab has no url")]
    MissingTabUrl,
    #[error("host of '{url}' does not match {source_domain}")]
    HostMismatch { url: String, source_domain: String },
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
