//! Error handling for the git-transfer crate.
use std::{error::Error as StdError, fmt};

use crate::platform::PlatformType;

/// Error type for the git-transfer crate.
#[derive(Debug)]
pub struct TransferError {
    /// Inner error.
    inner: Box<Inner>,
}

impl TransferError {
    /// Create a new error.
    pub(crate) fn new(kind: TransferErrorKind) -> Self {
        Self {
            inner: Box::new(Inner {
                kind,
                source: None,
                platform: None,
            }),
        }
    }

    /// Create a new error of kind `Other` wrapping a source error.
    pub(crate) fn new_with_source<E>(text: &str, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::new(TransferErrorKind::Other(text.to_string())).with_source(source)
    }

    /// Attach a textual source to the error.
    pub(crate) fn with_text(self, text: &str) -> Self {
        self.with_source(std::io::Error::other(text.to_string()))
    }

    /// Attach a source error.
    pub(crate) fn with_source<E>(mut self, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        self.inner.source = Some(source.into());
        self
    }

    /// Attach the platform the error comes from.
    pub(crate) fn with_platform(mut self, platform: PlatformType) -> Self {
        self.inner.platform = Some(platform);
        self
    }

    /// Kind of the error.
    pub fn kind(&self) -> &TransferErrorKind {
        &self.inner.kind
    }

    /// Platform the error comes from, if any.
    pub fn platform(&self) -> Option<&PlatformType> {
        self.inner.platform.as_ref()
    }

    /// Whether the error was caused by rejected credentials.
    pub fn is_authentication(&self) -> bool {
        matches!(self.inner.kind, TransferErrorKind::Authentication)
    }

    /// Whether the error was caused by an unreachable host.
    pub fn is_connection(&self) -> bool {
        match &self.inner.kind {
            TransferErrorKind::Connection => true,
            TransferErrorKind::Reqwest => self
                .inner
                .source
                .as_ref()
                .and_then(|e| e.downcast_ref::<reqwest::Error>())
                .is_some_and(|e| e.is_connect() || e.is_timeout()),
            _ => false,
        }
    }
}

/// Type alias for a boxed error.
pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;

/// Inner error type for the git-transfer crate.
#[derive(Debug)]
struct Inner {
    /// Error kind.
    kind: TransferErrorKind,

    /// Platform error
    platform: Option<PlatformType>,

    /// Source error.
    source: Option<BoxError>,
}

/// Kind of [`TransferError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferErrorKind {
    /// Free-form error.
    Other(String),

    /// Credential file missing or unreadable.
    Credentials,

    /// Invalid configuration (bad url, bad toml...).
    Config,

    /// The platform could not be reached.
    Connection,

    /// The platform rejected the token.
    Authentication,

    /// Error related to the reqwest crate.
    Reqwest,

    /// Error related to serde.
    Serde,

    /// Error related to io.
    Io,

    /// Error related to Git2.
    Git2,

    /// A git subprocess exited unsuccessfully.
    GitCommand,

    /// Error related to the GetUser func.
    GetUser,

    /// Error related to the project listing.
    GetAllRepos,

    /// Error related to the repository creation.
    RepoCreation,
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.kind {
            TransferErrorKind::Other(text) => write!(f, "{text}")?,
            kind => write!(f, "{kind:?}")?,
        }
        if let Some(platform) = &self.inner.platform {
            write!(f, " ({platform})")?;
        }
        if let Some(source) = &self.inner.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

impl StdError for TransferError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source.as_ref().map(|e| &**e as _)
    }
}

impl From<&str> for TransferError {
    fn from(text: &str) -> Self {
        Self::new(TransferErrorKind::Other(text.to_string()))
    }
}

impl From<String> for TransferError {
    fn from(text: String) -> Self {
        Self::new(TransferErrorKind::Other(text))
    }
}

impl From<reqwest::Error> for TransferError {
    fn from(e: reqwest::Error) -> Self {
        let kind = if e.is_connect() {
            TransferErrorKind::Connection
        } else {
            TransferErrorKind::Reqwest
        };
        Self::new(kind).with_source(e)
    }
}

impl From<serde_json::Error> for TransferError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(TransferErrorKind::Serde).with_source(e)
    }
}

impl From<std::io::Error> for TransferError {
    fn from(e: std::io::Error) -> Self {
        Self::new(TransferErrorKind::Io).with_source(e)
    }
}

impl From<git2::Error> for TransferError {
    fn from(e: git2::Error) -> Self {
        Self::new(TransferErrorKind::Git2).with_source(e)
    }
}

impl From<url::ParseError> for TransferError {
    fn from(e: url::ParseError) -> Self {
        Self::new(TransferErrorKind::Config).with_source(e)
    }
}

impl From<toml::de::Error> for TransferError {
    fn from(e: toml::de::Error) -> Self {
        Self::new(TransferErrorKind::Config).with_source(e)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_includes_platform_and_source() {
        let err = TransferError::new(TransferErrorKind::RepoCreation)
            .with_platform(PlatformType::Github)
            .with_text("name already exists on this account");
        assert_eq!(
            err.to_string(),
            "RepoCreation (github): name already exists on this account"
        );
    }

    #[test]
    fn string_errors_display_verbatim() {
        let err: TransferError = "Connection failed. Check GitLab url".into();
        assert_eq!(err.to_string(), "Connection failed. Check GitLab url");
        assert!(!err.is_authentication());
    }

    #[test]
    fn connection_kind_is_connection() {
        let err = TransferError::new(TransferErrorKind::Connection);
        assert!(err.is_connection());
        assert!(!TransferError::new(TransferErrorKind::Serde).is_connection());
    }
}
