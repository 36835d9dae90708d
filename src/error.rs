//! Unified error type for all deploy-configuration operations.

/// Things that can go wrong when reading or writing deploy configuration.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Caller-supplied arguments were missing or malformed. Raised before
    /// any I/O happens.
    Validation(String),
    /// The per-site key lookup failed, or a configuration read failed at
    /// the store.
    SiteNotFound(String),
    /// No deploy list stored where one was expected.
    NoConfiguration(String),
    /// Removing a bucket did not remove exactly one entry.
    RemovalFailed(String),
    /// The underlying store rejected a read or write (connectivity,
    /// permission — causes are not distinguished).
    Store(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Validation(msg) => write!(f, "validation error: {msg}"),
            Error::SiteNotFound(msg) => write!(f, "site not found: {msg}"),
            Error::NoConfiguration(msg) => write!(f, "no configuration: {msg}"),
            Error::RemovalFailed(msg) => write!(f, "removal failed: {msg}"),
            Error::Store(msg) => write!(f, "store error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Store(err.to_string())
    }
}

/// Result alias using our [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
