//! Error taxonomy shared by every normalizer.
//!
//! All failures are local validation failures: they are surfaced
//! synchronously and never retried.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Category of a [`NormalizeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// None of the accepted input shapes were supplied.
    MissingArgument,
    /// Mutually exclusive input shapes were supplied together.
    AmbiguousArgument,
    /// Parallel lists have lengths that cannot be broadcast.
    CardinalityConflict,
    /// A present value has the wrong structure or element type.
    MalformedArgument,
    /// A well-formed value lies outside the enumerated allowed set.
    UnsupportedValue,
    /// An option flag such as `order` or `unique` is invalid.
    InvalidOption,
}

/// Errors raised while reducing raw call arguments to a canonical value.
///
/// Each variant carries a human-readable description of the triggering
/// condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// None of the accepted input shapes were supplied.
    #[error("missing argument: {0}")]
    MissingArgument(String),
    /// Mutually exclusive input shapes were supplied together.
    #[error("ambiguous arguments: {0}")]
    AmbiguousArgument(String),
    /// Parallel lists have lengths that cannot be broadcast.
    #[error("cardinality conflict: {0}")]
    CardinalityConflict(String),
    /// A present value has the wrong structure or element type.
    #[error("malformed argument: {0}")]
    MalformedArgument(String),
    /// A well-formed value lies outside the enumerated allowed set.
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),
    /// An option flag such as `order` or `unique` is invalid.
    #[error("invalid option: {0}")]
    InvalidOption(String),
}

impl NormalizeError {
    /// Return the category of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use geoargs_core::{ErrorKind, NormalizeError};
    ///
    /// let err = NormalizeError::UnsupportedValue("projection NAD27".to_owned());
    /// assert_eq!(err.kind(), ErrorKind::UnsupportedValue);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingArgument(_) => ErrorKind::MissingArgument,
            Self::AmbiguousArgument(_) => ErrorKind::AmbiguousArgument,
            Self::CardinalityConflict(_) => ErrorKind::CardinalityConflict,
            Self::MalformedArgument(_) => ErrorKind::MalformedArgument,
            Self::UnsupportedValue(_) => ErrorKind::UnsupportedValue,
            Self::InvalidOption(_) => ErrorKind::InvalidOption,
        }
    }

    pub(crate) fn missing(detail: impl Into<String>) -> Self {
        Self::MissingArgument(detail.into())
    }

    pub(crate) fn ambiguous(detail: impl Into<String>) -> Self {
        Self::AmbiguousArgument(detail.into())
    }

    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedArgument(detail.into())
    }
}

/// Errors raised while loading or validating an
/// [`EngineConfig`](crate::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration payload is not valid JSON for the expected schema.
    #[error("failed to parse engine configuration")]
    Parse(#[source] serde_json::Error),
    /// Reading the configuration file failed.
    #[error("failed to read engine configuration at {path}")]
    Read {
        /// Requested configuration path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The configuration parsed but violates an engine invariant.
    #[error("invalid engine configuration: {0}")]
    Invalid(String),
}
