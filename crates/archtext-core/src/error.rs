//! Error types for archive scanning and text extraction.
//!
//! Only failures that prevent the archive from being indexed at all, or that
//! happen outside the per-member loop, are errors. Problems with a single
//! member are recorded as [`SkipReason`](crate::SkipReason) values and never
//! abort an extraction.

use thiserror::Error;

/// Result type alias using `ExtractionError`.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Represents a specific archive-level limit that was exceeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotaResource {
    /// The inflated size of a compressed TAR stream exceeded its bound.
    InflatedSize {
        /// Maximum allowed inflated size in bytes.
        max: u64,
    },
    /// Integer overflow detected while tracking sizes.
    IntegerOverflow,
}

impl std::fmt::Display for QuotaResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InflatedSize { max } => {
                write!(f, "quota exceeded: inflated archive size (> {max} bytes)")
            }
            Self::IntegerOverflow => {
                write!(f, "quota exceeded: integer overflow in size tracking")
            }
        }
    }
}

/// Errors that can occur while opening, scanning or rendering an archive.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive format is unsupported or unrecognized.
    #[error("unsupported archive format")]
    UnsupportedFormat,

    /// Archive is corrupted or cannot be indexed.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// An archive-level limit was exceeded while indexing.
    #[error("{resource}")]
    QuotaExceeded {
        /// Description of the exceeded resource.
        resource: QuotaResource,
    },

    /// Extraction configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Why the configuration was rejected.
        reason: String,
    },

    /// A document template failed to render.
    #[error("template rendering failed: {0}")]
    Template(String),

    /// An offloaded extraction task panicked or was cancelled.
    #[error("extraction task failed: {0}")]
    TaskFailed(String),
}

impl ExtractionError {
    /// Returns `true` if this error means the archive itself could not be
    /// opened or indexed.
    ///
    /// Structural failures are surfaced before any member is visited, so no
    /// partial result exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use archtext_core::ExtractionError;
    ///
    /// let err = ExtractionError::InvalidArchive("truncated central directory".into());
    /// assert!(err.is_structural());
    ///
    /// let err = ExtractionError::Template("missing field".into());
    /// assert!(!err.is_structural());
    /// ```
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat | Self::InvalidArchive(_) | Self::QuotaExceeded { .. }
        )
    }

    /// Returns a context string for this error, if available.
    ///
    /// # Examples
    ///
    /// ```
    /// use archtext_core::ExtractionError;
    ///
    /// let err = ExtractionError::InvalidArchive("bad header".to_string());
    /// assert_eq!(err.context(), Some("bad header"));
    ///
    /// let err = ExtractionError::UnsupportedFormat;
    /// assert_eq!(err.context(), None);
    /// ```
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::InvalidArchive(msg) | Self::Template(msg) | Self::TaskFailed(msg) => Some(msg),
            Self::InvalidConfig { reason } => Some(reason),
            _ => None,
        }
    }

    /// Returns the quota resource that was exceeded, if applicable.
    #[must_use]
    pub const fn quota_resource(&self) -> Option<&QuotaResource> {
        match self {
            Self::QuotaExceeded { resource } => Some(resource),
            _ => None,
        }
    }
}
