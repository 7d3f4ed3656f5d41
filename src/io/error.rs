//! Error types and context management for bouquet operations

use std::fmt;
use std::path::{Path, PathBuf};

/// A single rejected field in a request or selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Name of the offending field
    pub field: &'static str,
    /// Human readable reason the value was rejected
    pub message: String,
}

impl FieldIssue {
    /// Create a new field issue
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Main error type for all bouquet operations
#[derive(Debug)]
pub enum BouquetError {
    /// Malformed request or selection, reported back to the caller
    Validation {
        /// Every field that failed validation
        issues: Vec<FieldIssue>,
    },

    /// A collaborating service failed or is unavailable
    ExternalService {
        /// Name of the service
        service: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// Client exceeded the request budget for the current window
    RateLimited {
        /// Seconds until the oldest request leaves the window
        retry_after_secs: u64,
    },

    /// Drawing surface could not be created or used
    Render {
        /// Description of the failure
        reason: String,
    },

    /// Failed to load or decode an image
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to encode a rendered image
    ImageEncode {
        /// Target format name
        format: &'static str,
        /// Underlying image encoding error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },
}

impl fmt::Display for BouquetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { issues } => {
                let joined = issues
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                write!(f, "Validation failed: {joined}")
            }
            Self::ExternalService { service, reason } => {
                write!(f, "{service} unavailable: {reason}")
            }
            Self::RateLimited { retry_after_secs } => {
                write!(
                    f,
                    "Rate limit exceeded, try again in {retry_after_secs} seconds"
                )
            }
            Self::Render { reason } => write!(f, "Render failed: {reason}"),
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageEncode { format, source } => {
                write!(f, "Failed to encode {format} image: {source}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for BouquetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageEncode { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl BouquetError {
    /// Whether the failure is the caller's fault rather than the system's
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::RateLimited { .. } | Self::InvalidParameter { .. }
        )
    }
}

/// Convenience type alias for bouquet results
pub type Result<T> = std::result::Result<T, BouquetError>;

/// Placeholder recorded when an error is converted without a known path
const UNKNOWN_PATH: &str = "<unknown>";

/// Enriches error messages with the path and operation involved
pub trait WithContext<T> {
    /// Attach a path to file system and image load errors that lack one
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;

    /// Attach the operation name to file system errors
    ///
    /// # Errors
    ///
    /// Propagates the original error with the operation applied
    fn with_operation(self, operation: &'static str) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<BouquetError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            match &mut error {
                BouquetError::FileSystem { path: slot, .. }
                | BouquetError::ImageLoad { path: slot, .. }
                    if slot.as_os_str() == UNKNOWN_PATH =>
                {
                    *slot = path.to_path_buf();
                }
                _ => {}
            }
            error
        })
    }

    fn with_operation(self, operation: &'static str) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            if let BouquetError::FileSystem { operation: slot, .. } = &mut error {
                *slot = operation;
            }
            error
        })
    }
}

impl From<image::ImageError> for BouquetError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from(UNKNOWN_PATH),
            source: err,
        }
    }
}

impl From<std::io::Error> for BouquetError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from(UNKNOWN_PATH),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create a validation error for a single field
pub fn validation_error(field: &'static str, message: impl Into<String>) -> BouquetError {
    BouquetError::Validation {
        issues: vec![FieldIssue::new(field, message)],
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> BouquetError {
    BouquetError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an external service error
pub fn service_error(service: &'static str, reason: &impl ToString) -> BouquetError {
    BouquetError::ExternalService {
        service,
        reason: reason.to_string(),
    }
}

/// Create a render error
pub fn render_error(reason: &impl ToString) -> BouquetError {
    BouquetError::Render {
        reason: reason.to_string(),
    }
}
