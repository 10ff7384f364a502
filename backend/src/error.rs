//! Error types for the gallery toolkit.
//!
//! - [`ManifestError`] - Loading a manifest file from disk
//! - [`BuildError`] - Building `images.csv` from the source listing
//! - [`SiteError`] - Site extras (last-modified date file)
//! - [`ServerError`] - HTTP layer, wraps the others
//!
//! Parsing manifest text never fails: malformed rows are skipped and
//! reported, so there is no parse error type here.
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Manifest Loading Errors
// =============================================================================

/// Errors while reading a manifest file.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Failed to read file.
    #[error("Failed to read manifest: {0}")]
    Io(#[from] std::io::Error),

    /// Content could not be decoded to text.
    #[error("Failed to decode manifest: {0}")]
    Encoding(String),
}

// =============================================================================
// Manifest Builder Errors
// =============================================================================

/// Errors from the manifest builder.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Source listing does not exist.
    #[error("Source listing not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// IO error.
    #[error("Builder IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error.
    #[error("Builder CSV error: {0}")]
    Csv(#[from] csv::Error),
}

// =============================================================================
// Site Errors
// =============================================================================

/// Errors from the site extras.
#[derive(Debug, Error)]
pub enum SiteError {
    /// Requested file does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// IO error.
    #[error("Site IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Manifest could not be loaded.
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Site file error.
    #[error("Site error: {0}")]
    Site(#[from] SiteError),

    /// Listener or socket error.
    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    /// Whether this error means the requested resource is absent.
    pub fn is_not_found(&self) -> bool {
        match self {
            ServerError::Site(SiteError::NotFound(_)) => true,
            ServerError::Manifest(ManifestError::Io(e)) | ServerError::Site(SiteError::Io(e)) => {
                e.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for manifest loading.
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Result type for the manifest builder.
pub type BuildResult<T> = Result<T, BuildError>;

/// Result type for site extras.
pub type SiteResult<T> = Result<T, SiteError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // SiteError -> ServerError
        let site_err = SiteError::NotFound(PathBuf::from("art/lastmodified.txt"));
        let server_err: ServerError = site_err.into();
        assert!(server_err.to_string().contains("lastmodified.txt"));
        assert!(server_err.is_not_found());

        // io::Error -> ManifestError -> ServerError
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let server_err: ServerError = ManifestError::from(io).into();
        assert!(server_err.is_not_found());
    }

    #[test]
    fn test_permission_error_is_not_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let server_err: ServerError = ManifestError::from(io).into();
        assert!(!server_err.is_not_found());
        assert!(server_err.to_string().contains("denied"));
    }

    #[test]
    fn test_missing_input_format() {
        let err = BuildError::MissingInput(PathBuf::from("art/images.txt"));
        assert_eq!(err.to_string(), "Source listing not found: art/images.txt");
    }
}
