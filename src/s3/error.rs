use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while publishing an artifact
#[derive(Error, Debug)]
pub enum PublishError {
    /// Neither the MIME table nor the suffix overrides know this path
    #[error("Unable to discover valid mime-type for path ({path})")]
    MimeType { path: String },

    /// The PUT completed but the server did not answer 200 or 204
    #[error("Upload failed: bad status {status}")]
    BadStatus { status: StatusCode, body: String },

    /// The selected bucket identifier is not in the bucket configuration
    #[error("Unknown bucket '{bucket}' in bucket configuration")]
    UnknownBucket { bucket: String },

    /// The bucket configuration has no bucket for the requested purpose
    #[error("Bucket '{bucket}' has no '{purpose}' bucket configured")]
    MissingPurpose { bucket: String, purpose: String },

    /// Building the pre-signed URL failed
    #[error("Failed to presign upload: {0}")]
    Presign(String),

    /// A resolved MIME type that cannot travel in a header
    #[error("Invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    /// Local file access
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Transport-level HTTP failure
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl PublishError {
    /// Wrap any AWS SDK error raised while presigning
    pub fn from_aws_error<E: std::fmt::Display>(error: E) -> Self {
        Self::Presign(error.to_string())
    }

    /// Status reported by the server, if the request got that far
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::BadStatus { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::MimeType { path } => {
                format!(
                    "No MIME type for {}\n\nPossible solutions:\n  \
                     1. Add the extension to MIME_MAP\n  \
                     2. Add a suffix override for it",
                    path
                )
            }
            Self::BadStatus { status, body } if *status == StatusCode::FORBIDDEN => {
                format!(
                    "Upload rejected ({}): {}\n\nPossible solutions:\n  \
                     1. Check the bucket credentials in the configuration\n  \
                     2. Verify the pre-signed URL has not expired\n  \
                     3. Ensure the credentials may write to the bucket",
                    status, body
                )
            }
            Self::UnknownBucket { bucket } => {
                format!(
                    "Unknown bucket '{}'\n\nPossible solutions:\n  \
                     1. Check TELEMETRY_BUCKET\n  \
                     2. Add '{}' under bucket_config",
                    bucket, bucket
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type for publish operations
pub type Result<T> = std::result::Result<T, PublishError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_status_reports_status() {
        let err = PublishError::BadStatus {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "oops".to_string(),
        };
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_user_message() {
        let err = PublishError::BadStatus {
            status: StatusCode::FORBIDDEN,
            body: "AccessDenied".to_string(),
        };
        let msg = err.user_message();
        assert!(msg.contains("403"));
        assert!(msg.contains("AccessDenied"));
        assert!(msg.contains("credentials"));

        let err = PublishError::UnknownBucket {
            bucket: "nightly".to_string(),
        };
        assert!(err.user_message().contains("TELEMETRY_BUCKET"));

        let err = PublishError::MissingPurpose {
            bucket: "nightly".to_string(),
            purpose: "telemetry".to_string(),
        };
        assert_eq!(err.user_message(), err.to_string());
    }

    #[test]
    fn test_from_aws_error() {
        let err = PublishError::from_aws_error("expiry too long");
        assert!(matches!(err, PublishError::Presign(ref m) if m == "expiry too long"));
        assert_eq!(err.status(), None);
    }
}
