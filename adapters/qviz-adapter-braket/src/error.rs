//! Error types for the Braket adapter.

use qviz_hal::HalError;
use thiserror::Error;

/// Result type for Braket operations.
pub type BraketResult<T> = Result<T, BraketError>;

/// Errors that can occur when using AWS Braket.
#[derive(Debug, Error)]
pub enum BraketError {
    /// No S3 bucket configured for task results.
    #[error("S3 bucket not configured. Set braket.s3_bucket or QVIZ_BRAKET_S3_BUCKET.")]
    MissingS3Bucket,

    /// Malformed task or device ARN.
    #[error("Invalid ARN: {0}")]
    InvalidArn(String),

    /// Braket API error.
    #[error("Braket API error: {0}")]
    BraketApi(String),

    /// S3 error.
    #[error("S3 error: {0}")]
    S3(String),

    /// Task not found.
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// Task failed.
    #[error("Task failed: {0}")]
    TaskFailed(String),

    /// Device offline or retired.
    #[error("Device not available: {0}")]
    DeviceUnavailable(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Result document has none of the known measurement formats.
    #[error("Failed to parse task result: {0}")]
    ResultParse(String),
}

impl From<BraketError> for HalError {
    fn from(e: BraketError) -> Self {
        match e {
            BraketError::TaskNotFound(id) => HalError::JobNotFound(id),
            BraketError::TaskFailed(msg) => HalError::JobFailed(msg),
            BraketError::DeviceUnavailable(msg) => HalError::Unavailable(msg),
            _ => HalError::Backend(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_bucket_display() {
        let err = BraketError::MissingS3Bucket;
        assert!(err.to_string().contains("QVIZ_BRAKET_S3_BUCKET"));
    }

    #[test]
    fn test_task_not_found_to_hal() {
        let hal: HalError = BraketError::TaskNotFound("t1".into()).into();
        assert!(matches!(hal, HalError::JobNotFound(id) if id == "t1"));
    }

    #[test]
    fn test_task_failed_to_hal() {
        let hal: HalError = BraketError::TaskFailed("boom".into()).into();
        assert!(matches!(hal, HalError::JobFailed(msg) if msg == "boom"));
    }

    #[test]
    fn test_device_unavailable_to_hal() {
        let hal: HalError = BraketError::DeviceUnavailable("offline".into()).into();
        assert!(matches!(hal, HalError::Unavailable(_)));
    }

    #[test]
    fn test_api_errors_are_backend_errors() {
        let hal: HalError = BraketError::BraketApi("throttled".into()).into();
        assert!(matches!(hal, HalError::Backend(_)));
        assert!(!hal.is_validation());

        let hal: HalError = BraketError::S3("access denied".into()).into();
        assert!(matches!(hal, HalError::Backend(_)));
    }
}
