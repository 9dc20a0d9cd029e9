use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArboristError {
    #[error("Not a git repository: {message}")]
    NotARepository { message: String },

    #[error("Failed to read branch inventory: {message}")]
    Inventory { message: String },

    #[error("Git operation failed: {message}")]
    GitOperation { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid arguments: {message}")]
    InvalidArgs { message: String },

    #[error("{count} branch deletion(s) failed")]
    DeletionFailures { count: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ArboristError>;

impl ArboristError {
    pub fn not_a_repository(message: impl Into<String>) -> Self {
        Self::NotARepository {
            message: message.into(),
        }
    }

    pub fn inventory(message: impl Into<String>) -> Self {
        Self::Inventory {
            message: message.into(),
        }
    }

    pub fn git_operation(message: impl Into<String>) -> Self {
        Self::GitOperation {
            message: message.into(),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs {
            message: message.into(),
        }
    }

    pub fn deletion_failures(count: usize) -> Self {
        Self::DeletionFailures { count }
    }

    /// Fatal errors abort a run before anything is deleted.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::NotARepository { .. } | Self::Inventory { .. } | Self::GitOperation { .. }
        )
    }

    /// The line printed before exiting with a failure status.
    pub fn user_message(&self) -> String {
        if self.is_fatal() {
            format!("{}\nNo branches were deleted.", self)
        } else {
            self.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation_helpers() {
        let git_err = ArboristError::git_operation("failed to delete");
        assert!(matches!(git_err, ArboristError::GitOperation { .. }));
        assert_eq!(git_err.to_string(), "Git operation failed: failed to delete");

        let repo_err = ArboristError::not_a_repository("/tmp/nowhere");
        assert_eq!(repo_err.to_string(), "Not a git repository: /tmp/nowhere");

        let inv_err = ArboristError::inventory("for-each-ref exited with 128");
        assert!(inv_err
            .to_string()
            .starts_with("Failed to read branch inventory"));

        let failures = ArboristError::deletion_failures(2);
        assert_eq!(failures.to_string(), "2 branch deletion(s) failed");
    }

    #[test]
    fn test_fatal_classification() {
        assert!(ArboristError::not_a_repository("x").is_fatal());
        assert!(ArboristError::inventory("x").is_fatal());
        assert!(!ArboristError::deletion_failures(1).is_fatal());
        assert!(!ArboristError::config_error("bad").is_fatal());
    }

    #[test]
    fn test_user_message_reports_aborted_runs() {
        let aborted = ArboristError::git_operation("fetch --prune failed");
        assert_eq!(
            aborted.user_message(),
            "Git operation failed: fetch --prune failed\nNo branches were deleted."
        );

        let partial = ArboristError::deletion_failures(1);
        assert_eq!(partial.user_message(), "1 branch deletion(s) failed");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ArboristError = io.into();
        assert_eq!(err.to_string(), "IO error: gone");
    }
}
