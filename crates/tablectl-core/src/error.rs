//! Unified error handling for tablectl-core.

use thiserror::Error;

/// Core error type shared by the harness helpers and admin implementations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A required environment variable is absent.
    #[error("The {0} environment variable is not set")]
    MissingEnv(String),

    /// A required environment variable is set but empty.
    #[error("The {0} environment variable has an empty value")]
    EmptyEnv(String),

    /// The named table does not exist.
    #[error("table '{0}' not found")]
    TableNotFound(String),

    /// The named table already exists.
    #[error("table '{0}' already exists")]
    TableAlreadyExists(String),

    /// Failure reported by the admin backend.
    #[error("admin backend error: {0}")]
    Backend(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_env_names_the_variable() {
        let err = CoreError::MissingEnv("TABLECTL_PROJECT_ID".to_string());
        assert_eq!(
            err.to_string(),
            "The TABLECTL_PROJECT_ID environment variable is not set"
        );
    }

    #[test]
    fn empty_env_names_the_variable() {
        let err = CoreError::EmptyEnv("TABLECTL_INSTANCE_ID".to_string());
        assert!(err.to_string().contains("has an empty value"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
