//! Error types for Applyform

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApplyformError>;

#[derive(Error, Debug)]
pub enum ApplyformError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Forwarding error: {0}")]
    Forward(#[from] ForwardError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ApplyformError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ApplyformError::InvalidInput(_) => 3,
            ApplyformError::Config(_) => 1,
            ApplyformError::Storage(_) => 1,
            ApplyformError::Forward(_) => 1,
            ApplyformError::Export(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database operation failed: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to serialize collection: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failures of the optional outbound submission.
///
/// These never reach the user; the submission flow logs them and moves on.
#[derive(Error, Debug)]
pub enum ForwardError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Transport failed: {0}")]
    Transport(String),

    #[error("Endpoint responded with status {0}")]
    Status(u16),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to persist export file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_invalid_input() {
        let error = ApplyformError::InvalidInput("Missing field".to_string());
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_storage_error() {
        let storage_error = StorageError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        ));
        let error = ApplyformError::Storage(storage_error);
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_forward_and_export_errors() {
        let forward = ApplyformError::Forward(ForwardError::Status(502));
        assert_eq!(forward.exit_code(), 1);

        let export = ApplyformError::Export(ExportError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing directory",
        )));
        assert_eq!(export.exit_code(), 1);
    }

    #[test]
    fn test_error_message_formatting_config() {
        let config_error = ConfigError::MissingField("storage.path".to_string());
        let error = ApplyformError::Config(config_error);
        assert_eq!(
            format!("{}", error),
            "Configuration error: Missing required field: storage.path"
        );
    }

    #[test]
    fn test_error_message_formatting_forward_status() {
        let error: ApplyformError = ForwardError::Status(503).into();
        assert_eq!(
            format!("{}", error),
            "Forwarding error: Endpoint responded with status 503"
        );
    }

    #[test]
    fn test_error_conversion_from_serde_json() {
        let json_error = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let storage_error: StorageError = json_error.into();
        let error: ApplyformError = storage_error.into();

        match error {
            ApplyformError::Storage(StorageError::Serialization(_)) => {}
            _ => panic!("Expected ApplyformError::Storage(Serialization)"),
        }
    }

    #[test]
    fn test_error_debug_output() {
        let error = ApplyformError::Forward(ForwardError::Transport("connection refused".to_string()));
        let debug_output = format!("{:?}", error);
        assert!(debug_output.contains("Forward"));
        assert!(debug_output.contains("Transport"));
    }
}
