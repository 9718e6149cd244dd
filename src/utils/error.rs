use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("PostgreSQL error: {0}")]
    PostgresError(#[from] tokio_postgres::Error),

    #[error("Neo4j error: {0}")]
    Neo4jError(#[from] neo4rs::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Connection error ({target}): {message}")]
    ConnectionError { target: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Row mapping error on table '{table}': {message}")]
    MappingError { table: String, message: String },

    #[error("Value conversion error on column '{column}': {message}")]
    ConversionError { column: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Connection,
    Database,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ConnectionError { .. } => ErrorCategory::Connection,
            EtlError::PostgresError(_) | EtlError::Neo4jError(_) => ErrorCategory::Database,
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorCategory::Configuration,
            EtlError::MappingError { .. } | EtlError::ConversionError { .. } => ErrorCategory::Data,
            EtlError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Data => ErrorSeverity::Low,
            ErrorCategory::Database => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Connection | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Connection => {
                "Check that PostgreSQL and Neo4j are running and the credentials are correct"
            }
            ErrorCategory::Database => "Inspect the failing statement in the debug log (--verbose)",
            ErrorCategory::Configuration => "Review the TOML file and command line overrides",
            ErrorCategory::Data => "Check that the table columns match the expected layout",
            ErrorCategory::System => "Check file paths and permissions",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::ConnectionError { target, .. } => format!("Could not connect to {}", target),
            EtlError::IoError(e) => format!("File access failed: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_follows_category() {
        let err = EtlError::MappingError {
            table: "course".to_string(),
            message: "expected 4 columns, got 3".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::Low);

        let err = EtlError::ConnectionError {
            target: "Neo4j".to_string(),
            message: "refused".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.user_friendly_message(), "Could not connect to Neo4j");
    }

    #[test]
    fn test_missing_config_message() {
        let err = EtlError::MissingConfigError {
            field: "neo4j.uri".to_string(),
        };
        assert_eq!(err.to_string(), "Missing required configuration: neo4j.uri");
        assert_eq!(err.severity(), ErrorSeverity::High);
    }
}
