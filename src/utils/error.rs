use thiserror::Error;

#[derive(Error, Debug)]
pub enum RocksError {
    #[error("Remote service request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration file error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Index error: {message}")]
    IndexError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RocksError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RocksError::ApiError(_) => ErrorCategory::Network,
            RocksError::CsvError(_)
            | RocksError::SerializationError(_)
            | RocksError::IndexError { .. } => ErrorCategory::Data,
            RocksError::TomlError(_)
            | RocksError::ConfigError { .. }
            | RocksError::InvalidConfigValueError { .. }
            | RocksError::MissingConfigError { .. } => ErrorCategory::Configuration,
            RocksError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RocksError::ApiError(_) => ErrorSeverity::Medium,
            RocksError::CsvError(_)
            | RocksError::SerializationError(_)
            | RocksError::IndexError { .. }
            | RocksError::IoError(_) => ErrorSeverity::High,
            RocksError::TomlError(_)
            | RocksError::ConfigError { .. }
            | RocksError::InvalidConfigValueError { .. }
            | RocksError::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            RocksError::ApiError(_) => {
                "Check the network connection and the service endpoint, then retry".to_string()
            }
            RocksError::CsvError(_) => "Check that the output path is writable".to_string(),
            RocksError::IoError(_) => {
                "Check file permissions and available disk space".to_string()
            }
            RocksError::SerializationError(_) | RocksError::IndexError { .. } => {
                "The cached index may be corrupt, run 'rocks-id update' to replace it".to_string()
            }
            RocksError::TomlError(_) => {
                "Check the configuration file for TOML syntax errors".to_string()
            }
            RocksError::ConfigError { .. }
            | RocksError::InvalidConfigValueError { .. }
            | RocksError::MissingConfigError { .. } => {
                "Review the command line flags and configuration file values".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RocksError::ApiError(e) => format!("The remote service could not be reached: {}", e),
            RocksError::IndexError { message } => {
                format!("The local index could not be used: {}", message)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RocksError>;
