use crate::domain::model::ParameterSet;
use std::fmt;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Source unavailable: {message}")]
    SourceUnavailable {
        message: String,
        #[source]
        source: BoxError,
    },

    #[error("Target unavailable: {message}")]
    TargetUnavailable {
        message: String,
        #[source]
        source: BoxError,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Source,
    Target,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl SyncError {
    pub fn source_unavailable(
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::SourceUnavailable {
            message: message.into(),
            source: source.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SourceUnavailable { .. } => ErrorCategory::Source,
            Self::TargetUnavailable { .. } => ErrorCategory::Target,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::High,
            Self::SourceUnavailable { .. }
            | Self::TargetUnavailable { .. }
            | Self::IoError(_)
            | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::SourceUnavailable { .. } => {
                "Check that MongoDB is reachable and the database/collection names are correct"
            }
            Self::TargetUnavailable { .. } => {
                "Check that PostgreSQL is reachable and the credentials are correct"
            }
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => {
                "Review the configuration file and command-line flags"
            }
            Self::IoError(_) => "Check file paths and permissions",
            Self::SerializationError(_) => "Check the data being serialized",
        }
    }

    /// Process exit status for a run that did not finish. Never 0.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::SourceUnavailable { message, .. } => {
                format!("Could not read customers from the source store: {}", message)
            }
            Self::TargetUnavailable { message, .. } => {
                format!("Could not connect to the target store: {}", message)
            }
            Self::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            Self::MissingConfigError { field } => format!("Missing setting '{}'", field),
            Self::IoError(e) => format!("File system error: {}", e),
            Self::SerializationError(e) => format!("Serialization failed: {}", e),
        }
    }
}

/// What went wrong at a single field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingIssue {
    Missing,
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
}

impl fmt::Display for MappingIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "field is missing"),
            Self::WrongType { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
        }
    }
}

/// A source record could not be mapped to a parameter set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Mapping error at '{field}': {issue}")]
pub struct MappingError {
    pub field: String,
    pub issue: MappingIssue,
}

impl MappingError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            issue: MappingIssue::Missing,
        }
    }

    pub fn wrong_type(
        field: impl Into<String>,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self {
            field: field.into(),
            issue: MappingIssue::WrongType { expected, found },
        }
    }
}

/// The target upsert call failed for one parameter set.
#[derive(Error, Debug)]
#[error("Upsert failed for email '{}': {source}", .params.p_email)]
pub struct SinkError {
    pub params: ParameterSet,
    #[source]
    pub source: BoxError,
}

impl SinkError {
    pub fn new(params: ParameterSet, source: impl Into<BoxError>) -> Self {
        Self {
            params,
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
