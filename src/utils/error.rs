use thiserror::Error;

#[derive(Error, Debug)]
pub enum KgError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Not found: {what}")]
    NotFound { what: String },

    #[error("{message}")]
    Service { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Backend,
    Data,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl KgError {
    pub fn config(message: impl Into<String>) -> Self {
        KgError::Config {
            message: message.into(),
        }
    }

    pub fn service(message: impl Into<String>) -> Self {
        KgError::Service {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            KgError::Http(_) => ErrorCategory::Network,
            KgError::Api { .. } | KgError::Service { .. } => ErrorCategory::Backend,
            KgError::Io(_) | KgError::Serialization(_) => ErrorCategory::Data,
            KgError::Config { .. } | KgError::InvalidConfigValue { .. } => {
                ErrorCategory::Configuration
            }
            KgError::Validation { .. } | KgError::NotFound { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            KgError::NotFound { .. } => ErrorSeverity::Low,
            KgError::Http(_) | KgError::Service { .. } => ErrorSeverity::Medium,
            KgError::Api { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            KgError::Api { .. }
            | KgError::Validation { .. }
            | KgError::Serialization(_) => ErrorSeverity::High,
            KgError::Io(_) | KgError::Config { .. } | KgError::InvalidConfigValue { .. } => {
                ErrorSeverity::Critical
            }
        }
    }

    /// Message surfaced to the user and stored in controller state.
    pub fn user_friendly_message(&self) -> String {
        match self {
            KgError::Http(e) if e.is_timeout() => "The request timed out".to_string(),
            KgError::Http(e) if e.is_connect() => "Could not reach the knowledge graph API".to_string(),
            KgError::Api { message, .. } => message.clone(),
            KgError::Service { message } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the API is running and --base-url points at it, or use --mock",
            ErrorCategory::Backend => "Retry later; if the problem persists inspect the backend logs",
            ErrorCategory::Data => "Check the output directory permissions and the response format",
            ErrorCategory::Configuration => "Fix the configuration file or command line flags",
            ErrorCategory::Input => "Check the query or identifier and try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, KgError>;
