use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UnimatchError {
    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("No recommendations received")]
    NoRecommendations,
}

impl UnimatchError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            UnimatchError::NoRecommendations => {
                "No recommendations received. Please try again.".to_string()
            }
            UnimatchError::ValidationError { message } => message.clone(),
            UnimatchError::ConfigError { .. }
            | UnimatchError::ConfigValidationError { .. }
            | UnimatchError::InvalidConfigValueError { .. }
            | UnimatchError::MissingConfigError { .. } => {
                format!("Configuration problem: {}", self)
            }
            UnimatchError::IoError(e) => format!("Could not read a file: {}", e),
            UnimatchError::HttpClientError(_) => {
                "Could not initialise the HTTP client.".to_string()
            }
            UnimatchError::SerializationError(_) => "Could not encode the output.".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            UnimatchError::NoRecommendations => "Submit the search again.",
            UnimatchError::ValidationError { .. } => {
                "Pick a subject with --subject (see --list-options)."
            }
            UnimatchError::ConfigError { .. }
            | UnimatchError::ConfigValidationError { .. }
            | UnimatchError::InvalidConfigValueError { .. }
            | UnimatchError::MissingConfigError { .. } => {
                "Check the TOML file passed with --config and any ${VAR} it references."
            }
            UnimatchError::IoError(_) => "Check that the path exists and is readable.",
            UnimatchError::HttpClientError(_) => "Check the TLS setup of this machine.",
            UnimatchError::SerializationError(_) => "Try --format text instead.",
        }
    }
}

pub type Result<T> = std::result::Result<T, UnimatchError>;

/// Why a remote provider attempt was abandoned. Never leaves the service;
/// every variant resolves to local synthesis.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderFailure {
    #[error("provider rejected the credential")]
    Unauthorized,

    #[error("provider quota or rate limit exceeded")]
    QuotaExceeded,

    #[error("provider denied access")]
    Forbidden,

    #[error("provider returned HTTP {0}")]
    Status(u16),

    #[error("provider did not answer within {0:?}")]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("response is not valid JSON: {0}")]
    MalformedJson(String),

    #[error("response contained no recommendations")]
    EmptyResponse,

    #[error("response has an unexpected shape: {0}")]
    InvalidShape(String),
}

impl ProviderFailure {
    /// Stable tag used as the `reason` field in logs.
    pub fn reason(&self) -> &'static str {
        match self {
            ProviderFailure::Unauthorized => "unauthorized",
            ProviderFailure::QuotaExceeded => "quota_exceeded",
            ProviderFailure::Forbidden => "forbidden",
            ProviderFailure::Status(_) => "http_status",
            ProviderFailure::Timeout(_) => "timeout",
            ProviderFailure::Transport(_) => "transport",
            ProviderFailure::MalformedJson(_) => "malformed_json",
            ProviderFailure::EmptyResponse => "empty_response",
            ProviderFailure::InvalidShape(_) => "invalid_shape",
        }
    }

    pub fn from_status(status: u16) -> Self {
        match status {
            401 => ProviderFailure::Unauthorized,
            403 => ProviderFailure::Forbidden,
            429 => ProviderFailure::QuotaExceeded,
            other => ProviderFailure::Status(other),
        }
    }
}
