use crate::domain::model::Stage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlyoverError {
    #[error("There has been an error retrieving {stage}: {message}")]
    Transport { stage: Stage, message: String },

    #[error("Status Code {code} when fetching {stage}: {body}")]
    HttpStatus { stage: Stage, code: u16, body: String },

    #[error("Unexpected {stage} response, field `{field}`: {reason}")]
    Parse {
        stage: Stage,
        field: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure raised by an [`HttpClient`](crate::domain::ports::HttpClient) before
/// any response status is available.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            "request timed out"
        } else if err.is_connect() {
            "connection failed"
        } else if err.is_body() || err.is_decode() {
            "failed to read response body"
        } else {
            "request failed"
        };
        Self::new(format!("{}: {}", kind, err))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Remote,
    Data,
    Configuration,
    System,
}

impl FlyoverError {
    pub fn parse(stage: Stage, field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            stage,
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The pipeline stage that failed, if the error came from one.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Transport { stage, .. }
            | Self::HttpStatus { stage, .. }
            | Self::Parse { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Transport { .. } => ErrorCategory::Network,
            Self::HttpStatus { .. } => ErrorCategory::Remote,
            Self::Parse { .. } => ErrorCategory::Data,
            Self::Config { .. } | Self::InvalidConfigValue { .. } => ErrorCategory::Configuration,
            Self::Io(_) | Self::Serialization(_) => ErrorCategory::System,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Transport { stage, .. } => {
                format!("Could not reach the service providing {}", stage)
            }
            Self::HttpStatus { stage, code, .. } => {
                format!("The {} service answered with status {}", stage, code)
            }
            Self::Parse { stage, field, .. } => {
                format!("The {} service returned an unexpected `{}`", stage, field)
            }
            Self::Config { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValue { field, reason, .. } => {
                format!("Invalid setting `{}`: {}", field, reason)
            }
            Self::Io(e) => format!("File access failed: {}", e),
            Self::Serialization(e) => format!("Could not render output: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your internet connection or raise --timeout",
            ErrorCategory::Remote => "The service may be down or rate limiting; try again later or point to another endpoint",
            ErrorCategory::Data => "The service response format may have changed; try a different endpoint",
            ErrorCategory::Configuration => "Fix the flag or config file value and run again",
            ErrorCategory::System => "Check that the config file is readable and rerun with --verbose",
        }
    }
}

pub type Result<T> = std::result::Result<T, FlyoverError>;
