use std::fmt;
use thiserror::Error;

/// 單一欄位的驗證問題
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub reason: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

#[derive(Error, Debug)]
pub enum BloodBankError {
    #[error("Validation failed: {}", join_issues(.issues))]
    ValidationError { issues: Vec<FieldIssue> },

    #[error("Request to {endpoint} failed: {message}")]
    NetworkError { endpoint: String, message: String },

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Not found: {kind} '{id}'")]
    NotFoundError { kind: String, id: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Another '{action}' request is still in flight")]
    Busy { action: String },
}

pub type Result<T> = std::result::Result<T, BloodBankError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Network,
    NotFound,
    Configuration,
    Internal,
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl BloodBankError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        BloodBankError::ValidationError {
            issues: vec![FieldIssue::new(field, reason)],
        }
    }

    pub fn network(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        BloodBankError::NetworkError {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// 驗證錯誤的所有欄位問題；其他錯誤回傳空切片
    pub fn issues(&self) -> &[FieldIssue] {
        match self {
            BloodBankError::ValidationError { issues } => issues,
            _ => &[],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            BloodBankError::ValidationError { .. } => ErrorCategory::Validation,
            BloodBankError::NetworkError { .. } | BloodBankError::HttpError(_) => {
                ErrorCategory::Network
            }
            BloodBankError::NotFoundError { .. } => ErrorCategory::NotFound,
            BloodBankError::ConfigError { .. }
            | BloodBankError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            BloodBankError::IoError(_)
            | BloodBankError::SerializationError(_)
            | BloodBankError::Busy { .. } => ErrorCategory::Internal,
        }
    }

    /// 給使用者看的單行訊息（toast / 表單下方）
    pub fn user_friendly_message(&self) -> String {
        match self {
            BloodBankError::ValidationError { issues } => {
                format!("Please fix the following: {}", join_issues(issues))
            }
            BloodBankError::NetworkError { message, .. } => message.clone(),
            BloodBankError::HttpError(e) if e.is_timeout() => {
                "The server took too long to respond".to_string()
            }
            BloodBankError::HttpError(_) => "Something went wrong".to_string(),
            BloodBankError::NotFoundError { kind, id } => format!("{} {} no longer exists", kind, id),
            BloodBankError::ConfigError { message } => format!("Configuration problem: {}", message),
            BloodBankError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration problem in '{}': {}", field, reason)
            }
            BloodBankError::IoError(e) => format!("File access failed: {}", e),
            BloodBankError::SerializationError(_) => {
                "The server sent data that could not be read".to_string()
            }
            BloodBankError::Busy { .. } => "Please wait for the current request to finish".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "Correct the highlighted fields and submit again",
            ErrorCategory::Network => "Check that the blood bank API is reachable and try again",
            ErrorCategory::NotFound => "Refresh the list; the record may have been removed",
            ErrorCategory::Configuration => "Review the configuration file and environment variables",
            ErrorCategory::Internal => "Retry the action; report it if the problem persists",
        }
    }
}
