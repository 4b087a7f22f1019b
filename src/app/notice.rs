use crate::utils::error::{BloodBankError, ErrorCategory, FieldIssue};
use std::fmt;

/// What a view shows after a failed action: one message, plus the
/// per-field issues when the failure was a validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserNotice {
    pub message: String,
    pub suggestion: &'static str,
    pub issues: Vec<FieldIssue>,
    pub category: ErrorCategory,
}

impl UserNotice {
    pub fn is_validation(&self) -> bool {
        self.category == ErrorCategory::Validation
    }
}

impl From<&BloodBankError> for UserNotice {
    fn from(error: &BloodBankError) -> Self {
        match error.category() {
            ErrorCategory::Validation => tracing::warn!("⚠️ {}", error),
            _ => tracing::error!("❌ {} (Category: {:?})", error, error.category()),
        }

        Self {
            message: error.user_friendly_message(),
            suggestion: error.recovery_suggestion(),
            issues: error.issues().to_vec(),
            category: error.category(),
        }
    }
}

impl From<BloodBankError> for UserNotice {
    fn from(error: BloodBankError) -> Self {
        Self::from(&error)
    }
}

impl fmt::Display for UserNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
