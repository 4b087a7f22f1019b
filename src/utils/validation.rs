use crate::utils::error::{BloodBankError, FieldIssue, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(BloodBankError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(BloodBankError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(BloodBankError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(BloodBankError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// 收集表單的所有欄位問題，最後一次回報
///
/// 表單驗證不能在第一個錯誤就停下，畫面需要一次顯示全部問題。
#[derive(Debug, Default)]
pub struct IssueCollector {
    issues: Vec<FieldIssue>,
}

impl IssueCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, reason: impl Into<String>) {
        self.issues.push(FieldIssue::new(field, reason));
    }

    pub fn require_non_empty(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, "is required");
        }
    }

    pub fn require_email(&mut self, field: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            self.push(field, "is required");
        } else if !looks_like_email(value) {
            self.push(field, "must be a valid email address");
        }
    }

    pub fn require_range<T: PartialOrd + std::fmt::Display + Copy>(
        &mut self,
        field: &str,
        value: T,
        min: T,
        max: T,
    ) {
        if value < min || value > max {
            self.push(field, format!("must be between {} and {}", min, max));
        }
    }

    pub fn require_at_least<T: PartialOrd + std::fmt::Display + Copy>(
        &mut self,
        field: &str,
        value: T,
        min: T,
    ) {
        if value < min {
            self.push(field, format!("must be at least {}", min));
        }
    }

    /// 解析欄位；失敗時記錄問題並回傳 None
    pub fn parse<T, E: std::fmt::Display>(
        &mut self,
        field: &str,
        parsed: std::result::Result<T, E>,
    ) -> Option<T> {
        match parsed {
            Ok(value) => Some(value),
            Err(e) => {
                self.push(field, e.to_string());
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn finish(self) -> Result<()> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(BloodBankError::ValidationError {
                issues: self.issues,
            })
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
