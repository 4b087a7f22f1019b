//! Issue requests: form validation, payload construction and display tone.

use crate::domain::model::{
    BloodGroup, BloodRequest, NewBloodRequest, RequestStatus, UrgencyLevel, UserType,
    RECEIVER_PRICE_PER_UNIT,
};
use crate::utils::error::{BloodBankError, Result};
use crate::utils::validation::IssueCollector;

/// Fields every request carries, whoever submits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequesterDetails {
    pub email: String,
    pub user_name: String,
    pub blood_group: String,
    pub quantity: i64,
    pub urgency: UrgencyLevel,
}

impl Default for RequesterDetails {
    fn default() -> Self {
        Self {
            email: String::new(),
            user_name: String::new(),
            blood_group: BloodGroup::APositive.as_str().to_string(),
            quantity: 1,
            urgency: UrgencyLevel::Normal,
        }
    }
}

/// 申請表單：受血者與捐血者的必填欄位不同，用 enum 區分
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestForm {
    Receiver {
        requester: RequesterDetails,
        hospital: String,
        referred_by: String,
        purpose: String,
    },
    Donor {
        requester: RequesterDetails,
        total_amount: Option<u64>,
    },
}

impl RequestForm {
    pub fn requester(&self) -> &RequesterDetails {
        match self {
            RequestForm::Receiver { requester, .. } | RequestForm::Donor { requester, .. } => {
                requester
            }
        }
    }

    pub fn user_type(&self) -> UserType {
        match self {
            RequestForm::Receiver { .. } => UserType::Receiver,
            RequestForm::Donor { .. } => UserType::Donor,
        }
    }
}

/// Amount charged to a receiver; not editable on the form.
pub fn receiver_total(quantity: u32) -> u64 {
    u64::from(quantity) * RECEIVER_PRICE_PER_UNIT
}

/// Validate `form` and turn it into the body of `POST /blood-requests`.
///
/// All problems are reported together in one `ValidationError`.
pub fn build_request_payload(form: &RequestForm) -> Result<NewBloodRequest> {
    let requester = form.requester();
    let mut issues = IssueCollector::new();

    issues.require_email("email", &requester.email);
    issues.require_non_empty("userName", &requester.user_name);
    let blood_group = if requester.blood_group.trim().is_empty() {
        issues.push("bloodGroup", "is required");
        None
    } else {
        issues.parse("bloodGroup", requester.blood_group.parse::<BloodGroup>())
    };
    let quantity = match u32::try_from(requester.quantity) {
        Ok(q) if q >= 1 => Some(q),
        _ => {
            issues.push("quantity", "must be at least 1");
            None
        }
    };

    if let RequestForm::Receiver {
        hospital,
        referred_by,
        purpose,
        ..
    } = form
    {
        issues.require_non_empty("hospital", hospital);
        issues.require_non_empty("referredBy", referred_by);
        issues.require_non_empty("purpose", purpose);
    }

    issues.finish()?;
    let blood_group =
        blood_group.ok_or_else(|| BloodBankError::validation("bloodGroup", "is required"))?;
    let quantity =
        quantity.ok_or_else(|| BloodBankError::validation("quantity", "must be at least 1"))?;

    let payload = match form {
        RequestForm::Receiver {
            hospital,
            referred_by,
            purpose,
            ..
        } => NewBloodRequest {
            user_email: requester.email.trim().to_string(),
            user_name: requester.user_name.trim().to_string(),
            user_type: UserType::Receiver,
            required_blood_group: blood_group,
            quantity_required: quantity,
            total_amount: receiver_total(quantity),
            urgency_level: requester.urgency,
            hospital_name: Some(hospital.trim().to_string()),
            referred_by: Some(referred_by.trim().to_string()),
            purpose_of_issue: Some(purpose.trim().to_string()),
        },
        RequestForm::Donor { total_amount, .. } => NewBloodRequest {
            user_email: requester.email.trim().to_string(),
            user_name: requester.user_name.trim().to_string(),
            user_type: UserType::Donor,
            required_blood_group: blood_group,
            quantity_required: quantity,
            total_amount: total_amount.unwrap_or(0),
            urgency_level: requester.urgency,
            hospital_name: None,
            referred_by: None,
            purpose_of_issue: None,
        },
    };

    Ok(payload)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emphasis {
    Low,
    Medium,
    High,
}

impl UrgencyLevel {
    pub fn emphasis(&self) -> Emphasis {
        match self {
            UrgencyLevel::Normal => Emphasis::Low,
            UrgencyLevel::High => Emphasis::Medium,
            UrgencyLevel::Critical => Emphasis::High,
        }
    }
}

/// Emphasis for an urgency label as reported by the server. Labels outside
/// the known set land in the high-emphasis bucket.
pub fn classify_urgency_style(level: &str) -> Emphasis {
    level
        .parse::<UrgencyLevel>()
        .map(|urgency| urgency.emphasis())
        .unwrap_or(Emphasis::High)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTone {
    Waiting,
    InProgress,
    Settled,
}

pub fn classify_status_style(status: &RequestStatus) -> StatusTone {
    match status {
        RequestStatus::Pending => StatusTone::Waiting,
        RequestStatus::Approved => StatusTone::InProgress,
        RequestStatus::Fulfilled | RequestStatus::Unknown => StatusTone::Settled,
    }
}

/// 新建立的申請排在最前面
pub fn prepend_created(requests: &[BloodRequest], created: BloodRequest) -> Vec<BloodRequest> {
    std::iter::once(created)
        .chain(requests.iter().cloned())
        .collect()
}
