use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 全血的保存期限（天）
pub const SHELF_LIFE_DAYS: i64 = 42;

/// 一袋全血的預設容量 (ml)
pub const DEFAULT_UNIT_VOLUME_ML: u32 = 450;

/// 受血者每單位的費用
pub const RECEIVER_PRICE_PER_UNIT: u64 = 1100;

/// ABO/Rh blood groups. The set is closed; the string form is the wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::APositive,
        BloodGroup::ANegative,
        BloodGroup::BPositive,
        BloodGroup::BNegative,
        BloodGroup::AbPositive,
        BloodGroup::AbNegative,
        BloodGroup::OPositive,
        BloodGroup::ONegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::AbPositive => "AB+",
            BloodGroup::AbNegative => "AB-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
        }
    }

    pub fn is_rh_positive(&self) -> bool {
        self.as_str().ends_with('+')
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

impl FromStr for BloodGroup {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        BloodGroup::ALL
            .into_iter()
            .find(|group| group.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownVariant {
                kind: "blood group",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitStatus {
    Available,
    Reserved,
    Expired,
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UnitStatus::Available => "Available",
            UnitStatus::Reserved => "Reserved",
            UnitStatus::Expired => "Expired",
        };
        f.write_str(label)
    }
}

/// One collected bag of blood, tracked from collection until use or expiry.
///
/// Deserialising rejects records whose expiry is not after collection or
/// whose volume is zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "UncheckedBloodUnit")]
pub struct BloodUnit {
    pub id: String,
    pub blood_group: BloodGroup,
    pub collection_date: NaiveDate,
    pub expiry_date: NaiveDate,
    /// Volume in ml
    pub volume: u32,
    pub status: UnitStatus,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UncheckedBloodUnit {
    id: String,
    blood_group: BloodGroup,
    collection_date: NaiveDate,
    expiry_date: NaiveDate,
    volume: u32,
    status: UnitStatus,
}

impl TryFrom<UncheckedBloodUnit> for BloodUnit {
    type Error = String;

    fn try_from(raw: UncheckedBloodUnit) -> Result<Self, Self::Error> {
        if raw.expiry_date <= raw.collection_date {
            return Err(format!(
                "unit {}: expiryDate {} must be after collectionDate {}",
                raw.id, raw.expiry_date, raw.collection_date
            ));
        }
        if raw.volume == 0 {
            return Err(format!("unit {}: volume must be positive", raw.id));
        }
        Ok(BloodUnit {
            id: raw.id,
            blood_group: raw.blood_group,
            collection_date: raw.collection_date,
            expiry_date: raw.expiry_date,
            volume: raw.volume,
            status: raw.status,
        })
    }
}

impl BloodUnit {
    pub fn expiry_for(collection_date: NaiveDate) -> NaiveDate {
        collection_date + Duration::days(SHELF_LIFE_DAYS)
    }

    /// 到期是推算出來的狀態：到期日當天（含）之後一律視為 Expired
    pub fn effective_status(&self, today: NaiveDate) -> UnitStatus {
        if self.is_expired(today) {
            UnitStatus::Expired
        } else {
            self.status
        }
    }

    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.status == UnitStatus::Expired || today >= self.expiry_date
    }

    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        (self.expiry_date - today).num_days()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DonorStatus {
    Active,
    Deferred,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donor {
    pub id: String,
    pub name: String,
    pub age: u8,
    pub blood_group: BloodGroup,
    pub last_donation_date: NaiveDate,
    pub contact: String,
    pub status: DonorStatus,
}

impl Donor {
    /// Deferral is decided outside this crate; this only records it.
    pub fn defer(&self) -> Donor {
        Donor {
            status: DonorStatus::Deferred,
            ..self.clone()
        }
    }

    pub fn reinstate(&self) -> Donor {
        Donor {
            status: DonorStatus::Active,
            ..self.clone()
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == DonorStatus::Active
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserType {
    Receiver,
    Donor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UrgencyLevel {
    #[default]
    Normal,
    High,
    Critical,
}

impl UrgencyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyLevel::Normal => "Normal",
            UrgencyLevel::High => "High",
            UrgencyLevel::Critical => "Critical",
        }
    }
}

impl FromStr for UrgencyLevel {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(UrgencyLevel::Normal),
            "high" => Ok(UrgencyLevel::High),
            "critical" => Ok(UrgencyLevel::Critical),
            _ => Err(UnknownVariant {
                kind: "urgency level",
                value: s.to_string(),
            }),
        }
    }
}

/// Lifecycle reported by the API server. Never set locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Approved,
    Fulfilled,
    #[serde(other)]
    Unknown,
}

/// Body of `POST /blood-requests`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBloodRequest {
    pub user_email: String,
    pub user_name: String,
    pub user_type: UserType,
    pub required_blood_group: BloodGroup,
    pub quantity_required: u32,
    pub total_amount: u64,
    pub urgency_level: UrgencyLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referred_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose_of_issue: Option<String>,
}

/// A blood request as stored by the API server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodRequest {
    pub id: u64,
    pub user_email: String,
    pub user_name: String,
    pub user_type: UserType,
    pub required_blood_group: BloodGroup,
    pub quantity_required: u32,
    #[serde(default)]
    pub total_amount: u64,
    /// Kept as reported so that an unexpected label still renders.
    pub urgency_level: String,
    #[serde(default)]
    pub hospital_name: Option<String>,
    #[serde(default)]
    pub referred_by: Option<String>,
    #[serde(default)]
    pub purpose_of_issue: Option<String>,
    #[serde(default)]
    pub status: Option<RequestStatus>,
}

impl BloodRequest {
    pub fn urgency(&self) -> Option<UrgencyLevel> {
        self.urgency_level.parse().ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl FromStr for Sex {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            "other" => Ok(Sex::Other),
            _ => Err(UnknownVariant {
                kind: "sex",
                value: s.to_string(),
            }),
        }
    }
}

/// Body of `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub full_name: String,
    pub age: u8,
    pub sex: Sex,
    pub blood_group: BloodGroup,
    pub email: String,
    pub phone_number: String,
    pub full_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppUser {
    pub id: u64,
    pub full_name: String,
    pub age: u8,
    pub sex: String,
    pub blood_group: BloodGroup,
    pub email: String,
    pub phone_number: String,
    pub full_address: String,
}

/// One row of `GET /blood-stock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLevel {
    pub blood_group: BloodGroup,
    #[serde(default)]
    pub units: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// 對話歷史的單行格式 `role: text`
    pub fn history_line(&self) -> String {
        format!("{}: {}", self.role.as_str(), self.text)
    }
}
