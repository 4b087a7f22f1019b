use crate::domain::model::{AppUser, BloodRequest, NewBloodRequest, NewUser, StockLevel};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// The REST server that owns persistence for stock, requests and users.
#[async_trait]
pub trait BloodBankApi: Send + Sync {
    async fn blood_stock(&self) -> Result<Vec<StockLevel>>;
    async fn blood_requests(&self) -> Result<Vec<BloodRequest>>;
    async fn create_blood_request(&self, request: &NewBloodRequest) -> Result<BloodRequest>;
    async fn users(&self) -> Result<Vec<AppUser>>;
    async fn create_user(&self, user: &NewUser) -> Result<()>;
}

/// Hosted generative model answering free-text questions.
#[async_trait]
pub trait ChatCollaborator: Send + Sync {
    /// `history` is the prior transcript, one `role: text` line per turn.
    async fn send_message(&self, message: &str, history: &[String]) -> Result<String>;
}

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
