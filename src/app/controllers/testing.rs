//! In-memory `BloodBankApi` for controller unit tests.

use crate::domain::model::{
    AppUser, BloodRequest, NewBloodRequest, NewUser, RequestStatus, StockLevel,
};
use crate::domain::ports::BloodBankApi;
use crate::utils::error::{BloodBankError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

#[derive(Default)]
pub struct FakeApi {
    stock: Mutex<Vec<StockLevel>>,
    requests: Mutex<Vec<BloodRequest>>,
    users: Mutex<Vec<AppUser>>,
    failure: Mutex<Option<BloodBankError>>,
    /// When set, every call waits here until notified.
    hold: Mutex<Option<Arc<Notify>>>,
    pub calls: AtomicUsize,
}

impl FakeApi {
    pub fn with_stock(self, stock: Vec<StockLevel>) -> Self {
        *self.stock.lock().unwrap() = stock;
        self
    }

    pub fn with_requests(self, requests: Vec<BloodRequest>) -> Self {
        *self.requests.lock().unwrap() = requests;
        self
    }

    pub fn with_users(self, users: Vec<AppUser>) -> Self {
        *self.users.lock().unwrap() = users;
        self
    }

    pub fn fail_with(&self, error: BloodBankError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn hold(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.hold.lock().unwrap() = Some(notify.clone());
        notify
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let hold = self.hold.lock().unwrap().clone();
        if let Some(notify) = hold {
            notify.notified().await;
        }
        match self.failure.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BloodBankApi for FakeApi {
    async fn blood_stock(&self) -> Result<Vec<StockLevel>> {
        self.enter().await?;
        Ok(self.stock.lock().unwrap().clone())
    }

    async fn blood_requests(&self) -> Result<Vec<BloodRequest>> {
        self.enter().await?;
        Ok(self.requests.lock().unwrap().clone())
    }

    async fn create_blood_request(&self, request: &NewBloodRequest) -> Result<BloodRequest> {
        self.enter().await?;
        let mut stored = self.requests.lock().unwrap();
        let created = BloodRequest {
            id: stored.len() as u64 + 1,
            user_email: request.user_email.clone(),
            user_name: request.user_name.clone(),
            user_type: request.user_type,
            required_blood_group: request.required_blood_group,
            quantity_required: request.quantity_required,
            total_amount: request.total_amount,
            urgency_level: request.urgency_level.as_str().to_string(),
            hospital_name: request.hospital_name.clone(),
            referred_by: request.referred_by.clone(),
            purpose_of_issue: request.purpose_of_issue.clone(),
            status: Some(RequestStatus::Pending),
        };
        stored.push(created.clone());
        Ok(created)
    }

    async fn users(&self) -> Result<Vec<AppUser>> {
        self.enter().await?;
        Ok(self.users.lock().unwrap().clone())
    }

    async fn create_user(&self, user: &NewUser) -> Result<()> {
        self.enter().await?;
        let mut stored = self.users.lock().unwrap();
        let id = stored.len() as u64 + 1;
        stored.push(AppUser {
            id,
            full_name: user.full_name.clone(),
            age: user.age,
            sex: format!("{:?}", user.sex),
            blood_group: user.blood_group,
            email: user.email.clone(),
            phone_number: user.phone_number.clone(),
            full_address: user.full_address.clone(),
        });
        Ok(())
    }
}
