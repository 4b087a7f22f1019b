use crate::app::in_flight::InFlight;
use crate::core::requests::{build_request_payload, prepend_created, RequestForm};
use crate::domain::model::BloodRequest;
use crate::domain::ports::BloodBankApi;
use crate::utils::error::Result;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Issue-request screen: the request table plus the submission form.
pub struct IssueController {
    api: Arc<dyn BloodBankApi>,
    requests: RwLock<Vec<BloodRequest>>,
    loading: InFlight,
    submitting: InFlight,
}

impl IssueController {
    pub fn new(api: Arc<dyn BloodBankApi>) -> Self {
        Self {
            api,
            requests: RwLock::new(Vec::new()),
            loading: InFlight::new(),
            submitting: InFlight::new(),
        }
    }

    pub async fn load(&self) -> Result<Vec<BloodRequest>> {
        let _guard = self.loading.try_begin("load requests")?;

        let fetched = self.api.blood_requests().await?;
        tracing::info!("📋 Loaded {} blood requests", fetched.len());
        *self.requests.write().await = fetched.clone();
        Ok(fetched)
    }

    /// 先在本地驗證整份表單，通過後才送出；成功後新申請放在列表最前面
    pub async fn submit(&self, form: &RequestForm) -> Result<BloodRequest> {
        let _guard = self.submitting.try_begin("submit request")?;

        let payload = build_request_payload(form)?;
        let created = self.api.create_blood_request(&payload).await?;

        let mut requests = self.requests.write().await;
        *requests = prepend_created(&requests, created.clone());
        Ok(created)
    }

    pub async fn requests(&self) -> Vec<BloodRequest> {
        self.requests.read().await.clone()
    }
}
