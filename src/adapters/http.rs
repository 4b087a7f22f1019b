use crate::config::ClientConfig;
use crate::domain::model::{AppUser, BloodRequest, NewBloodRequest, NewUser, StockLevel};
use crate::domain::ports::BloodBankApi;
use crate::utils::error::{BloodBankError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Error body the API server sends with non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// `BloodBankApi` over the REST server's JSON endpoints.
#[derive(Debug, Clone)]
pub struct HttpBloodBankApi {
    client: Client,
    base_url: String,
}

impl HttpBloodBankApi {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.api_timeout()).build()?;
        Ok(Self::with_client(client, &config.api.base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, failure: &str) -> Result<T> {
        let url = self.url(path);
        tracing::debug!("Making API request: GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(path, failure, e))?;
        let response = check_status(path, failure, response).await?;
        decode(path, failure, response).await
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        failure: &str,
    ) -> Result<Response> {
        let url = self.url(path);
        tracing::debug!("Making API request: POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(path, failure, e))?;
        check_status(path, failure, response).await
    }
}

fn transport_error(path: &str, failure: &str, error: reqwest::Error) -> BloodBankError {
    tracing::error!("❌ {} request could not be sent: {}", path, error);
    let message = if error.is_timeout() {
        format!("{}: the server took too long to respond", failure)
    } else {
        failure.to_string()
    };
    BloodBankError::network(path, message)
}

/// 非 2xx：優先使用伺服器回傳的 `message`，否則使用通用訊息
async fn check_status(path: &str, failure: &str, response: Response) -> Result<Response> {
    let status = response.status();
    tracing::debug!("API response status: {}", status);
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|parsed| parsed.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| failure.to_string());

    tracing::warn!("API {} returned {}: {}", path, status, message);
    Err(BloodBankError::network(path, message))
}

async fn decode<T: DeserializeOwned>(path: &str, failure: &str, response: Response) -> Result<T> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| transport_error(path, failure, e))?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl BloodBankApi for HttpBloodBankApi {
    async fn blood_stock(&self) -> Result<Vec<StockLevel>> {
        let levels: Vec<StockLevel> = self
            .get_json("blood-stock", "Failed to fetch blood stock")
            .await?;
        tracing::debug!("Fetched stock for {} blood groups", levels.len());
        Ok(levels)
    }

    async fn blood_requests(&self) -> Result<Vec<BloodRequest>> {
        self.get_json("blood-requests", "Failed to fetch blood requests")
            .await
    }

    async fn create_blood_request(&self, request: &NewBloodRequest) -> Result<BloodRequest> {
        let failure = "Something went wrong";
        let response = self.post_json("blood-requests", request, failure).await?;
        let created: BloodRequest = decode("blood-requests", failure, response).await?;
        tracing::info!(
            "✅ Blood request {} created ({} x {})",
            created.id,
            created.quantity_required,
            created.required_blood_group
        );
        Ok(created)
    }

    async fn users(&self) -> Result<Vec<AppUser>> {
        self.get_json("users", "Failed to fetch users").await
    }

    async fn create_user(&self, user: &NewUser) -> Result<()> {
        self.post_json("users", user, "Failed to create user").await?;
        tracing::info!("✅ User {} created", user.email);
        Ok(())
    }
}
