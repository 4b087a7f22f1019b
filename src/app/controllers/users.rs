use crate::app::in_flight::InFlight;
use crate::core::users::{build_user_payload, search_users, UserForm};
use crate::domain::model::AppUser;
use crate::domain::ports::BloodBankApi;
use crate::utils::error::Result;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct UsersController {
    api: Arc<dyn BloodBankApi>,
    users: RwLock<Vec<AppUser>>,
    loading: InFlight,
    creating: InFlight,
}

impl UsersController {
    pub fn new(api: Arc<dyn BloodBankApi>) -> Self {
        Self {
            api,
            users: RwLock::new(Vec::new()),
            loading: InFlight::new(),
            creating: InFlight::new(),
        }
    }

    pub async fn load(&self) -> Result<Vec<AppUser>> {
        let _guard = self.loading.try_begin("load users")?;
        self.refresh().await
    }

    async fn refresh(&self) -> Result<Vec<AppUser>> {
        let fetched = self.api.users().await?;
        tracing::info!("👥 Loaded {} users", fetched.len());
        *self.users.write().await = fetched.clone();
        Ok(fetched)
    }

    pub async fn search(&self, term: &str) -> Vec<AppUser> {
        let users = self.users.read().await;
        search_users(&users, term).cloned().collect()
    }

    /// The server does not echo the created user, so the list is re-fetched.
    pub async fn create(&self, form: &UserForm) -> Result<Vec<AppUser>> {
        let _guard = self.creating.try_begin("create user")?;

        let payload = build_user_payload(form)?;
        self.api.create_user(&payload).await?;
        self.refresh().await
    }
}
