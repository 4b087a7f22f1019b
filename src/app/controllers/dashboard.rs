use crate::app::in_flight::InFlight;
use crate::core::dashboard::{critical_low_groups, stock_chart, total_stock, StockPoint};
use crate::domain::model::BloodGroup;
use crate::domain::ports::BloodBankApi;
use crate::utils::error::Result;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockOverview {
    pub chart: Vec<StockPoint>,
    pub total_units: u64,
    pub critical_low: Vec<BloodGroup>,
}

/// Stock dashboard backed by `GET /blood-stock`.
pub struct DashboardController {
    api: Arc<dyn BloodBankApi>,
    critical_threshold: u32,
    overview: RwLock<Option<StockOverview>>,
    loading: InFlight,
}

impl DashboardController {
    pub fn new(api: Arc<dyn BloodBankApi>, critical_threshold: u32) -> Self {
        Self {
            api,
            critical_threshold,
            overview: RwLock::new(None),
            loading: InFlight::new(),
        }
    }

    pub async fn load(&self) -> Result<StockOverview> {
        let _guard = self.loading.try_begin("load stock")?;

        let levels = self.api.blood_stock().await?;
        let chart = stock_chart(&levels);
        let overview = StockOverview {
            total_units: total_stock(&levels),
            critical_low: critical_low_groups(&chart, self.critical_threshold),
            chart,
        };

        tracing::info!(
            "📊 Stock loaded: {} units, {} groups critically low",
            overview.total_units,
            overview.critical_low.len()
        );
        *self.overview.write().await = Some(overview.clone());
        Ok(overview)
    }

    /// Last successfully loaded overview; a failed load leaves it untouched.
    pub async fn overview(&self) -> Option<StockOverview> {
        self.overview.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::controllers::testing::FakeApi;
    use crate::domain::model::StockLevel;
    use crate::utils::error::BloodBankError;

    #[tokio::test]
    async fn test_load_fills_missing_groups_and_flags_low_stock() {
        let api = FakeApi::default().with_stock(vec![
            StockLevel {
                blood_group: BloodGroup::OPositive,
                units: 12,
            },
            StockLevel {
                blood_group: BloodGroup::AbNegative,
                units: 2,
            },
        ]);
        let controller = DashboardController::new(Arc::new(api), 5);

        let overview = controller.load().await.unwrap();

        assert_eq!(overview.chart.len(), 8);
        assert_eq!(overview.total_units, 14);
        assert!(overview.critical_low.contains(&BloodGroup::AbNegative));
        assert!(!overview.critical_low.contains(&BloodGroup::OPositive));
        assert_eq!(controller.overview().await, Some(overview));
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_overview() {
        let api = Arc::new(FakeApi::default());
        let controller = DashboardController::new(api.clone(), 5);
        controller.load().await.unwrap();

        api.fail_with(BloodBankError::network("blood-stock", "Failed to fetch blood stock"));
        let err = controller.load().await.unwrap_err();

        assert_eq!(err.user_friendly_message(), "Failed to fetch blood stock");
        assert!(controller.overview().await.is_some());
    }
}
