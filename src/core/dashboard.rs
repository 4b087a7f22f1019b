//! Figures behind the stock dashboard.

use crate::core::inventory::aggregate_by_group;
use crate::domain::model::{BloodGroup, BloodRequest, BloodUnit, Donor, RequestStatus, StockLevel};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StockPoint {
    pub group: BloodGroup,
    pub units: u32,
}

/// 長條圖資料：八個血型都要有，伺服器沒有回傳的血型補 0；重複的血型列加總
pub fn stock_chart(levels: &[StockLevel]) -> Vec<StockPoint> {
    BloodGroup::ALL
        .into_iter()
        .map(|group| StockPoint {
            group,
            units: levels
                .iter()
                .filter(|level| level.blood_group == group)
                .fold(0u32, |sum, level| sum.saturating_add(level.units)),
        })
        .collect()
}

pub fn total_stock(levels: &[StockLevel]) -> u64 {
    levels.iter().map(|level| u64::from(level.units)).sum()
}

/// Groups whose stock is below `threshold`, in canonical group order.
pub fn critical_low_groups(points: &[StockPoint], threshold: u32) -> Vec<BloodGroup> {
    points
        .iter()
        .filter(|point| point.units < threshold)
        .map(|point| point.group)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_units: usize,
    pub total_donors: usize,
    pub critical_low_stock: Vec<BloodGroup>,
    /// Requests the server has not marked as fulfilled yet.
    pub recent_requests: usize,
}

pub fn dashboard_stats(
    units: &[BloodUnit],
    donors: &[Donor],
    requests: &[BloodRequest],
    today: NaiveDate,
    critical_threshold: u32,
) -> DashboardStats {
    let usable = aggregate_by_group(units, today);
    let points: Vec<StockPoint> = usable
        .iter()
        .map(|(group, count)| StockPoint {
            group: *group,
            units: u32::try_from(*count).unwrap_or(u32::MAX),
        })
        .collect();

    DashboardStats {
        total_units: usable.values().sum(),
        total_donors: donors.len(),
        critical_low_stock: critical_low_groups(&points, critical_threshold),
        recent_requests: requests
            .iter()
            .filter(|request| request.status != Some(RequestStatus::Fulfilled))
            .count(),
    }
}
