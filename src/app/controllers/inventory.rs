use crate::core::dashboard::{dashboard_stats, DashboardStats};
use crate::core::donors::{add_donor, register_donor_with_clock, search_donors, DonorForm};
use crate::core::inventory::{
    aggregate_by_group, create_unit_with_clock, delete_unit, expiring_within, list_units,
    UnitFilter,
};
use crate::domain::model::{BloodGroup, BloodRequest, BloodUnit, Donor, UnitStatus};
use crate::domain::ports::Clock;
use crate::utils::error::Result;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Units and donors held in memory by the client; nothing here is persisted.
pub struct InventoryController {
    clock: Arc<dyn Clock>,
    critical_threshold: u32,
    expiry_warning_days: u32,
    units: RwLock<Vec<BloodUnit>>,
    donors: RwLock<Vec<Donor>>,
}

impl InventoryController {
    pub fn new(clock: Arc<dyn Clock>, critical_threshold: u32, expiry_warning_days: u32) -> Self {
        Self {
            clock,
            critical_threshold,
            expiry_warning_days,
            units: RwLock::new(Vec::new()),
            donors: RwLock::new(Vec::new()),
        }
    }

    pub async fn add_unit(
        &self,
        blood_group: BloodGroup,
        volume: i64,
        status: UnitStatus,
    ) -> Result<BloodUnit> {
        let unit = create_unit_with_clock(blood_group, volume, status, self.clock.as_ref())?;
        tracing::info!("🩸 Added unit {} ({}, {} ml)", unit.id, unit.blood_group, unit.volume);
        self.units.write().await.push(unit.clone());
        Ok(unit)
    }

    /// Unknown ids are a no-op.
    pub async fn remove_unit(&self, id: &str) {
        let mut units = self.units.write().await;
        *units = delete_unit(&units, id);
    }

    pub async fn units(&self, filter: &UnitFilter) -> Vec<BloodUnit> {
        let units = self.units.read().await;
        list_units(&units, filter).cloned().collect()
    }

    pub async fn usable_by_group(&self) -> BTreeMap<BloodGroup, usize> {
        aggregate_by_group(&self.units.read().await, self.clock.today())
    }

    /// Units still usable but expiring inside the configured warning window.
    pub async fn expiring_soon(&self) -> Vec<BloodUnit> {
        let units = self.units.read().await;
        expiring_within(&units, self.clock.today(), self.expiry_warning_days)
            .cloned()
            .collect()
    }

    pub async fn register_donor(&self, form: &DonorForm) -> Result<Donor> {
        let donor = register_donor_with_clock(form, self.clock.as_ref())?;
        let mut donors = self.donors.write().await;
        *donors = add_donor(&donors, donor.clone());
        Ok(donor)
    }

    pub async fn search_donors(&self, term: &str) -> Vec<Donor> {
        let donors = self.donors.read().await;
        search_donors(&donors, term).cloned().collect()
    }

    pub async fn stats(&self, requests: &[BloodRequest]) -> DashboardStats {
        let units = self.units.read().await;
        let donors = self.donors.read().await;
        dashboard_stats(
            &units,
            &donors,
            requests,
            self.clock.today(),
            self.critical_threshold,
        )
    }
}
