//! Blood-unit inventory: intake, lookup, removal and per-group counts.
//!
//! Every function takes the caller's collection by reference and hands back
//! new data; nothing here mutates the input.

use crate::domain::model::{BloodGroup, BloodUnit, UnitStatus, SHELF_LIFE_DAYS};
use crate::domain::ports::{Clock, SystemClock};
use crate::utils::error::{BloodBankError, Result};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Blood-group selector of the inventory filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupFilter {
    #[default]
    All,
    Only(BloodGroup),
}

impl GroupFilter {
    pub fn matches(&self, group: BloodGroup) -> bool {
        match self {
            GroupFilter::All => true,
            GroupFilter::Only(wanted) => *wanted == group,
        }
    }
}

impl FromStr for GroupFilter {
    type Err = <BloodGroup as FromStr>::Err;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(GroupFilter::All);
        }
        trimmed.parse().map(GroupFilter::Only)
    }
}

impl From<BloodGroup> for GroupFilter {
    fn from(group: BloodGroup) -> Self {
        GroupFilter::Only(group)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitFilter {
    group: GroupFilter,
    id_needle: String,
    status: Option<(UnitStatus, NaiveDate)>,
}

impl UnitFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_group(mut self, group: impl Into<GroupFilter>) -> Self {
        self.group = group.into();
        self
    }

    pub fn with_id_substring(mut self, id_substring: &str) -> Self {
        self.id_needle = id_substring.to_lowercase();
        self
    }

    /// Status is compared against the effective status on `as_of`, so units
    /// past their expiry date match `Expired`.
    pub fn with_status(mut self, status: UnitStatus, as_of: NaiveDate) -> Self {
        self.status = Some((status, as_of));
        self
    }

    pub fn matches(&self, unit: &BloodUnit) -> bool {
        if !self.group.matches(unit.blood_group) {
            return false;
        }
        if !self.id_needle.is_empty() && !unit.id.to_lowercase().contains(&self.id_needle) {
            return false;
        }
        match self.status {
            Some((status, as_of)) => unit.effective_status(as_of) == status,
            None => true,
        }
    }
}

/// Units matching `filter`, in input order. The iterator is `Clone`, so a
/// caller can restart it without re-filtering the source.
pub fn list_units<'a>(
    units: &'a [BloodUnit],
    filter: &'a UnitFilter,
) -> impl Iterator<Item = &'a BloodUnit> + Clone + 'a {
    units.iter().filter(move |unit| filter.matches(unit))
}

/// 新增血袋：採集日為今天，到期日為 42 天後
pub fn create_unit(blood_group: BloodGroup, volume: i64, status: UnitStatus) -> Result<BloodUnit> {
    create_unit_with_clock(blood_group, volume, status, &SystemClock)
}

pub fn create_unit_with_clock(
    blood_group: BloodGroup,
    volume: i64,
    status: UnitStatus,
    clock: &dyn Clock,
) -> Result<BloodUnit> {
    create_unit_on(blood_group, volume, status, clock.today())
}

pub fn create_unit_on(
    blood_group: BloodGroup,
    volume: i64,
    status: UnitStatus,
    collected_on: NaiveDate,
) -> Result<BloodUnit> {
    let volume = match u32::try_from(volume) {
        Ok(v) if v > 0 => v,
        _ => return Err(BloodBankError::validation("volume", "must be a positive number of ml")),
    };
    if status == UnitStatus::Expired {
        return Err(BloodBankError::validation(
            "status",
            "new units must be Available or Reserved",
        ));
    }

    let unit = BloodUnit {
        id: generate_unit_id(),
        blood_group,
        collection_date: collected_on,
        expiry_date: BloodUnit::expiry_for(collected_on),
        volume,
        status,
    };

    tracing::debug!(
        "🩸 Created unit {} ({}, {} ml, expires {})",
        unit.id,
        unit.blood_group,
        unit.volume,
        unit.expiry_date
    );
    Ok(unit)
}

fn generate_unit_id() -> String {
    format!("BU-{}", uuid::Uuid::new_v4().simple()).to_uppercase()
}

/// Collection without the unit `id`. An unknown id leaves the collection as is.
pub fn delete_unit(units: &[BloodUnit], id: &str) -> Vec<BloodUnit> {
    let remaining: Vec<BloodUnit> = units.iter().filter(|u| u.id != id).cloned().collect();
    if remaining.len() == units.len() {
        tracing::debug!("Unit {} not in inventory, nothing to delete", id);
    }
    remaining
}

fn empty_group_counts() -> BTreeMap<BloodGroup, usize> {
    BloodGroup::ALL.into_iter().map(|group| (group, 0)).collect()
}

/// 每個血型目前可用的袋數；八個血型一律出現，沒有庫存的為 0
///
/// Counts by effective status on `today`, so a unit stored as Available but
/// past its expiry date contributes nothing.
pub fn aggregate_by_group(units: &[BloodUnit], today: NaiveDate) -> BTreeMap<BloodGroup, usize> {
    let mut counts = empty_group_counts();
    for unit in units
        .iter()
        .filter(|u| u.effective_status(today) == UnitStatus::Available)
    {
        *counts.entry(unit.blood_group).or_insert(0) += 1;
    }
    counts
}

pub fn aggregate_by_group_with_clock(
    units: &[BloodUnit],
    clock: &dyn Clock,
) -> BTreeMap<BloodGroup, usize> {
    aggregate_by_group(units, clock.today())
}

/// Available units that expire within `days` of `today` (already expired ones excluded).
pub fn expiring_within<'a>(
    units: &'a [BloodUnit],
    today: NaiveDate,
    days: u32,
) -> impl Iterator<Item = &'a BloodUnit> + Clone + 'a {
    let horizon = today + Duration::days(i64::from(days));
    units.iter().filter(move |unit| {
        unit.effective_status(today) == UnitStatus::Available && unit.expiry_date <= horizon
    })
}

/// Total volume in ml of the units still usable on `today`.
pub fn usable_volume_ml(units: &[BloodUnit], today: NaiveDate) -> u64 {
    units
        .iter()
        .filter(|u| !u.is_expired(today))
        .map(|u| u64::from(u.volume))
        .sum()
}
