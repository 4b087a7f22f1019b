//! Donor directory: search and registration.

use crate::domain::model::{BloodGroup, Donor, DonorStatus};
use crate::domain::ports::{Clock, SystemClock};
use crate::utils::error::{BloodBankError, Result};
use crate::utils::validation::IssueCollector;
use chrono::NaiveDate;

pub const MIN_DONOR_AGE: i64 = 18;
pub const MAX_DONOR_AGE: i64 = 65;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonorForm {
    pub name: String,
    pub age: i64,
    pub blood_group: String,
    pub contact: String,
    /// Defaults to the registration day when left blank.
    pub last_donation_date: Option<NaiveDate>,
}

impl Default for DonorForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: 25,
            blood_group: BloodGroup::OPositive.as_str().to_string(),
            contact: String::new(),
            last_donation_date: None,
        }
    }
}

/// Donors whose name contains `term`, or whose blood group does, ignoring
/// case. An empty term matches everyone.
pub fn search_donors<'a>(
    donors: &'a [Donor],
    term: &str,
) -> impl Iterator<Item = &'a Donor> + Clone + 'a {
    let needle = term.trim().to_lowercase();
    donors.iter().filter(move |donor| {
        donor.name.to_lowercase().contains(&needle)
            || donor.blood_group.as_str().to_lowercase().contains(&needle)
    })
}

pub fn register_donor(form: &DonorForm) -> Result<Donor> {
    register_donor_with_clock(form, &SystemClock)
}

pub fn register_donor_with_clock(form: &DonorForm, clock: &dyn Clock) -> Result<Donor> {
    let mut issues = IssueCollector::new();

    issues.require_non_empty("name", &form.name);
    issues.require_range("age", form.age, MIN_DONOR_AGE, MAX_DONOR_AGE);
    let blood_group = issues.parse("bloodGroup", form.blood_group.parse::<BloodGroup>());
    issues.require_non_empty("contact", &form.contact);
    issues.finish()?;

    let blood_group =
        blood_group.ok_or_else(|| BloodBankError::validation("bloodGroup", "is required"))?;
    let age = u8::try_from(form.age)
        .map_err(|_| BloodBankError::validation("age", "is out of range"))?;

    let donor = Donor {
        id: uuid::Uuid::new_v4().to_string(),
        name: form.name.trim().to_string(),
        age,
        blood_group,
        last_donation_date: form.last_donation_date.unwrap_or_else(|| clock.today()),
        contact: form.contact.trim().to_string(),
        status: DonorStatus::Active,
    };

    tracing::info!("🧑 Registered donor {} ({})", donor.name, donor.blood_group);
    Ok(donor)
}

/// 新增到名單最後，不修改原本的名單
pub fn add_donor(donors: &[Donor], donor: Donor) -> Vec<Donor> {
    let mut updated = donors.to_vec();
    updated.push(donor);
    updated
}

pub fn active_donors<'a>(donors: &'a [Donor]) -> impl Iterator<Item = &'a Donor> + Clone + 'a {
    donors.iter().filter(|donor| donor.is_active())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::FixedClock;

    fn form(age: i64) -> DonorForm {
        DonorForm {
            name: "Abena Owusu".into(),
            age,
            blood_group: "AB-".into(),
            contact: "+233 20 555 0199".into(),
            last_donation_date: None,
        }
    }

    fn donors() -> Vec<Donor> {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2023, 10, 25).unwrap());
        [("John Smith", "O+", 30), ("Sarah Connor", "A-", 41), ("Bob Ross", "AB+", 52)]
            .into_iter()
            .map(|(name, group, age)| {
                let form = DonorForm {
                    name: name.into(),
                    blood_group: group.into(),
                    ..form(age)
                };
                register_donor_with_clock(&form, &clock).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_age_bounds_are_inclusive() {
        assert!(register_donor(&form(17)).is_err());
        assert!(register_donor(&form(66)).is_err());
        assert!(register_donor(&form(18)).is_ok());
        assert!(register_donor(&form(65)).is_ok());
    }

    #[test]
    fn test_registered_donor_is_active_with_fresh_id() {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 1, 9).unwrap());
        let a = register_donor_with_clock(&form(30), &clock).unwrap();
        let b = register_donor_with_clock(&form(30), &clock).unwrap();
        assert_eq!(a.status, DonorStatus::Active);
        assert_eq!(a.blood_group, BloodGroup::AbNegative);
        assert_eq!(a.last_donation_date, clock.today());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_registration_reports_all_problems() {
        let bad = DonorForm {
            name: "".into(),
            age: 70,
            blood_group: "Q".into(),
            contact: "  ".into(),
            last_donation_date: None,
        };
        let err = register_donor(&bad).unwrap_err();
        let fields: Vec<&str> = err.issues().iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "age", "bloodGroup", "contact"]);
    }

    #[test]
    fn test_search_by_name_or_group() {
        let donors = donors();
        let names = |term: &str| -> Vec<String> {
            search_donors(&donors, term).map(|d| d.name.clone()).collect()
        };

        assert_eq!(names("sarah"), vec!["Sarah Connor"]);
        assert_eq!(names("AB+"), vec!["Bob Ross"]);
        assert_eq!(names("ab"), vec!["Bob Ross"]);
        assert_eq!(names("o"), vec!["John Smith", "Sarah Connor", "Bob Ross"]);
        assert_eq!(names("").len(), 3);
        assert!(names("zzz").is_empty());
    }

    #[test]
    fn test_add_donor_leaves_input_untouched() {
        let donors = donors();
        let newcomer = register_donor(&form(22)).unwrap();
        let updated = add_donor(&donors, newcomer.clone());
        assert_eq!(donors.len(), 3);
        assert_eq!(updated.last(), Some(&newcomer));

        let deferred = vec![donors[0].defer(), donors[1].clone()];
        assert_eq!(active_donors(&deferred).count(), 1);
    }
}
