//! User directory kept by the API server.

use crate::domain::model::{AppUser, BloodGroup, NewUser, Sex};
use crate::utils::error::{BloodBankError, Result};
use crate::utils::validation::IssueCollector;

pub const MIN_USER_AGE: i64 = 18;
const MAX_USER_AGE: i64 = 120;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserForm {
    pub full_name: String,
    pub age: i64,
    pub sex: String,
    pub blood_group: String,
    pub email: String,
    pub phone_number: String,
    pub full_address: String,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            age: MIN_USER_AGE,
            sex: "Male".to_string(),
            blood_group: BloodGroup::OPositive.as_str().to_string(),
            email: String::new(),
            phone_number: String::new(),
            full_address: String::new(),
        }
    }
}

/// Validate `form` and turn it into the body of `POST /users`.
pub fn build_user_payload(form: &UserForm) -> Result<NewUser> {
    let mut issues = IssueCollector::new();

    issues.require_non_empty("fullName", &form.full_name);
    issues.require_range("age", form.age, MIN_USER_AGE, MAX_USER_AGE);
    let sex = issues.parse("sex", form.sex.parse::<Sex>());
    let blood_group = issues.parse("bloodGroup", form.blood_group.parse::<BloodGroup>());
    issues.require_email("email", &form.email);
    issues.require_non_empty("phoneNumber", &form.phone_number);
    issues.require_non_empty("fullAddress", &form.full_address);
    issues.finish()?;

    let sex = sex.ok_or_else(|| BloodBankError::validation("sex", "is required"))?;
    let blood_group =
        blood_group.ok_or_else(|| BloodBankError::validation("bloodGroup", "is required"))?;
    let age =
        u8::try_from(form.age).map_err(|_| BloodBankError::validation("age", "is out of range"))?;

    Ok(NewUser {
        full_name: form.full_name.trim().to_string(),
        age,
        sex,
        blood_group,
        email: form.email.trim().to_string(),
        phone_number: form.phone_number.trim().to_string(),
        full_address: form.full_address.trim().to_string(),
    })
}

/// 以姓名、Email、血型做不分大小寫的搜尋
pub fn search_users<'a>(
    users: &'a [AppUser],
    term: &str,
) -> impl Iterator<Item = &'a AppUser> + Clone + 'a {
    let needle = term.trim().to_lowercase();
    users.iter().filter(move |user| {
        format!("{} {} {}", user.full_name, user.email, user.blood_group)
            .to_lowercase()
            .contains(&needle)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64, name: &str, email: &str, group: BloodGroup) -> AppUser {
        AppUser {
            id,
            full_name: name.into(),
            age: 34,
            sex: "Female".into(),
            blood_group: group,
            email: email.into(),
            phone_number: "555-0100".into(),
            full_address: "12 Ring Road".into(),
        }
    }

    #[test]
    fn test_build_user_payload() {
        let form = UserForm {
            full_name: " Efua Asante ".into(),
            age: 29,
            sex: "female".into(),
            blood_group: "b-".into(),
            email: "efua@example.com".into(),
            phone_number: "555-0142".into(),
            full_address: "4 Palm Street, Accra".into(),
        };
        let payload = build_user_payload(&form).unwrap();
        assert_eq!(payload.full_name, "Efua Asante");
        assert_eq!(payload.sex, Sex::Female);
        assert_eq!(payload.blood_group, BloodGroup::BNegative);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["fullName"], "Efua Asante");
        assert_eq!(json["bloodGroup"], "B-");
        assert_eq!(json["phoneNumber"], "555-0142");
    }

    #[test]
    fn test_default_form_reports_missing_fields() {
        let err = build_user_payload(&UserForm::default()).unwrap_err();
        let fields: Vec<&str> = err.issues().iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["fullName", "email", "phoneNumber", "fullAddress"]);
    }

    #[test]
    fn test_search_users_across_fields() {
        let users = vec![
            user(1, "Kwame Nkrumah", "kwame@gh.org", BloodGroup::OPositive),
            user(2, "Ama Ata", "ama@writers.net", BloodGroup::AbNegative),
        ];

        let ids = |term: &str| -> Vec<u64> { search_users(&users, term).map(|u| u.id).collect() };
        assert_eq!(ids("KWAME"), vec![1]);
        assert_eq!(ids("writers"), vec![2]);
        assert_eq!(ids("ab-"), vec![2]);
        assert_eq!(ids(""), vec![1, 2]);
        assert_eq!(ids(" kwame\t"), vec![1]);
    }
}
