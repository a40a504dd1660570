use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::DomainError,
    protocol::{optional_timestamp, timestamp},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Fresh random v4 identifier in the canonical 36-character layout.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub fn from_toggle(active: bool) -> Self {
        if active {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    pub fn is_active(self) -> bool {
        self == Self::Active
    }

    pub fn code(self) -> i64 {
        match self {
            Self::Active => 0,
            Self::Inactive => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Active => "status-active",
            Self::Inactive => "status-inactive",
        }
    }
}

impl TryFrom<i64> for EmployeeStatus {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Active),
            1 => Ok(Self::Inactive),
            other => Err(DomainError::InvalidStatus(other)),
        }
    }
}

impl From<EmployeeStatus> for i64 {
    fn from(value: EmployeeStatus) -> Self {
        value.code()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Employee {
    #[serde(rename = "PersonID")]
    pub person_id: PersonId,
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "SSN")]
    pub ssn: String,
    pub employee_no: String,
    #[serde(with = "timestamp")]
    pub employment_start_date: DateTime<Utc>,
    #[serde(default, with = "optional_timestamp")]
    pub employment_end_date: Option<DateTime<Utc>>,
    pub status: EmployeeStatus,
    pub last_updated_by: String,
    #[serde(with = "timestamp")]
    pub last_updated_date: DateTime<Utc>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn sample() -> Employee {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        Employee {
            person_id: PersonId::new("4a1f0c2e-8b5d-4e3a-9f6b-1c2d3e4f5a6b"),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            ssn: "111-11-1111".to_string(),
            employee_no: "E-100".to_string(),
            employment_start_date: ts,
            employment_end_date: None,
            status: EmployeeStatus::Active,
            last_updated_by: "testUser".to_string(),
            last_updated_date: ts,
        }
    }

    #[test]
    fn serializes_with_resource_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "PersonID": "4a1f0c2e-8b5d-4e3a-9f6b-1c2d3e4f5a6b",
                "FirstName": "Ada",
                "LastName": "Lovelace",
                "SSN": "111-11-1111",
                "EmployeeNo": "E-100",
                "EmploymentStartDate": "2024-01-02T03:04:05.000Z",
                "EmploymentEndDate": null,
                "Status": 0,
                "LastUpdatedBy": "testUser",
                "LastUpdatedDate": "2024-01-02T03:04:05.000Z"
            })
        );
    }

    #[test]
    fn decodes_server_shape_without_end_date() {
        let employee: Employee = serde_json::from_value(json!({
            "PersonID": "abc",
            "FirstName": "Grace",
            "LastName": "Hopper",
            "SSN": "222-22-2222",
            "EmployeeNo": "E-7",
            "EmploymentStartDate": "2023-06-01T00:00:00",
            "Status": 1,
            "LastUpdatedBy": "someone",
            "LastUpdatedDate": "2023-06-01T08:00:00Z"
        }))
        .unwrap();

        assert_eq!(employee.status, EmployeeStatus::Inactive);
        assert_eq!(employee.employment_end_date, None);
        assert_eq!(employee.full_name(), "Grace Hopper");
    }

    #[test]
    fn rejects_status_outside_active_inactive() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["Status"] = json!(2);
        let err = serde_json::from_value::<Employee>(value).unwrap_err();
        assert!(err.to_string().contains("invalid employee status code 2"));
    }

    #[test]
    fn status_label_is_active_only_for_code_zero() {
        for code in [0_i64, 1] {
            let status = EmployeeStatus::try_from(code).unwrap();
            assert_eq!(status.label() == "Active", code == 0);
            assert_eq!(i64::from(status), code);
        }
        assert_eq!(EmployeeStatus::from_toggle(true), EmployeeStatus::Active);
        assert_eq!(EmployeeStatus::from_toggle(false), EmployeeStatus::Inactive);
    }

    #[test]
    fn generated_ids_are_canonical_v4() {
        let id = PersonId::generate();
        let raw = id.as_str();
        assert_eq!(raw.len(), 36);
        let groups: Vec<usize> = raw.split('-').map(str::len).collect();
        assert_eq!(groups, vec![8, 4, 4, 4, 12]);
        assert_eq!(raw.as_bytes()[14], b'4');
        assert!(raw.chars().all(|c| c == '-' || c.is_ascii_hexdigit()));
        assert_ne!(id, PersonId::generate());
    }
}
