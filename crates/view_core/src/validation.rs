use std::{collections::BTreeMap, sync::LazyLock};

use chrono::{DateTime, Utc};
use regex::Regex;
use shared::{
    domain::{Employee, EmployeeStatus, PersonId},
    protocol::LAST_UPDATED_BY_PLACEHOLDER,
};
use thiserror::Error;

use crate::surface::{FormField, Surface};

pub const FIRST_NAME_REQUIRED: &str = "First name is required";
pub const LAST_NAME_REQUIRED: &str = "Last name is required";
pub const SSN_REQUIRED: &str = "SSN is required";
pub const SSN_FORMAT: &str = "SSN must be in format XXX-XX-XXXX (e.g., 111-11-1111)";
pub const EMPLOYEE_NO_REQUIRED: &str = "Employee number is required";

static SSN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}-[0-9]{2}-[0-9]{4}$").expect("valid SSN pattern"));

pub fn is_valid_ssn(ssn: &str) -> bool {
    SSN_PATTERN.is_match(ssn)
}

/// Field-level rule violations, all reported together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} form field(s) failed validation", .0.len())]
pub struct ValidationErrors(BTreeMap<FormField, &'static str>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: FormField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    fn add(&mut self, field: FormField, message: &'static str) {
        self.0.insert(field, message);
    }
}

/// Trimmed form values as read at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub first_name: String,
    pub last_name: String,
    pub ssn: String,
    pub employee_no: String,
    pub active: bool,
}

impl FormInput {
    pub fn read(surface: &dyn Surface) -> Self {
        Self {
            first_name: surface.field(FormField::FirstName).trim().to_string(),
            last_name: surface.field(FormField::LastName).trim().to_string(),
            ssn: surface.field(FormField::Ssn).trim().to_string(),
            employee_no: surface.field(FormField::EmployeeNo).trim().to_string(),
            active: surface.status_toggle(),
        }
    }

    /// Every rule is evaluated; nothing short-circuits.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.first_name.is_empty() {
            errors.add(FormField::FirstName, FIRST_NAME_REQUIRED);
        }
        if self.last_name.is_empty() {
            errors.add(FormField::LastName, LAST_NAME_REQUIRED);
        }
        if self.ssn.is_empty() {
            errors.add(FormField::Ssn, SSN_REQUIRED);
        } else if !is_valid_ssn(&self.ssn) {
            errors.add(FormField::Ssn, SSN_FORMAT);
        }
        if self.employee_no.is_empty() {
            errors.add(FormField::EmployeeNo, EMPLOYEE_NO_REQUIRED);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Builds the full record; both timestamps are stamped with `now`.
    pub fn into_employee(self, person_id: PersonId, now: DateTime<Utc>) -> Employee {
        Employee {
            person_id,
            first_name: self.first_name,
            last_name: self.last_name,
            ssn: self.ssn,
            employee_no: self.employee_no,
            employment_start_date: now,
            employment_end_date: None,
            status: EmployeeStatus::from_toggle(self.active),
            last_updated_by: LAST_UPDATED_BY_PLACEHOLDER.to_string(),
            last_updated_date: now,
        }
    }
}
