//! Rendering surface capability: named templates, text slots, form fields and triggers.

use std::collections::{BTreeMap, HashMap, HashSet};

use shared::domain::{Employee, EmployeeStatus, PersonId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    Loading,
    EmployeeList,
    LoadError,
    EmployeeForm,
}

impl Template {
    pub fn marker(self) -> &'static str {
        match self {
            Self::Loading => "loading-template",
            Self::EmployeeList => "employee-list-template",
            Self::LoadError => "error-template",
            Self::EmployeeForm => "employee-form-template",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    FormTitle,
    SubmitLabel,
    BreadcrumbName,
    ErrorMessage,
}

impl Slot {
    pub fn marker(self) -> &'static str {
        match self {
            Self::FormTitle => "form-title",
            Self::SubmitLabel => "submit-btn",
            Self::BreadcrumbName => "breadcrumb-name",
            Self::ErrorMessage => "message",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Breadcrumb,
}

impl Region {
    pub fn marker(self) -> &'static str {
        match self {
            Self::Breadcrumb => "breadcrumb-container",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    FirstName,
    LastName,
    Ssn,
    EmployeeNo,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::Ssn,
        FormField::EmployeeNo,
    ];

    pub fn marker(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Ssn => "ssn",
            Self::EmployeeNo => "employeeNo",
        }
    }

    pub fn from_marker(marker: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.marker() == marker)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Ssn => "SSN",
            Self::EmployeeNo => "Employee number",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowField {
    EmployeeNo,
    FirstName,
    LastName,
    Status,
}

impl RowField {
    pub const ALL: [RowField; 4] = [
        RowField::EmployeeNo,
        RowField::FirstName,
        RowField::LastName,
        RowField::Status,
    ];

    pub fn marker(self) -> &'static str {
        match self {
            Self::EmployeeNo => "employeeNo",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Status => "status",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub person_id: PersonId,
    pub employee_no: String,
    pub first_name: String,
    pub last_name: String,
    pub status: EmployeeStatus,
}

impl RowView {
    pub fn cell(&self, field: RowField) -> &str {
        match field {
            RowField::EmployeeNo => &self.employee_no,
            RowField::FirstName => &self.first_name,
            RowField::LastName => &self.last_name,
            RowField::Status => self.status.label(),
        }
    }

    /// Style class applied to the status cell.
    pub fn status_class(&self) -> &'static str {
        self.status.css_class()
    }
}

impl From<&Employee> for RowView {
    fn from(employee: &Employee) -> Self {
        Self {
            person_id: employee.person_id.clone(),
            employee_no: employee.employee_no.clone(),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            status: employee.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Trigger {
    AddEmployee,
    Retry,
    EditRow(PersonId),
    DeleteRow(PersonId),
    Submit,
    Cancel,
}

impl Trigger {
    pub fn marker(&self) -> &'static str {
        match self {
            Self::AddEmployee => "add-employee-btn",
            Self::Retry => "retry-btn",
            Self::EditRow(_) => "btn-edit",
            Self::DeleteRow(_) => "btn-delete",
            Self::Submit => "employee-form",
            Self::Cancel => "back-btn",
        }
    }
}

/// The screen a controller draws into. Only one controller holds it at a time.
///
/// `mount` replaces the whole screen and drops every binding made against the
/// previous template. `flush` marks the end of a render pass.
pub trait Surface: Send {
    fn mount(&mut self, template: Template);
    fn set_text(&mut self, slot: Slot, text: &str);
    fn set_visible(&mut self, region: Region, visible: bool);
    fn append_row(&mut self, row: RowView);
    fn show_placeholder_row(&mut self, message: &str);
    fn set_field(&mut self, field: FormField, value: &str);
    fn field(&self, field: FormField) -> String;
    fn set_status_toggle(&mut self, active: bool);
    fn status_toggle(&self) -> bool;
    fn mark_field_error(&mut self, field: FormField, message: &str);
    fn clear_field_errors(&mut self);
    fn bind(&mut self, trigger: Trigger);
    fn flush(&mut self) {}
}

/// Retained in-memory surface. Keeps every mounted template in order.
#[derive(Debug, Default)]
pub struct MemorySurface {
    template: Option<Template>,
    mounts: Vec<Template>,
    texts: HashMap<Slot, String>,
    visible: HashSet<Region>,
    rows: Vec<RowView>,
    placeholder: Option<String>,
    fields: HashMap<FormField, String>,
    status_toggle: bool,
    field_errors: BTreeMap<FormField, String>,
    triggers: Vec<Trigger>,
    flushes: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn template(&self) -> Option<Template> {
        self.template
    }

    pub fn mounts(&self) -> &[Template] {
        &self.mounts
    }

    pub fn text(&self, slot: Slot) -> Option<&str> {
        self.texts.get(&slot).map(String::as_str)
    }

    pub fn is_visible(&self, region: Region) -> bool {
        self.visible.contains(&region)
    }

    pub fn rows(&self) -> &[RowView] {
        &self.rows
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn field_error(&self, field: FormField) -> Option<&str> {
        self.field_errors.get(&field).map(String::as_str)
    }

    pub fn field_errors(&self) -> &BTreeMap<FormField, String> {
        &self.field_errors
    }

    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    pub fn is_bound(&self, trigger: &Trigger) -> bool {
        self.triggers.contains(trigger)
    }

    pub fn flush_count(&self) -> usize {
        self.flushes
    }
}

impl Surface for MemorySurface {
    fn mount(&mut self, template: Template) {
        self.template = Some(template);
        self.mounts.push(template);
        self.texts.clear();
        self.visible.clear();
        self.rows.clear();
        self.placeholder = None;
        self.fields.clear();
        // Form markup ships with the status toggle checked.
        self.status_toggle = template == Template::EmployeeForm;
        self.field_errors.clear();
        self.triggers.clear();
    }

    fn set_text(&mut self, slot: Slot, text: &str) {
        self.texts.insert(slot, text.to_string());
    }

    fn set_visible(&mut self, region: Region, visible: bool) {
        if visible {
            self.visible.insert(region);
        } else {
            self.visible.remove(&region);
        }
    }

    fn append_row(&mut self, row: RowView) {
        self.rows.push(row);
    }

    fn show_placeholder_row(&mut self, message: &str) {
        self.rows.clear();
        self.placeholder = Some(message.to_string());
    }

    fn set_field(&mut self, field: FormField, value: &str) {
        self.fields.insert(field, value.to_string());
    }

    fn field(&self, field: FormField) -> String {
        self.fields.get(&field).cloned().unwrap_or_default()
    }

    fn set_status_toggle(&mut self, active: bool) {
        self.status_toggle = active;
    }

    fn status_toggle(&self) -> bool {
        self.status_toggle
    }

    fn mark_field_error(&mut self, field: FormField, message: &str) {
        self.field_errors.insert(field, message.to_string());
    }

    fn clear_field_errors(&mut self) {
        self.field_errors.clear();
    }

    fn bind(&mut self, trigger: Trigger) {
        if !self.triggers.contains(&trigger) {
            self.triggers.push(trigger);
        }
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}
