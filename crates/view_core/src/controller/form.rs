use std::sync::Arc;

use chrono::Utc;
use client_core::EmployeeService;
use shared::domain::{Employee, PersonId};
use tracing::{debug, info, warn};

use crate::{
    controller::{events::FormAction, Callback},
    dialog::DialogHost,
    surface::{FormField, Region, Slot, Surface, Template, Trigger},
    validation::{FormInput, ValidationErrors},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(PersonId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Rendering,
    Populating,
    Interactive,
    Submitting,
    Saved,
    Failed,
    /// The record to edit could not be loaded; the form was handed back to the shell.
    Abandoned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Ignored,
    Invalid(ValidationErrors),
    Saved(Employee),
    Failed(String),
}

pub struct FormController {
    mode: FormMode,
    service: Arc<dyn EmployeeService>,
    dialogs: Arc<dyn DialogHost>,
    state: FormState,
    on_cancel: Option<Callback>,
    on_save: Option<Callback>,
}

impl FormController {
    pub fn new(
        employee_id: Option<PersonId>,
        service: Arc<dyn EmployeeService>,
        dialogs: Arc<dyn DialogHost>,
    ) -> Self {
        let mode = match employee_id {
            Some(id) => FormMode::Edit(id),
            None => FormMode::Create,
        };
        Self {
            mode,
            service,
            dialogs,
            state: FormState::Idle,
            on_cancel: None,
            on_save: None,
        }
    }

    pub fn set_on_cancel(&mut self, callback: impl Fn() + Send + Sync + 'static) {
        self.on_cancel = Some(Box::new(callback));
    }

    pub fn set_on_save(&mut self, callback: impl Fn() + Send + Sync + 'static) {
        self.on_save = Some(Box::new(callback));
    }

    pub fn is_edit_mode(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// Submit and cancel are only bound once rendering (and loading) has finished.
    pub fn is_interactive(&self) -> bool {
        matches!(self.state, FormState::Interactive | FormState::Failed)
    }

    pub async fn render(&mut self, surface: &mut dyn Surface) {
        self.state = FormState::Rendering;
        self.render_shell(surface);

        if let FormMode::Edit(id) = self.mode.clone() {
            self.state = FormState::Populating;
            match self.service.get_by_key(&id).await {
                Ok(employee) => populate(surface, &employee),
                Err(err) => {
                    self.dialogs
                        .notify_error(&format!("Error loading employee: {err}"))
                        .await;
                    self.state = FormState::Abandoned;
                    warn!(person_id = %id, "abandoning edit form after failed load");
                    self.fire_cancel();
                    return;
                }
            }
        }

        surface.bind(Trigger::Submit);
        surface.bind(Trigger::Cancel);
        surface.flush();
        self.state = FormState::Interactive;
        debug!(edit = self.is_edit_mode(), "employee form interactive");
    }

    fn render_shell(&self, surface: &mut dyn Surface) {
        let (title, submit_label) = if self.is_edit_mode() {
            ("Edit Employee", "UPDATE")
        } else {
            ("Add Employee", "SAVE")
        };

        surface.mount(Template::EmployeeForm);
        surface.set_text(Slot::FormTitle, title);
        surface.set_text(Slot::SubmitLabel, submit_label);
        surface.set_visible(Region::Breadcrumb, self.is_edit_mode());
        surface.flush();
    }

    pub async fn handle(&mut self, surface: &mut dyn Surface, action: FormAction) {
        match action {
            FormAction::Submit => {
                self.submit(surface).await;
            }
            FormAction::Cancel => self.cancel(),
        }
    }

    pub async fn submit(&mut self, surface: &mut dyn Surface) -> SubmitOutcome {
        if !self.is_interactive() {
            warn!(state = ?self.state, "submit ignored; form is not interactive");
            return SubmitOutcome::Ignored;
        }

        surface.clear_field_errors();
        let input = FormInput::read(&*surface);
        if let Err(errors) = input.validate() {
            for (field, message) in errors.iter() {
                surface.mark_field_error(field, message);
            }
            surface.flush();
            debug!(failed = errors.len(), "employee form failed validation");
            return SubmitOutcome::Invalid(errors);
        }

        let now = Utc::now();
        let (person_id, is_update) = match &self.mode {
            FormMode::Edit(id) => (id.clone(), true),
            FormMode::Create => (PersonId::generate(), false),
        };
        let employee = input.into_employee(person_id, now);

        self.state = FormState::Submitting;
        let (result, success_message) = if is_update {
            (
                self.service.update(&employee).await.map(|_| ()),
                "Employee updated successfully!",
            )
        } else {
            (
                self.service.create(&employee).await.map(|_| ()),
                "Employee created successfully!",
            )
        };

        match result {
            Ok(()) => {
                info!(person_id = %employee.person_id, update = is_update, "employee saved");
                self.dialogs.notify_success(success_message).await;
                self.state = FormState::Saved;
                if let Some(callback) = &self.on_save {
                    callback();
                }
                SubmitOutcome::Saved(employee)
            }
            Err(err) => {
                let message = format!("Error saving employee: {err}");
                self.dialogs.notify_error(&message).await;
                self.state = FormState::Failed;
                SubmitOutcome::Failed(message)
            }
        }
    }

    pub fn cancel(&mut self) {
        if !self.is_interactive() {
            warn!(state = ?self.state, "cancel ignored; form is not interactive");
            return;
        }
        self.fire_cancel();
    }

    fn fire_cancel(&self) {
        if let Some(callback) = &self.on_cancel {
            callback();
        }
    }
}

fn populate(surface: &mut dyn Surface, employee: &Employee) {
    surface.set_field(FormField::FirstName, &employee.first_name);
    surface.set_field(FormField::LastName, &employee.last_name);
    surface.set_field(FormField::Ssn, &employee.ssn);
    surface.set_field(FormField::EmployeeNo, &employee.employee_no);
    surface.set_status_toggle(employee.status.is_active());
    surface.set_text(Slot::BreadcrumbName, &employee.full_name());
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
