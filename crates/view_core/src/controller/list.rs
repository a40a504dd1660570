use std::sync::Arc;

use client_core::EmployeeService;
use shared::domain::{Employee, PersonId};
use tracing::{debug, info, warn};

use crate::{
    controller::{
        events::{resolve_row_action, ElementNode, ListAction},
        Callback, IdCallback,
    },
    dialog::DialogHost,
    surface::{RowView, Slot, Surface, Template, Trigger},
};

pub const EMPTY_LIST_MESSAGE: &str = "No employees found";
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this employee?";
pub const DELETE_SUCCESS: &str = "Employee deleted successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    Idle,
    Loading,
    Ready,
    Failed,
}

pub struct ListController {
    service: Arc<dyn EmployeeService>,
    dialogs: Arc<dyn DialogHost>,
    state: ListState,
    employees: Vec<Employee>,
    load_error: Option<String>,
    on_add_employee: Option<Callback>,
    on_edit_employee: Option<IdCallback>,
}

impl ListController {
    pub fn new(service: Arc<dyn EmployeeService>, dialogs: Arc<dyn DialogHost>) -> Self {
        Self {
            service,
            dialogs,
            state: ListState::Idle,
            employees: Vec::new(),
            load_error: None,
            on_add_employee: None,
            on_edit_employee: None,
        }
    }

    pub fn set_on_add_employee(&mut self, callback: impl Fn() + Send + Sync + 'static) {
        self.on_add_employee = Some(Box::new(callback));
    }

    pub fn set_on_edit_employee(&mut self, callback: impl Fn(&PersonId) + Send + Sync + 'static) {
        self.on_edit_employee = Some(Box::new(callback));
    }

    pub fn state(&self) -> ListState {
        self.state
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Shows the loading placeholder, fetches a fresh snapshot and draws it.
    pub async fn render(&mut self, surface: &mut dyn Surface) {
        self.state = ListState::Loading;
        self.load_error = None;
        surface.mount(Template::Loading);
        surface.flush();
        debug!("loading employee list");

        match self.service.get_all().await {
            Ok(employees) => {
                self.employees = employees;
                self.state = ListState::Ready;
                self.render_view(surface);
            }
            Err(err) => {
                self.state = ListState::Failed;
                self.render_error(surface, err.to_string());
            }
        }
    }

    fn render_view(&self, surface: &mut dyn Surface) {
        surface.mount(Template::EmployeeList);

        if self.employees.is_empty() {
            surface.show_placeholder_row(EMPTY_LIST_MESSAGE);
        } else {
            for employee in &self.employees {
                surface.append_row(RowView::from(employee));
            }
        }

        surface.bind(Trigger::AddEmployee);
        for employee in &self.employees {
            surface.bind(Trigger::EditRow(employee.person_id.clone()));
            surface.bind(Trigger::DeleteRow(employee.person_id.clone()));
        }
        surface.flush();
        debug!(count = self.employees.len(), "employee list rendered");
    }

    fn render_error(&mut self, surface: &mut dyn Surface, message: String) {
        surface.mount(Template::LoadError);
        surface.set_text(Slot::ErrorMessage, &message);
        surface.bind(Trigger::Retry);
        surface.flush();
        warn!(error = %message, "employee list failed to load");
        self.load_error = Some(message);
    }

    pub async fn handle(&mut self, surface: &mut dyn Surface, action: ListAction) {
        match (self.state, action) {
            (ListState::Ready, ListAction::AddEmployee) => {
                if let Some(callback) = &self.on_add_employee {
                    callback();
                }
            }
            (ListState::Ready, ListAction::Edit(id)) if self.contains(&id) => {
                if let Some(callback) = &self.on_edit_employee {
                    callback(&id);
                }
            }
            (ListState::Ready, ListAction::Delete(id)) if self.contains(&id) => {
                self.delete_employee(surface, id).await;
            }
            (ListState::Failed, ListAction::Retry) => self.render(surface).await,
            (state, action) => {
                warn!(?state, ?action, "ignoring list action with no bound trigger");
            }
        }
    }

    /// Event delegation entry point for row controls; `path` starts at the click target.
    pub async fn click(&mut self, surface: &mut dyn Surface, path: &[ElementNode]) {
        match resolve_row_action(path) {
            Some(action) => self.handle(surface, action).await,
            None => debug!("click did not land on a row action"),
        }
    }

    fn contains(&self, id: &PersonId) -> bool {
        self.employees.iter().any(|employee| &employee.person_id == id)
    }

    async fn delete_employee(&mut self, surface: &mut dyn Surface, id: PersonId) {
        if !self.dialogs.confirm(DELETE_CONFIRMATION).await {
            debug!(person_id = %id, "delete declined");
            return;
        }

        match self.service.delete(&id).await {
            Ok(()) => {
                info!(person_id = %id, "employee deleted");
                self.dialogs.notify_success(DELETE_SUCCESS).await;
                self.render(surface).await;
            }
            Err(err) => {
                // Rows stay as they were before the attempt.
                self.dialogs
                    .notify_error(&format!("Error deleting employee: {err}"))
                    .await;
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/list_tests.rs"]
mod tests;
