//! Host shell: owns the single active controller and swaps screens on navigation.

use std::sync::Arc;

use client_core::EmployeeService;
use shared::domain::PersonId;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    controller::{
        events::{ElementNode, FormAction, ListAction},
        form::FormController,
        list::ListController,
    },
    dialog::DialogHost,
    surface::Surface,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    EmployeeList,
    NewEmployee,
    EditEmployee(PersonId),
}

pub enum Screen {
    List(ListController),
    Form(FormController),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiInput {
    List(ListAction),
    ListClick(Vec<ElementNode>),
    Form(FormAction),
}

pub struct HostShell {
    service: Arc<dyn EmployeeService>,
    dialogs: Arc<dyn DialogHost>,
    active: Option<Screen>,
    route: Option<Route>,
    nav_tx: mpsc::UnboundedSender<Route>,
    nav_rx: mpsc::UnboundedReceiver<Route>,
}

impl HostShell {
    pub fn new(service: Arc<dyn EmployeeService>, dialogs: Arc<dyn DialogHost>) -> Self {
        let (nav_tx, nav_rx) = mpsc::unbounded_channel();
        Self {
            service,
            dialogs,
            active: None,
            route: None,
            nav_tx,
            nav_rx,
        }
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn active(&self) -> Option<&Screen> {
        self.active.as_ref()
    }

    pub async fn start(&mut self, surface: &mut dyn Surface) {
        self.navigate(Route::EmployeeList, surface).await;
    }

    /// Replaces the active controller. Routes requested while a screen renders are
    /// followed before returning.
    pub async fn navigate(&mut self, route: Route, surface: &mut dyn Surface) {
        let mut next = Some(route);
        while let Some(route) = next {
            // The old controller is gone before the new one touches the surface.
            self.active = None;
            info!(?route, "navigating");

            let mut screen = self.build(&route);
            match &mut screen {
                Screen::List(list) => list.render(surface).await,
                Screen::Form(form) => form.render(surface).await,
            }
            self.active = Some(screen);
            self.route = Some(route);
            next = self.take_pending_route();
        }
    }

    pub async fn dispatch(&mut self, input: UiInput, surface: &mut dyn Surface) {
        match (self.active.as_mut(), input) {
            (Some(Screen::List(list)), UiInput::List(action)) => list.handle(surface, action).await,
            (Some(Screen::List(list)), UiInput::ListClick(path)) => {
                list.click(surface, &path).await
            }
            (Some(Screen::Form(form)), UiInput::Form(action)) => form.handle(surface, action).await,
            (_, input) => warn!(?input, "input does not belong to the active screen"),
        }

        if let Some(route) = self.take_pending_route() {
            self.navigate(route, surface).await;
        }
    }

    fn take_pending_route(&mut self) -> Option<Route> {
        let mut last = None;
        while let Ok(route) = self.nav_rx.try_recv() {
            if let Some(skipped) = last.replace(route) {
                debug!(?skipped, "superseded navigation request");
            }
        }
        last
    }

    fn build(&self, route: &Route) -> Screen {
        match route {
            Route::EmployeeList => {
                let mut list = ListController::new(self.service.clone(), self.dialogs.clone());
                let tx = self.nav_tx.clone();
                list.set_on_add_employee(move || {
                    request(&tx, Route::NewEmployee);
                });
                let tx = self.nav_tx.clone();
                list.set_on_edit_employee(move |id| {
                    request(&tx, Route::EditEmployee(id.clone()));
                });
                Screen::List(list)
            }
            Route::NewEmployee | Route::EditEmployee(_) => {
                let employee_id = match route {
                    Route::EditEmployee(id) => Some(id.clone()),
                    _ => None,
                };
                let mut form =
                    FormController::new(employee_id, self.service.clone(), self.dialogs.clone());
                let tx = self.nav_tx.clone();
                form.set_on_cancel(move || {
                    request(&tx, Route::EmployeeList);
                });
                let tx = self.nav_tx.clone();
                form.set_on_save(move || {
                    request(&tx, Route::EmployeeList);
                });
                Screen::Form(form)
            }
        }
    }
}

fn request(tx: &mpsc::UnboundedSender<Route>, route: Route) {
    if let Err(err) = tx.send(route) {
        debug!(route = ?err.0, "navigation request after the shell went away");
    }
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
