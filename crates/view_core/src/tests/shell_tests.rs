use super::*;

use shared::domain::EmployeeStatus;

use crate::{
    controller::{events::RowActionKind, form::FormState, list::ListState},
    dialog::DialogKind,
    surface::{FormField, MemorySurface, Slot, Template},
    test_support::{employee, FakeEmployeeService, Op, ScriptedDialogs},
};

fn shell_with(service: &Arc<FakeEmployeeService>, dialogs: &Arc<ScriptedDialogs>) -> HostShell {
    HostShell::new(service.clone(), dialogs.clone())
}

fn seeded() -> Arc<FakeEmployeeService> {
    FakeEmployeeService::with_records(vec![employee(
        "p-1",
        "Ada",
        "Lovelace",
        EmployeeStatus::Active,
    )])
}

#[tokio::test]
async fn start_shows_the_employee_list() {
    let service = seeded();
    let dialogs = ScriptedDialogs::new();
    let mut shell = shell_with(&service, &dialogs);
    let mut surface = MemorySurface::new();

    shell.start(&mut surface).await;

    assert_eq!(shell.route(), Some(&Route::EmployeeList));
    assert!(matches!(
        shell.active(),
        Some(Screen::List(list)) if list.state() == ListState::Ready
    ));
    assert_eq!(surface.template(), Some(Template::EmployeeList));
}

#[tokio::test]
async fn add_swaps_in_a_create_form_and_cancel_swaps_back() {
    let service = seeded();
    let dialogs = ScriptedDialogs::new();
    let mut shell = shell_with(&service, &dialogs);
    let mut surface = MemorySurface::new();
    shell.start(&mut surface).await;

    shell
        .dispatch(UiInput::List(ListAction::AddEmployee), &mut surface)
        .await;

    assert_eq!(shell.route(), Some(&Route::NewEmployee));
    assert_eq!(surface.text(Slot::FormTitle), Some("Add Employee"));

    shell
        .dispatch(UiInput::Form(FormAction::Cancel), &mut surface)
        .await;

    assert_eq!(shell.route(), Some(&Route::EmployeeList));
    assert_eq!(surface.template(), Some(Template::EmployeeList));
    assert_eq!(service.count(Op::GetAll), 2);
}

#[tokio::test]
async fn edit_click_opens_populated_form_and_save_returns_to_fresh_list() {
    let service = seeded();
    let dialogs = ScriptedDialogs::new();
    let mut shell = shell_with(&service, &dialogs);
    let mut surface = MemorySurface::new();
    shell.start(&mut surface).await;

    let path = vec![
        ElementNode::plain(),
        ElementNode::action_control(RowActionKind::Edit, PersonId::new("p-1")),
    ];
    shell.dispatch(UiInput::ListClick(path), &mut surface).await;

    assert_eq!(shell.route(), Some(&Route::EditEmployee(PersonId::new("p-1"))));
    assert_eq!(surface.field(FormField::FirstName), "Ada");

    surface.set_field(FormField::LastName, "King");
    shell
        .dispatch(UiInput::Form(FormAction::Submit), &mut surface)
        .await;

    assert_eq!(shell.route(), Some(&Route::EmployeeList));
    assert_eq!(surface.rows().len(), 1);
    assert_eq!(surface.rows()[0].last_name, "King");
    assert_eq!(service.records()[0].last_name, "King");
    assert_eq!(
        dialogs.shown_of(DialogKind::Success),
        vec!["Employee updated successfully!"]
    );
}

#[tokio::test]
async fn failed_edit_load_falls_back_to_the_list() {
    let service = seeded();
    let dialogs = ScriptedDialogs::new();
    let mut shell = shell_with(&service, &dialogs);
    let mut surface = MemorySurface::new();
    shell.start(&mut surface).await;
    service.fail_next(Op::GetByKey, 404);

    shell
        .dispatch(
            UiInput::List(ListAction::Edit(PersonId::new("p-1"))),
            &mut surface,
        )
        .await;

    assert_eq!(shell.route(), Some(&Route::EmployeeList));
    assert_eq!(surface.template(), Some(Template::EmployeeList));
    assert_eq!(
        dialogs.shown_of(DialogKind::Error),
        vec!["Error loading employee: HTTP error. Status: 404"]
    );
    assert_eq!(
        surface.mounts(),
        &[
            Template::Loading,
            Template::EmployeeList,
            Template::EmployeeForm,
            Template::Loading,
            Template::EmployeeList
        ]
    );
}

#[tokio::test]
async fn failed_save_stays_on_the_form() {
    let service = seeded();
    service.fail_next(Op::Create, 500);
    let dialogs = ScriptedDialogs::new();
    let mut shell = shell_with(&service, &dialogs);
    let mut surface = MemorySurface::new();
    shell.navigate(Route::NewEmployee, &mut surface).await;
    surface.set_field(FormField::FirstName, "Alan");
    surface.set_field(FormField::LastName, "Turing");
    surface.set_field(FormField::Ssn, "222-22-2222");
    surface.set_field(FormField::EmployeeNo, "E-2");

    shell
        .dispatch(UiInput::Form(FormAction::Submit), &mut surface)
        .await;

    assert_eq!(shell.route(), Some(&Route::NewEmployee));
    assert!(matches!(
        shell.active(),
        Some(Screen::Form(form)) if form.state() == FormState::Failed
    ));
    assert_eq!(surface.field(FormField::FirstName), "Alan");
}

#[tokio::test]
async fn input_for_another_screen_is_ignored() {
    let service = seeded();
    let dialogs = ScriptedDialogs::new();
    let mut shell = shell_with(&service, &dialogs);
    let mut surface = MemorySurface::new();
    shell.start(&mut surface).await;

    shell
        .dispatch(UiInput::Form(FormAction::Cancel), &mut surface)
        .await;

    assert_eq!(shell.route(), Some(&Route::EmployeeList));
    assert_eq!(service.count(Op::GetAll), 1);
}

#[test]
fn navigation_request_after_the_shell_is_gone_is_dropped() {
    let (tx, rx) = mpsc::unbounded_channel();
    drop(rx);

    request(&tx, Route::EmployeeList);

    assert!(tx.is_closed());
}
