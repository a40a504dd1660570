//! Line-oriented terminal host: draws the surface on every flush and turns typed
//! commands into shell input.

use std::{fmt::Write as _, io::Write as _, sync::Arc};

use tokio::{
    io::{AsyncBufReadExt, BufReader, Lines, Stdin},
    sync::Mutex,
};
use tracing::warn;
use view_core::{
    controller::{ElementNode, FormAction, ListAction, RowActionKind},
    surface::{FormField, Region, RowField, RowView, Slot, Template, Trigger},
    MemorySurface, Surface, UiInput,
};

/// Stdin shared between the command loop and the dialog presenter.
pub type SharedInput = Arc<Mutex<Lines<BufReader<Stdin>>>>;

pub fn shared_stdin() -> SharedInput {
    Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines()))
}

pub async fn next_line(input: &SharedInput) -> std::io::Result<Option<String>> {
    input.lock().await.next_line().await
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(UiInput),
    SetField(FormField, String),
    ToggleStatus,
    Help,
    Quit,
}

/// Interprets one typed line against whatever template is currently mounted.
pub fn parse_command(
    template: Option<Template>,
    rows: &[RowView],
    line: &str,
) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb {
        "q" | "quit" => return Ok(Command::Quit),
        "?" | "help" => return Ok(Command::Help),
        _ => {}
    }

    match template {
        Some(Template::EmployeeList) => match verb {
            "a" | "add" => Ok(Command::Dispatch(UiInput::List(ListAction::AddEmployee))),
            "e" | "edit" => row_click(RowActionKind::Edit, rows, rest),
            "d" | "delete" => row_click(RowActionKind::Delete, rows, rest),
            _ => Err(format!("unknown command `{verb}`")),
        },
        Some(Template::LoadError) => match verb {
            "r" | "retry" => Ok(Command::Dispatch(UiInput::List(ListAction::Retry))),
            _ => Err(format!("unknown command `{verb}`")),
        },
        Some(Template::EmployeeForm) => match verb {
            "set" => {
                let (marker, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let field = FormField::from_marker(marker)
                    .ok_or_else(|| format!("unknown field `{marker}`"))?;
                Ok(Command::SetField(field, value.trim().to_string()))
            }
            "toggle" => Ok(Command::ToggleStatus),
            "s" | "submit" => Ok(Command::Dispatch(UiInput::Form(FormAction::Submit))),
            "c" | "cancel" => Ok(Command::Dispatch(UiInput::Form(FormAction::Cancel))),
            _ => Err(format!("unknown command `{verb}`")),
        },
        Some(Template::Loading) | None => Err("still loading".to_string()),
    }
}

/// Row buttons hold an icon; a typed row command clicks that icon.
fn row_click(kind: RowActionKind, rows: &[RowView], arg: &str) -> Result<Command, String> {
    let index: usize = arg
        .parse()
        .map_err(|_| format!("expected a row number, got `{arg}`"))?;
    let row = index
        .checked_sub(1)
        .and_then(|i| rows.get(i))
        .ok_or_else(|| format!("no row {index}"))?;
    Ok(Command::Dispatch(UiInput::ListClick(vec![
        ElementNode::plain(),
        ElementNode::action_control(kind, row.person_id.clone()),
    ])))
}

pub fn help_text(template: Option<Template>) -> &'static str {
    match template {
        Some(Template::EmployeeList) => "a | e <row> | d <row> | q",
        Some(Template::LoadError) => "r | q",
        Some(Template::EmployeeForm) => "set <field> <value> | toggle | submit | cancel | q",
        Some(Template::Loading) | None => "q",
    }
}

/// Retained surface that redraws to stdout at the end of every render pass.
#[derive(Debug, Default)]
pub struct ConsoleSurface {
    view: MemorySurface,
}

impl ConsoleSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &MemorySurface {
        &self.view
    }
}

impl Surface for ConsoleSurface {
    fn mount(&mut self, template: Template) {
        self.view.mount(template);
    }

    fn set_text(&mut self, slot: Slot, text: &str) {
        self.view.set_text(slot, text);
    }

    fn set_visible(&mut self, region: Region, visible: bool) {
        self.view.set_visible(region, visible);
    }

    fn append_row(&mut self, row: RowView) {
        self.view.append_row(row);
    }

    fn show_placeholder_row(&mut self, message: &str) {
        self.view.show_placeholder_row(message);
    }

    fn set_field(&mut self, field: FormField, value: &str) {
        self.view.set_field(field, value);
    }

    fn field(&self, field: FormField) -> String {
        self.view.field(field)
    }

    fn set_status_toggle(&mut self, active: bool) {
        self.view.set_status_toggle(active);
    }

    fn status_toggle(&self) -> bool {
        self.view.status_toggle()
    }

    fn mark_field_error(&mut self, field: FormField, message: &str) {
        self.view.mark_field_error(field, message);
    }

    fn clear_field_errors(&mut self) {
        self.view.clear_field_errors();
    }

    fn bind(&mut self, trigger: Trigger) {
        self.view.bind(trigger);
    }

    fn flush(&mut self) {
        self.view.flush();
        let screen = draw(&self.view);
        let mut out = std::io::stdout().lock();
        if let Err(err) = out.write_all(screen.as_bytes()).and_then(|_| out.flush()) {
            warn!(%err, "failed to draw screen");
        }
    }
}

pub fn draw(view: &MemorySurface) -> String {
    let mut screen = String::from("\n");
    match view.template() {
        Some(Template::Loading) => screen.push_str("Loading employees...\n"),
        Some(Template::EmployeeList) => draw_list(view, &mut screen),
        Some(Template::LoadError) => {
            let _ = writeln!(
                screen,
                "Failed to load employees: {}",
                view.text(Slot::ErrorMessage).unwrap_or_default()
            );
        }
        Some(Template::EmployeeForm) => draw_form(view, &mut screen),
        None => {}
    }
    if view.template().is_some_and(|template| template != Template::Loading) {
        let _ = writeln!(screen, "[{}]", help_text(view.template()));
    }
    screen
}

const COLUMN_WIDTHS: [usize; 4] = [12, 16, 16, 10];

fn draw_list(view: &MemorySurface, screen: &mut String) {
    let _ = writeln!(
        screen,
        "  {:>3}  {:<12} {:<16} {:<16} {}",
        "#", "Employee No", "First name", "Last name", "Status"
    );
    if let Some(message) = view.placeholder() {
        let _ = writeln!(screen, "  {message}");
        return;
    }
    for (index, row) in view.rows().iter().enumerate() {
        let _ = write!(screen, "  {:>3} ", index + 1);
        for (field, width) in RowField::ALL.into_iter().zip(COLUMN_WIDTHS) {
            let _ = write!(screen, " {:<width$}", row.cell(field));
        }
        let _ = writeln!(screen, " [{}]", row.status_class());
    }
}

fn draw_form(view: &MemorySurface, screen: &mut String) {
    if view.is_visible(Region::Breadcrumb) {
        let _ = writeln!(
            screen,
            "Employees > {}",
            view.text(Slot::BreadcrumbName).unwrap_or_default()
        );
    }
    let _ = writeln!(screen, "{}", view.text(Slot::FormTitle).unwrap_or_default());
    for field in FormField::ALL {
        let _ = write!(
            screen,
            "  {:<16} ({:<10}) {}",
            field.label(),
            field.marker(),
            view.field(field)
        );
        if let Some(message) = view.field_error(field) {
            let _ = write!(screen, "  ! {message}");
        }
        screen.push('\n');
    }
    let status = if view.status_toggle() { "Active" } else { "Inactive" };
    let _ = writeln!(screen, "  {:<16} {status}", "Status");
    let _ = writeln!(
        screen,
        "  submit = {}",
        view.text(Slot::SubmitLabel).unwrap_or_default()
    );
}
