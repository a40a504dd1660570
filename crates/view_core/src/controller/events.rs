//! User actions delivered to controllers, and click delegation for row controls.

use shared::domain::PersonId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    AddEmployee,
    Retry,
    Edit(PersonId),
    Delete(PersonId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Submit,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowActionKind {
    Edit,
    Delete,
}

impl RowActionKind {
    pub fn marker(self) -> &'static str {
        match self {
            Self::Edit => "btn-edit",
            Self::Delete => "btn-delete",
        }
    }
}

/// One element on the path from a click target up to the document root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementNode {
    pub action: Option<RowActionKind>,
    pub person_id: Option<PersonId>,
}

impl ElementNode {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn action_control(kind: RowActionKind, person_id: PersonId) -> Self {
        Self {
            action: Some(kind),
            person_id: Some(person_id),
        }
    }
}

/// `path[0]` is the event target. The action comes from the nearest element carrying
/// an action marker; the id from the target itself, else from that action element.
pub fn resolve_row_action(path: &[ElementNode]) -> Option<ListAction> {
    let target = path.first()?;
    let control = path.iter().find(|node| node.action.is_some())?;
    let kind = control.action?;
    let person_id = target
        .person_id
        .clone()
        .or_else(|| control.person_id.clone())?;

    Some(match kind {
        RowActionKind::Edit => ListAction::Edit(person_id),
        RowActionKind::Delete => ListAction::Delete(person_id),
    })
}
