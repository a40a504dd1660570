//! Controller layer: one state machine per screen, driven by surface triggers.

pub mod events;
pub mod form;
pub mod list;

pub use events::{resolve_row_action, ElementNode, FormAction, ListAction, RowActionKind};

use shared::domain::PersonId;

pub type Callback = Box<dyn Fn() + Send + Sync>;
pub type IdCallback = Box<dyn Fn(&PersonId) + Send + Sync>;
