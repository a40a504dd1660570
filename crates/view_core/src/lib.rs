//! View orchestration for the employee records screens: list and form controllers,
//! the dialog protocol they share, and the shell that swaps between them.

pub mod controller;
pub mod dialog;
pub mod shell;
pub mod surface;
pub mod validation;

pub use controller::{
    form::{FormController, FormMode, FormState, SubmitOutcome},
    list::{ListController, ListState},
    FormAction, ListAction,
};
pub use dialog::{dialog_channel, Dialog, DialogChannel, DialogHost, DialogKind, DialogOutcome};
pub use shell::{HostShell, Route, Screen, UiInput};
pub use surface::{MemorySurface, Surface};
pub use validation::{FormInput, ValidationErrors};

#[cfg(test)]
mod test_support;
