//! Confirmation / success / error dialogs with a single completion signal.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Confirm,
    Success,
    Error,
}

impl DialogKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Confirm => "Please confirm",
            Self::Success => "Success",
            Self::Error => "Error",
        }
    }

    /// Outcome when the dialog goes away without an explicit choice.
    pub fn dismissed_outcome(self) -> DialogOutcome {
        match self {
            Self::Confirm => DialogOutcome::Declined,
            Self::Success | Self::Error => DialogOutcome::Acknowledged,
        }
    }

    /// `None` means the input does not dismiss this kind of dialog.
    pub fn outcome_for(self, input: DialogInput) -> Option<DialogOutcome> {
        match (self, input) {
            (_, DialogInput::Backdrop { inside_body: true }) => None,
            (_, DialogInput::Backdrop { inside_body: false }) => Some(self.dismissed_outcome()),
            (Self::Confirm, DialogInput::Primary) => Some(DialogOutcome::Confirmed),
            (Self::Confirm, DialogInput::Secondary) => Some(DialogOutcome::Declined),
            (Self::Success | Self::Error, DialogInput::Primary) => Some(DialogOutcome::Acknowledged),
            (Self::Success | Self::Error, DialogInput::Secondary) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogInput {
    Primary,
    Secondary,
    Backdrop { inside_body: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Confirmed,
    Declined,
    Acknowledged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub message: String,
}

impl Dialog {
    pub fn confirm(message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Confirm,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Error,
            message: message.into(),
        }
    }
}

#[async_trait]
pub trait DialogHost: Send + Sync {
    /// Resolves once the user has dismissed the dialog and it is off the screen.
    async fn present(&self, dialog: Dialog) -> DialogOutcome;

    async fn confirm(&self, message: &str) -> bool {
        self.present(Dialog::confirm(message)).await == DialogOutcome::Confirmed
    }

    async fn notify_success(&self, message: &str) {
        self.present(Dialog::success(message)).await;
    }

    async fn notify_error(&self, message: &str) {
        self.present(Dialog::error(message)).await;
    }
}

/// Where a presenter draws dialogs.
pub trait DialogOverlay {
    fn show(&mut self, dialog: &Dialog);
    fn remove(&mut self, dialog: &Dialog);
}

/// A dialog waiting for the user. Owning it is the only way to resolve it.
#[derive(Debug)]
pub struct PendingDialog {
    dialog: Dialog,
    responder: oneshot::Sender<DialogOutcome>,
}

impl PendingDialog {
    pub fn dialog(&self) -> &Dialog {
        &self.dialog
    }

    /// Applies user input. Inputs that do not dismiss the dialog hand it back.
    /// Otherwise the dialog is removed from `overlay` before the waiter is woken.
    pub fn respond(
        self,
        input: DialogInput,
        overlay: &mut dyn DialogOverlay,
    ) -> Result<DialogOutcome, PendingDialog> {
        let Some(outcome) = self.dialog.kind.outcome_for(input) else {
            return Err(self);
        };
        overlay.remove(&self.dialog);
        if self.responder.send(outcome).is_err() {
            warn!(kind = ?self.dialog.kind, "dialog waiter went away before resolution");
        }
        Ok(outcome)
    }
}

/// Production dialog host: hands each dialog to a presenter task over a channel.
#[derive(Clone)]
pub struct DialogChannel {
    tx: mpsc::UnboundedSender<PendingDialog>,
}

pub fn dialog_channel() -> (DialogChannel, mpsc::UnboundedReceiver<PendingDialog>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (DialogChannel { tx }, rx)
}

#[async_trait]
impl DialogHost for DialogChannel {
    async fn present(&self, dialog: Dialog) -> DialogOutcome {
        let kind = dialog.kind;
        let (responder, completion) = oneshot::channel();
        if self.tx.send(PendingDialog { dialog, responder }).is_err() {
            warn!(?kind, "no dialog presenter attached; dismissing");
            return kind.dismissed_outcome();
        }

        match completion.await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(?kind, "dialog dropped without an answer; dismissing");
                kind.dismissed_outcome()
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/dialog_tests.rs"]
mod tests;
