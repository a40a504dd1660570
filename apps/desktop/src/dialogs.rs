//! Terminal dialog presenter. Answers each pending dialog from stdin.

use tokio::sync::mpsc;
use tracing::{debug, warn};
use view_core::dialog::{Dialog, DialogInput, DialogKind, DialogOverlay, PendingDialog};

use crate::console::{next_line, SharedInput};

#[derive(Debug, Default)]
pub struct ConsoleOverlay;

impl DialogOverlay for ConsoleOverlay {
    fn show(&mut self, dialog: &Dialog) {
        println!("\n+-- {} --", dialog.kind.title());
        println!("| {}", dialog.message);
        println!("+-- [{}]", answer_hint(dialog.kind));
    }

    fn remove(&mut self, dialog: &Dialog) {
        debug!(kind = ?dialog.kind, "dialog closed");
    }
}

fn answer_hint(kind: DialogKind) -> &'static str {
    match kind {
        DialogKind::Confirm => "y = delete | n = cancel",
        DialogKind::Success | DialogKind::Error => "ok",
    }
}

/// `bg` is a click on the dimmed backdrop, `body` a click inside the dialog.
/// A blank line only acknowledges notifications; confirmations need an explicit answer.
pub fn parse_dialog_input(kind: DialogKind, line: &str) -> Option<DialogInput> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" if kind == DialogKind::Confirm => None,
        "y" | "yes" | "ok" | "" => Some(DialogInput::Primary),
        "n" | "no" => Some(DialogInput::Secondary),
        "bg" => Some(DialogInput::Backdrop { inside_body: false }),
        "body" => Some(DialogInput::Backdrop { inside_body: true }),
        _ => None,
    }
}

pub async fn run_presenter(mut pending_rx: mpsc::UnboundedReceiver<PendingDialog>, input: SharedInput) {
    let mut overlay = ConsoleOverlay;
    while let Some(pending) = pending_rx.recv().await {
        present(pending, &input, &mut overlay).await;
    }
}

async fn present(mut pending: PendingDialog, input: &SharedInput, overlay: &mut ConsoleOverlay) {
    overlay.show(pending.dialog());
    loop {
        let line = match next_line(input).await {
            Ok(Some(line)) => line,
            Ok(None) => {
                warn!("stdin closed with a dialog open");
                overlay.remove(pending.dialog());
                return;
            }
            Err(err) => {
                warn!(%err, "failed to read dialog answer");
                overlay.remove(pending.dialog());
                return;
            }
        };

        let Some(answer) = parse_dialog_input(pending.dialog().kind, &line) else {
            println!("| [{}]", answer_hint(pending.dialog().kind));
            continue;
        };
        match pending.respond(answer, overlay) {
            Ok(outcome) => {
                debug!(?outcome, "dialog answered");
                return;
            }
            Err(unresolved) => pending = unresolved,
        }
    }
}
