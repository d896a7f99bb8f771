//! Non-interactive submission and bookkeeping for submissions started from the prompt.

use std::time::Duration;

use anyhow::{bail, Result};
use client_core::{SignupController, SubmitOutcome};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::terminal_view::TerminalForm;

/// Extra wait past the status window so the board's own expiry runs first.
const EXPIRY_GRACE: Duration = Duration::from_millis(50);

/// Submits one signup, keeps the process alive until the resulting status
/// message has been cleared, then reports the outcome.
pub async fn run_one_shot(
    controller: &SignupController,
    form: &TerminalForm,
    email: &str,
    activity: &str,
) -> Result<()> {
    form.set_email(email);
    form.select(activity);
    let outcome = controller.submit().await;

    tokio::time::sleep(controller.status().window() + EXPIRY_GRACE).await;

    match outcome {
        SubmitOutcome::SignedUp { .. } => Ok(()),
        SubmitOutcome::Rejected => bail!("signup rejected: email and activity are required"),
        SubmitOutcome::Failed { message } => bail!("signup failed: {message}"),
    }
}

/// Submissions spawned from the prompt that may still be in flight.
#[derive(Default)]
pub struct PendingSubmissions {
    handles: Vec<JoinHandle<SubmitOutcome>>,
}

impl PendingSubmissions {
    pub fn track(&mut self, handle: JoinHandle<SubmitOutcome>) {
        self.handles.retain(|handle| !handle.is_finished());
        self.handles.push(handle);
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Waits for every tracked submission. Tasks that panicked or were
    /// cancelled are logged and left out of the result.
    pub async fn drain(&mut self) -> Vec<SubmitOutcome> {
        let mut outcomes = Vec::with_capacity(self.handles.len());
        for handle in self.handles.drain(..) {
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(error) => warn!(%error, "signup task did not complete"),
            }
        }
        outcomes
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
