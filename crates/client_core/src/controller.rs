//! Load/submit/reload workflow tying the API, the view regions and the status slot together.

use std::sync::Arc;

use shared::domain::{SignupRequest, StatusMessage};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{
    error::ClientError,
    render::{render, render_load_failure},
    status::StatusBoard,
    transport::ActivitiesApi,
    view::{CatalogView, SignupForm},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Validating,
    Submitting,
    Reloading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Rendered { activities: usize },
    Failed,
}

impl LoadOutcome {
    pub fn is_rendered(self) -> bool {
        matches!(self, LoadOutcome::Rendered { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank email or no activity; nothing was sent.
    Rejected,
    Failed { message: String },
    SignedUp { message: String, view_refreshed: bool },
}

pub struct SignupController {
    api: Arc<dyn ActivitiesApi>,
    view: Arc<dyn CatalogView>,
    form: Arc<dyn SignupForm>,
    status: StatusBoard,
}

fn enter(phase: SubmitPhase) {
    debug!(?phase, "signup phase");
}

impl SignupController {
    pub fn new(
        api: Arc<dyn ActivitiesApi>,
        view: Arc<dyn CatalogView>,
        form: Arc<dyn SignupForm>,
        status: StatusBoard,
    ) -> Arc<Self> {
        Arc::new(Self {
            api,
            view,
            form,
            status,
        })
    }

    pub fn status(&self) -> &StatusBoard {
        &self.status
    }

    /// Fetches and renders the catalog. A failed fetch replaces the list with
    /// the unable-to-load placeholder.
    pub async fn load_and_render(&self) -> LoadOutcome {
        match self.api.fetch_catalog().await {
            Ok(catalog) => {
                render(&catalog, self.view.as_ref());
                LoadOutcome::Rendered {
                    activities: catalog.len(),
                }
            }
            Err(error) => {
                warn!(%error, "failed to load activities");
                render_load_failure(self.view.as_ref());
                LoadOutcome::Failed
            }
        }
    }

    pub async fn submit(&self) -> SubmitOutcome {
        enter(SubmitPhase::Validating);
        let email = self.form.email();
        let activity = self.form.selected_activity();
        let Some(request) = SignupRequest::from_form(&email, &activity) else {
            self.status
                .show(StatusMessage::error(ClientError::Validation.signup_message()));
            enter(SubmitPhase::Idle);
            return SubmitOutcome::Rejected;
        };

        enter(SubmitPhase::Submitting);
        let outcome = match self.api.sign_up(&request).await {
            Ok(message) => {
                enter(SubmitPhase::Reloading);
                let view_refreshed = self.load_and_render().await.is_rendered();
                if !view_refreshed {
                    warn!(
                        activity = %request.activity,
                        "signup succeeded but refreshing the activity list failed"
                    );
                }
                self.status.show(StatusMessage::success(message.clone()));
                self.form.reset();
                info!(activity = %request.activity, "signup completed");
                SubmitOutcome::SignedUp {
                    message,
                    view_refreshed,
                }
            }
            Err(error) => {
                info!(
                    activity = %request.activity,
                    status = ?error.status(),
                    %error,
                    "signup failed"
                );
                let message = error.signup_message();
                self.status.show(StatusMessage::error(message.clone()));
                SubmitOutcome::Failed { message }
            }
        };
        enter(SubmitPhase::Idle);
        outcome
    }

    /// Runs a submission as its own task. Overlapping submissions are neither
    /// cancelled nor coalesced.
    pub fn spawn_submit(self: &Arc<Self>) -> JoinHandle<SubmitOutcome> {
        let controller = Arc::clone(self);
        tokio::spawn(async move { controller.submit().await })
    }

    pub fn spawn_load(self: &Arc<Self>) -> JoinHandle<LoadOutcome> {
        let controller = Arc::clone(self);
        tokio::spawn(async move { controller.load_and_render().await })
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
