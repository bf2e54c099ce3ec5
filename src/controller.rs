use std::cell::{Cell, RefCell};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::str::FromStr;
use std::task::{Context, Poll};

use futures::future::{FutureExt, LocalBoxFuture};
use log::{debug, error, info, warn};

use crate::client::{HttpPredictionClient, PredictionClient};
use crate::config::ControllerConfig;
use crate::form::{Form, SubmitEvent};
use crate::state::{ResultPanel, UiState};

/// What happens when submissions overlap and their responses arrive out of
/// order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompletionOrder {
    /// Every response overwrites the panel, so the last one to arrive wins
    /// even if it belongs to an older submission.
    #[default]
    LastToResolve,
    /// Only the response of the most recent submission is shown; responses
    /// to older submissions are dropped.
    LatestSubmission,
}

impl FromStr for CompletionOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" | "latest-submission" => Ok(CompletionOrder::LatestSubmission),
            "last-to-resolve" => Ok(CompletionOrder::LastToResolve),
            other => anyhow::bail!(
                "unknown completion order {other:?}, expected \"latest\" or \"last-to-resolve\""
            ),
        }
    }
}

impl fmt::Display for CompletionOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionOrder::LastToResolve => f.write_str("last-to-resolve"),
            CompletionOrder::LatestSubmission => f.write_str("latest"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// The response was rendered into the panel.
    Applied(UiState),
    /// A newer submission was issued before this one resolved.
    Discarded,
}

/// The pending half of a submission. Nothing is sent until it is polled.
#[must_use = "a submission does nothing unless awaited or spawned"]
pub struct Submission {
    token: u64,
    inner: LocalBoxFuture<'static, SubmissionOutcome>,
}

impl Submission {
    pub fn token(&self) -> u64 {
        self.token
    }
}

impl Future for Submission {
    type Output = SubmissionOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

/// Drives the submit workflow and owns the result panel.
///
/// Runs on a single thread; the panel is shared with in-flight submissions
/// through `Rc<RefCell<_>>` and is only borrowed between awaits.
pub struct FormController {
    client: Rc<dyn PredictionClient>,
    panel: Rc<RefCell<ResultPanel>>,
    order: CompletionOrder,
    latest: Rc<Cell<u64>>,
}

impl FormController {
    pub fn new(client: impl PredictionClient + 'static) -> Self {
        Self {
            client: Rc::new(client),
            panel: Rc::new(RefCell::new(ResultPanel::new())),
            order: CompletionOrder::default(),
            latest: Rc::new(Cell::new(0)),
        }
    }

    pub fn from_config(config: &ControllerConfig) -> Self {
        Self::new(HttpPredictionClient::new(config.endpoint.clone()))
            .with_completion_order(config.completion_order)
    }

    pub fn with_completion_order(mut self, order: CompletionOrder) -> Self {
        self.order = order;
        self
    }

    pub fn completion_order(&self) -> CompletionOrder {
        self.order
    }

    pub fn state(&self) -> UiState {
        self.panel.borrow().state().clone()
    }

    pub fn markup(&self) -> String {
        self.panel.borrow().markup().to_string()
    }

    /// Submit handler.
    ///
    /// Cancels the default action and shows the loading state before
    /// returning. The returned future sends the request and renders the
    /// outcome.
    pub fn on_submit(&self, event: &mut SubmitEvent, form: &Form) -> Submission {
        event.prevent_default();
        self.panel.borrow_mut().set(UiState::Loading);

        let snapshot = form.snapshot();
        let token = self.latest.get() + 1;
        self.latest.set(token);
        info!("Submitting prediction request #{token} ({} fields)", snapshot.len());
        debug!("Snapshot #{token}: {snapshot:?}");

        let request = self.client.predict(snapshot);
        let panel = self.panel.clone();
        let latest = self.latest.clone();
        let order = self.order;

        let inner = async move {
            let state = match request.await {
                Ok(result) => {
                    info!("Prediction #{token} received: {}", result.predicted_price);
                    UiState::Success {
                        value: result.predicted_price,
                    }
                }
                Err(err) => {
                    error!("Prediction error (#{token}): {err}");
                    UiState::failure(err.kind())
                }
            };

            if order == CompletionOrder::LatestSubmission && latest.get() != token {
                warn!(
                    "Discarding stale response #{token}, latest submission is #{}",
                    latest.get()
                );
                return SubmissionOutcome::Discarded;
            }

            panel.borrow_mut().set(state.clone());
            SubmissionOutcome::Applied(state)
        }
        .boxed_local();

        Submission { token, inner }
    }

    /// Like [`Self::on_submit`] but hands the continuation to the current
    /// single-threaded runtime, the way a browser event loop runs it.
    ///
    /// # Panics
    ///
    /// Panics if called outside an actix `System` or tokio `LocalSet`.
    pub fn spawn_submit(
        &self,
        event: &mut SubmitEvent,
        form: &Form,
    ) -> actix_rt::task::JoinHandle<SubmissionOutcome> {
        actix_rt::spawn(self.on_submit(event, form))
    }
}
