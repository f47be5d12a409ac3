//! Single-threaded driver that feeds UI intents and call resolutions into the
//! controller and publishes a view after every event.
//!
//! The outbound call is a future polled by this loop rather than a spawned
//! task, so the pending check and the dispatch happen before any other event
//! is looked at.

use std::sync::Arc;

use futures::future::BoxFuture;
use shared::domain::SubmissionId;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::{
    events::{ControllerEvent, Effect, RequestOutcome, UiIntent},
    reducer::{SummaryController, ViewSnapshot},
};
use crate::service::SummaryService;

type InFlightCall = BoxFuture<'static, (SubmissionId, RequestOutcome)>;

pub struct SummarySession {
    controller: SummaryController,
    service: Arc<dyn SummaryService>,
}

enum Step {
    Intent(Option<UiIntent>),
    Settled(SubmissionId, RequestOutcome),
}

impl SummarySession {
    pub fn new(service: Arc<dyn SummaryService>) -> Self {
        Self {
            controller: SummaryController::new(),
            service,
        }
    }

    pub fn controller(&self) -> &SummaryController {
        &self.controller
    }

    /// Runs until the intent channel closes and any in-flight call has
    /// settled, or until the display side stops listening.
    pub async fn run(
        mut self,
        mut intents: mpsc::Receiver<UiIntent>,
        views: mpsc::Sender<ViewSnapshot>,
    ) -> SummaryController {
        let mut in_flight: Option<InFlightCall> = None;
        let mut intents_open = true;

        if views.send(self.controller.view()).await.is_err() {
            return self.controller;
        }

        while intents_open || in_flight.is_some() {
            let step = tokio::select! {
                intent = intents.recv(), if intents_open => Step::Intent(intent),
                (submission, outcome) = poll_in_flight(&mut in_flight) => {
                    Step::Settled(submission, outcome)
                }
            };

            let event = match step {
                Step::Intent(Some(intent)) => ControllerEvent::from(intent),
                Step::Intent(None) => {
                    debug!("intent channel closed");
                    intents_open = false;
                    continue;
                }
                Step::Settled(submission, outcome) => {
                    in_flight = None;
                    ControllerEvent::CallSettled {
                        submission,
                        outcome,
                    }
                }
            };

            if let Some(effect) = self.controller.handle(event) {
                if in_flight.is_some() {
                    warn!("controller dispatched while a call was in flight; dropping dispatch");
                } else {
                    in_flight = Some(self.dispatch(effect));
                }
            }

            if views.send(self.controller.view()).await.is_err() {
                debug!("view receiver dropped; stopping session");
                break;
            }
        }

        self.controller
    }

    fn dispatch(&self, effect: Effect) -> InFlightCall {
        let Effect::Dispatch {
            submission,
            request,
        } = effect;
        let service = Arc::clone(&self.service);
        Box::pin(async move {
            let result = service.summarize(&request).await;
            (submission, RequestOutcome::from_call(result))
        })
    }
}

async fn poll_in_flight(in_flight: &mut Option<InFlightCall>) -> (SubmissionId, RequestOutcome) {
    match in_flight.as_mut() {
        Some(call) => call.await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
#[path = "tests/orchestration_tests.rs"]
mod tests;
