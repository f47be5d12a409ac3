//! Submission state machine.

use chrono::{DateTime, Utc};
use render::RenderableContent;
use shared::{
    domain::{RenderMode, SubmissionId},
    protocol::SummarizeRequest,
};
use tracing::{debug, info, warn};

use super::events::{ControllerEvent, Effect, RequestOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending,
    Settled(Resolution),
}

#[derive(Debug, Clone)]
pub struct Submission {
    pub id: SubmissionId,
    pub raw_input: String,
    pub text: String,
    pub echo: RenderableContent,
    pub result: Option<RenderableContent>,
    pub submitted_at: DateTime<Utc>,
    pub settled_at: Option<DateTime<Utc>>,
}

impl Submission {
    pub fn elapsed_ms(&self) -> Option<i64> {
        self.settled_at
            .map(|settled_at| (settled_at - self.submitted_at).num_milliseconds())
    }
}

/// Owned read-only view handed to the display surface.
#[derive(Debug, Clone)]
pub struct ViewSnapshot {
    pub input: String,
    pub phase: Phase,
    pub pending: bool,
    pub submission: Option<SubmissionId>,
    pub echo: Option<RenderableContent>,
    /// Empty while idle or pending.
    pub content: RenderableContent,
    pub elapsed_ms: Option<i64>,
}

#[derive(Debug)]
pub struct SummaryController {
    input: String,
    phase: Phase,
    submission: Option<Submission>,
    last_id: SubmissionId,
}

impl Default for SummaryController {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryController {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            phase: Phase::Idle,
            submission: None,
            last_id: SubmissionId(0),
        }
    }

    pub fn handle(&mut self, event: ControllerEvent) -> Option<Effect> {
        match event {
            ControllerEvent::InputChanged(text) => {
                self.input = text;
                None
            }
            ControllerEvent::SubmitRequested => self.submit(),
            ControllerEvent::CallSettled {
                submission,
                outcome,
            } => {
                self.settle(submission, outcome);
                None
            }
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        self.phase == Phase::Pending
    }

    pub fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }

    pub fn content(&self) -> Option<&RenderableContent> {
        self.submission.as_ref().and_then(|s| s.result.as_ref())
    }

    pub fn view(&self) -> ViewSnapshot {
        ViewSnapshot {
            input: self.input.clone(),
            phase: self.phase,
            pending: self.is_pending(),
            submission: self.submission.as_ref().map(|s| s.id),
            echo: self.submission.as_ref().map(|s| s.echo.clone()),
            content: self
                .content()
                .cloned()
                .unwrap_or_else(|| RenderableContent::render(RenderMode::ServiceOutput, None)),
            elapsed_ms: self.submission.as_ref().and_then(Submission::elapsed_ms),
        }
    }

    fn submit(&mut self) -> Option<Effect> {
        // Admission is checked against the input as it is right now.
        let text = self.input.trim();
        if text.is_empty() {
            debug!("ignoring submit: input is blank");
            return None;
        }
        if self.is_pending() {
            debug!(
                submission = ?self.submission.as_ref().map(|s| s.id),
                "ignoring submit: a request is already pending"
            );
            return None;
        }

        let text = text.to_string();
        let id = self.last_id.next();
        self.last_id = id;
        // Replacing the submission drops the previous result before the call resolves.
        self.submission = Some(Submission {
            id,
            raw_input: self.input.clone(),
            text: text.clone(),
            echo: RenderableContent::user_echo(&text),
            result: None,
            submitted_at: Utc::now(),
            settled_at: None,
        });
        self.phase = Phase::Pending;
        info!(submission = %id, chars = text.chars().count(), "dispatching summarization request");

        Some(Effect::Dispatch {
            submission: id,
            request: SummarizeRequest { text },
        })
    }

    fn settle(&mut self, id: SubmissionId, outcome: RequestOutcome) {
        let Some(submission) = self.submission.as_mut() else {
            warn!(submission = %id, "ignoring outcome: no live submission");
            return;
        };
        if self.phase != Phase::Pending || submission.id != id {
            warn!(
                submission = %id,
                live = %submission.id,
                "ignoring outcome for a submission that is not pending"
            );
            return;
        }

        let (resolution, text) = match outcome {
            RequestOutcome::Success(text) => (Resolution::Success, text),
            RequestOutcome::Failure(text) => (Resolution::Failure, text),
        };
        submission.result = Some(RenderableContent::service_output(&text));
        submission.settled_at = Some(Utc::now());
        self.phase = Phase::Settled(resolution);
        info!(
            submission = %id,
            ?resolution,
            elapsed_ms = submission.elapsed_ms().unwrap_or_default(),
            "summarization request settled"
        );
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
