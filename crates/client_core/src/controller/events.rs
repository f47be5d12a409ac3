//! Events into the controller, effects out of it, and call outcome mapping.

use shared::{
    domain::SubmissionId,
    protocol::{SummarizeRequest, SummarizeResponse},
};
use tracing::warn;

use crate::error::SummaryCallError;

pub const FALLBACK_SUMMARY: &str = "Sorry, I couldn't generate a summary.";
pub const REMEDIATION_HINT: &str =
    "Please make sure your summarization API endpoint is configured correctly.";

/// Intents forwarded unchanged from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiIntent {
    InputChanged(String),
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    InputChanged(String),
    SubmitRequested,
    CallSettled {
        submission: SubmissionId,
        outcome: RequestOutcome,
    },
}

impl From<UiIntent> for ControllerEvent {
    fn from(intent: UiIntent) -> Self {
        match intent {
            UiIntent::InputChanged(text) => Self::InputChanged(text),
            UiIntent::Submit => Self::SubmitRequested,
        }
    }
}

/// Work the controller asks its driver to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Dispatch {
        submission: SubmissionId,
        request: SummarizeRequest,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    Success(String),
    Failure(String),
}

impl RequestOutcome {
    /// A reachable service without a usable summary is a degraded success.
    pub fn from_call(result: Result<SummarizeResponse, SummaryCallError>) -> Self {
        match result {
            Ok(response) => match response.usable_summary() {
                Some(summary) => Self::Success(summary.to_string()),
                None => {
                    warn!("summarization response had no usable summary; showing fallback");
                    Self::Success(FALLBACK_SUMMARY.to_string())
                }
            },
            Err(err) => {
                warn!(error = %err, status = ?err.status(), timeout = err.is_timeout(), "summarization call failed");
                Self::Failure(failure_message(&err))
            }
        }
    }
}

pub fn failure_message(err: &dyn std::fmt::Display) -> String {
    format!("**Error:** {err}\n\n{REMEDIATION_HINT}")
}
