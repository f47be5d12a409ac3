pub mod controller;
pub mod error;
pub mod service;

pub use controller::{
    events::{
        failure_message, ControllerEvent, Effect, RequestOutcome, UiIntent, FALLBACK_SUMMARY,
        REMEDIATION_HINT,
    },
    orchestration::SummarySession,
    reducer::{Phase, Resolution, Submission, SummaryController, ViewSnapshot},
};
pub use error::SummaryCallError;
pub use service::{HttpSummaryService, ServiceEndpoint, SummaryService};

pub use render::RenderableContent;
