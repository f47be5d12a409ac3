use super::*;
use crate::{
    controller::events::{FALLBACK_SUMMARY, REMEDIATION_HINT},
    error::SummaryCallError,
};
use render::{Block, Inline};
use shared::protocol::SummarizeResponse;

fn submit_text(controller: &mut SummaryController, text: &str) -> Option<Effect> {
    controller.handle(ControllerEvent::InputChanged(text.to_string()));
    controller.handle(ControllerEvent::SubmitRequested)
}

fn dispatched_id(effect: Option<Effect>) -> SubmissionId {
    match effect {
        Some(Effect::Dispatch { submission, .. }) => submission,
        None => panic!("expected a dispatch"),
    }
}

#[test]
fn starts_idle_with_empty_view() {
    let controller = SummaryController::new();
    let view = controller.view();
    assert_eq!(controller.phase(), Phase::Idle);
    assert_eq!(view.input, "");
    assert!(!view.pending);
    assert!(view.content.is_empty());
    assert!(view.echo.is_none());
}

#[test]
fn blank_input_never_leaves_idle() {
    let mut controller = SummaryController::new();
    for text in ["", " ", "  ", "\n\t ", "\u{3000}"] {
        assert_eq!(submit_text(&mut controller, text), None, "input {text:?}");
        assert_eq!(controller.phase(), Phase::Idle);
        assert!(controller.submission().is_none());
    }
}

#[test]
fn submit_dispatches_trimmed_text_once() {
    let mut controller = SummaryController::new();
    let effect = submit_text(&mut controller, "  Hello world \n");
    assert_eq!(
        effect,
        Some(Effect::Dispatch {
            submission: SubmissionId(1),
            request: SummarizeRequest {
                text: "Hello world".to_string(),
            },
        })
    );
    assert_eq!(controller.phase(), Phase::Pending);
    let submission = controller.submission().expect("submission");
    assert_eq!(submission.raw_input, "  Hello world \n");
    assert_eq!(submission.text, "Hello world");
    assert!(controller.content().is_none());
}

#[test]
fn duplicate_submit_while_pending_is_ignored() {
    let mut controller = SummaryController::new();
    let first = dispatched_id(submit_text(&mut controller, "Test"));

    assert_eq!(controller.handle(ControllerEvent::SubmitRequested), None);
    assert_eq!(submit_text(&mut controller, "Other text"), None);
    assert_eq!(controller.phase(), Phase::Pending);
    assert_eq!(controller.submission().map(|s| s.id), Some(first));
    assert_eq!(controller.submission().map(|s| s.text.as_str()), Some("Test"));
}

#[test]
fn input_is_revalidated_at_submit_time() {
    let mut controller = SummaryController::new();
    controller.handle(ControllerEvent::InputChanged("valid".to_string()));
    controller.handle(ControllerEvent::InputChanged("   ".to_string()));
    assert_eq!(controller.handle(ControllerEvent::SubmitRequested), None);
    assert_eq!(controller.phase(), Phase::Idle);
}

#[test]
fn success_outcome_becomes_displayed_content() {
    let mut controller = SummaryController::new();
    let id = dispatched_id(submit_text(&mut controller, "Hello world"));
    controller.handle(ControllerEvent::CallSettled {
        submission: id,
        outcome: RequestOutcome::Success("Greeting.".to_string()),
    });

    assert_eq!(controller.phase(), Phase::Settled(Resolution::Success));
    let view = controller.view();
    assert!(!view.pending);
    assert_eq!(
        view.content.document().blocks,
        vec![Block::Paragraph(vec![Inline::Text("Greeting.".to_string())])]
    );
    assert!(view.elapsed_ms.is_some());
}

#[test]
fn missing_summary_settles_as_degraded_success() {
    let mut controller = SummaryController::new();
    let id = dispatched_id(submit_text(&mut controller, "Test"));
    let outcome = RequestOutcome::from_call(Ok(SummarizeResponse::default()));
    assert_eq!(outcome, RequestOutcome::Success(FALLBACK_SUMMARY.to_string()));

    controller.handle(ControllerEvent::CallSettled {
        submission: id,
        outcome,
    });
    assert_eq!(controller.phase(), Phase::Settled(Resolution::Success));
    assert_eq!(
        controller.content().map(|c| c.to_plain_text()),
        Some(FALLBACK_SUMMARY.to_string())
    );
}

#[test]
fn call_failure_settles_with_remediation_hint() {
    let mut controller = SummaryController::new();
    let id = dispatched_id(submit_text(&mut controller, "Test"));
    let outcome = RequestOutcome::from_call(Err(SummaryCallError::Status { status: 500 }));

    controller.handle(ControllerEvent::CallSettled {
        submission: id,
        outcome,
    });
    assert_eq!(controller.phase(), Phase::Settled(Resolution::Failure));
    let content = controller.content().expect("content");
    let text = content.to_plain_text();
    assert!(text.contains("Error: Failed to get summary"), "{text}");
    assert!(text.contains("HTTP 500"), "{text}");
    assert!(text.contains(REMEDIATION_HINT), "{text}");
    assert!(content.to_html().contains("<strong>Error:</strong>"));
}

#[test]
fn new_submission_clears_previous_result_immediately() {
    let mut controller = SummaryController::new();
    let first = dispatched_id(submit_text(&mut controller, "first"));
    controller.handle(ControllerEvent::CallSettled {
        submission: first,
        outcome: RequestOutcome::Success("first summary".to_string()),
    });
    assert!(controller.content().is_some());

    let second = dispatched_id(submit_text(&mut controller, "second"));
    assert_ne!(first, second);
    assert_eq!(controller.phase(), Phase::Pending);
    assert!(controller.content().is_none());
    assert!(controller.view().content.is_empty());
    assert_eq!(
        controller.view().echo.map(|echo| echo.to_plain_text()),
        Some("second".to_string())
    );
}

#[test]
fn settled_controller_accepts_new_submissions() {
    let mut controller = SummaryController::new();
    for round in 1..=3u64 {
        let id = dispatched_id(submit_text(&mut controller, "again"));
        assert_eq!(id, SubmissionId(round));
        controller.handle(ControllerEvent::CallSettled {
            submission: id,
            outcome: RequestOutcome::Failure("boom".to_string()),
        });
        assert_eq!(controller.phase(), Phase::Settled(Resolution::Failure));
    }
}

#[test]
fn outcome_for_unknown_submission_is_ignored() {
    let mut controller = SummaryController::new();
    controller.handle(ControllerEvent::CallSettled {
        submission: SubmissionId(9),
        outcome: RequestOutcome::Success("stray".to_string()),
    });
    assert_eq!(controller.phase(), Phase::Idle);

    let id = dispatched_id(submit_text(&mut controller, "Test"));
    controller.handle(ControllerEvent::CallSettled {
        submission: id.next(),
        outcome: RequestOutcome::Success("stray".to_string()),
    });
    assert_eq!(controller.phase(), Phase::Pending);
    assert!(controller.content().is_none());
}
