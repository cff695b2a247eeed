//! Session Integration Tests
//!
//! Tests for the submit/resolve/reset state machine against the
//! fixture service.

use std::sync::Arc;

use ethical_lens::core::display;
use ethical_lens::domain::{InputKind, StateLabel, ViewState};
use ethical_lens::{
    Fixture, FixtureService, InputCollector, LensError, ModePolicy, Session, Verdict,
};
use tempfile::TempDir;
use tokio_test::{assert_err, assert_ok};

fn session_with(fixture: Fixture) -> Session<Arc<FixtureService>> {
    Session::new(
        Arc::new(FixtureService::new(fixture)),
        InputCollector::default(),
    )
}

/// Minimal PNG signature plus padding
fn write_png(dir: &TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
    bytes.extend_from_slice(&[0u8; 16]);
    std::fs::write(&path, bytes).unwrap();
    path
}

#[tokio::test]
async fn test_verified_headline_renders_scores() {
    let mut session = session_with(Fixture::Verified);
    session.collector_mut().set_headline("dummy-verified").unwrap();

    let result = assert_ok!(session.submit().await);
    let card = display::render(&result);

    assert!(card.contains("Confidence Score: 98.00%"));
    assert!(card.contains("Similarity Score: 92.00%"));
    assert!(card.contains("[SAFE] Verified"));
    assert!(card.contains(
        "  - BBC News (https://example.com/bbc-article): \"Politician announces four-day weekend after parliament passes bill...\""
    ));
}

#[tokio::test]
async fn test_text_request_carries_exact_headline() {
    let mut session = session_with(Fixture::Misinformation);
    let headline = "  Aliens land in Ohio!  ";
    session.collector_mut().set_headline(headline).unwrap();

    assert_ok!(session.submit().await);

    let sent = session.service().requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind, InputKind::Text);
    assert_eq!(sent[0].data, headline);
    assert_eq!(sent[0].metadata.language, "en");
    assert_eq!(sent[0].metadata.country.as_deref(), Some(""));
    assert_eq!(sent[0].metadata.page_size.as_deref(), Some(""));
}

#[tokio::test]
async fn test_image_request_is_data_uri() {
    let temp = TempDir::new().unwrap();
    let path = write_png(&temp, "portrait.bin");

    let mut session = session_with(Fixture::Deepfake);
    session.collector_mut().set_image(&path).unwrap();

    let result = assert_ok!(session.submit().await);
    assert_eq!(result.verdict, Verdict::Deepfake);
    assert!(!display::is_safe(result.verdict));

    let sent = session.service().requests();
    assert_eq!(sent[0].kind, InputKind::Image);
    assert!(sent[0].data.starts_with("data:image/png;base64,"));
    assert!(sent[0].metadata.country.is_none());
}

#[tokio::test]
async fn test_empty_submit_never_calls_service() {
    let mut session = session_with(Fixture::Verified);

    let err = assert_err!(session.submit().await);

    assert!(err.is_validation());
    assert_eq!(session.service().call_count(), 0);
    assert_eq!(session.state().label(), StateLabel::Failure);
    assert!(session.state().result().is_none());
}

#[tokio::test]
async fn test_unreadable_image_clears_file_without_network() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("gone.png");

    let mut session = session_with(Fixture::Authentic);
    session.collector_mut().set_image(&missing).unwrap();

    let err = assert_err!(session.submit().await);

    assert!(matches!(err, LensError::FileRead(_)));
    assert_eq!(session.service().call_count(), 0);
    assert!(session.collector().input().image().is_none());
    assert!(!session.is_in_flight());
}

#[tokio::test]
async fn test_non_image_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("notes.txt");
    std::fs::write(&path, "just text").unwrap();

    let mut session = session_with(Fixture::Authentic);
    session.collector_mut().set_image(&path).unwrap();

    let err = assert_err!(session.submit().await);
    assert!(matches!(err, LensError::FileRead(_)));
    assert_eq!(session.service().call_count(), 0);
}

#[tokio::test]
async fn test_loading_transitions_once_to_success() {
    let mut session = session_with(Fixture::Verified);
    session.collector_mut().set_headline("headline").unwrap();

    let submission = session.begin().unwrap();
    assert_eq!(session.state(), &ViewState::Loading);

    // Single flight: a second submit is refused and changes nothing
    assert_eq!(session.begin().unwrap_err(), LensError::Busy);
    assert_eq!(session.state(), &ViewState::Loading);

    let outcome = submission.run(session.service()).await;
    let replay = outcome.clone();
    assert!(session.finish(outcome));
    assert!(!session.finish(replay));

    assert!(session.state().result().is_some());
    assert!(session.state().error().is_none());
    assert_eq!(session.service().call_count(), 1);
}

#[tokio::test]
async fn test_service_error_goes_to_failure_and_keeps_input() {
    let service = Arc::new(FixtureService::failing(LensError::analysis(Some(
        "Headline too short".to_string(),
    ))));
    let mut session = Session::new(service, InputCollector::default());
    session.collector_mut().set_headline("Hi").unwrap();

    let err = assert_err!(session.submit().await);

    assert_eq!(err.to_string(), "Headline too short");
    assert_eq!(session.state().error(), Some(&err));
    assert!(session.state().result().is_none());
    assert!(!session.is_in_flight());
    assert_eq!(session.collector().input().headline(), Some("Hi"));
}

#[tokio::test]
async fn test_resubmit_after_failure() {
    let mut session = session_with(Fixture::Verified);

    assert_err!(session.submit().await);
    session.collector_mut().set_headline("now filled").unwrap();
    assert_ok!(session.submit().await);

    assert_eq!(session.state().label(), StateLabel::Success);
}

#[tokio::test]
async fn test_reset_after_success_clears_everything() {
    let mut session = session_with(Fixture::Verified);
    session.collector_mut().set_headline("dummy-verified").unwrap();
    session.collector_mut().set_country("us");
    assert_ok!(session.submit().await);

    assert!(session.reset());

    assert_eq!(session.state(), &ViewState::Idle);
    assert!(session.collector().input().is_empty());
    assert!(session.collector().hints().country.is_none());
}

#[tokio::test]
async fn test_reset_after_failure_clears_error() {
    let mut session = session_with(Fixture::Verified);
    assert_err!(session.submit().await);

    assert!(session.reset());

    assert_eq!(session.state(), &ViewState::Idle);
    assert!(session.state().error().is_none());
}

#[tokio::test]
async fn test_explicit_session_starts_awaiting_mode() {
    let mut session = Session::new(
        Arc::new(FixtureService::new(Fixture::Authentic)),
        InputCollector::new(ModePolicy::Explicit),
    );
    assert_eq!(session.state(), &ViewState::AwaitingModeSelection);

    // Submitting without a mode fails before any network call
    let err = assert_err!(session.submit().await);
    assert_eq!(err.to_string(), "Please select an option.");

    assert!(session.reset());
    assert_eq!(session.state(), &ViewState::AwaitingModeSelection);
    session.select_mode(InputKind::Text);
    assert_eq!(session.state(), &ViewState::Idle);
}
